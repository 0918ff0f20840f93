use super::{CommandHandler, CommandOptions, CommandResult};
use crate::cli::render;
use crate::session::Session;
use crate::store::{RecordStore, StudentId, Ticket};
use crate::Result;
use std::io::Write;

/// Handler for the `register` command
pub struct RegisterCommand {
    pub student: StudentId,
    pub ticket: Ticket,
    pub options: CommandOptions,
}

impl CommandHandler for RegisterCommand {
    fn execute<S: RecordStore, W: Write>(
        &self,
        session: &mut Session<S>,
        out: &mut W,
    ) -> Result<CommandResult> {
        let decision = session.register(&self.student, self.ticket)?;
        render::decision(out, &decision, self.options.format)?;
        Ok(CommandResult::from(&decision))
    }

    fn name(&self) -> &'static str {
        "register"
    }
}

impl RegisterCommand {
    pub fn new(student: impl Into<StudentId>, ticket: Ticket, options: CommandOptions) -> Self {
        Self {
            student: student.into(),
            ticket,
            options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Limits, MalformedRows};
    use crate::store::{Course, MemoryStore, Student};
    use rust_decimal::Decimal;

    fn create_test_session() -> Session<MemoryStore> {
        let store = MemoryStore::new(
            vec![Student::new("alee0", "Ann", "Lee")],
            vec![Course {
                ticket: 40123,
                code: "CS1A".to_string(),
                name: "Intro to Python".to_string(),
                credit_hours: Decimal::from(3),
                day: "MW".to_string(),
                time: "9:00-10:20".to_string(),
                instructor: "Smith".to_string(),
            }],
            Vec::new(),
        );
        Session::open(store, Limits::default(), MalformedRows::Reject).unwrap()
    }

    #[test]
    fn test_register_then_duplicate() {
        let mut session = create_test_session();
        let command = RegisterCommand::new("alee0", 40123, CommandOptions::default());

        let mut out = Vec::new();
        assert_eq!(
            command.execute(&mut session, &mut out).unwrap(),
            CommandResult::Success
        );
        assert_eq!(String::from_utf8(out).unwrap(), "alee0 was added to 40123.\n");

        let mut out = Vec::new();
        let result = command.execute(&mut session, &mut out).unwrap();
        assert_eq!(result.exit_code(), 2);
        assert_eq!(
            result.message(),
            Some("alee0 is already registered for this course.")
        );
    }
}
