use super::{CommandHandler, CommandOptions, CommandResult};
use crate::cli::render;
use crate::session::Session;
use crate::store::{RecordStore, StudentId, Ticket};
use crate::Result;
use std::io::Write;

/// Handler for the `drop` command
pub struct DropCommand {
    pub student: StudentId,
    pub ticket: Ticket,
    pub options: CommandOptions,
}

impl CommandHandler for DropCommand {
    fn execute<S: RecordStore, W: Write>(
        &self,
        session: &mut Session<S>,
        out: &mut W,
    ) -> Result<CommandResult> {
        let decision = session.drop(&self.student, self.ticket)?;
        render::decision(out, &decision, self.options.format)?;
        Ok(CommandResult::from(&decision))
    }

    fn name(&self) -> &'static str {
        "drop"
    }
}

impl DropCommand {
    pub fn new(student: impl Into<StudentId>, ticket: Ticket, options: CommandOptions) -> Self {
        Self {
            student: student.into(),
            ticket,
            options,
        }
    }
}
