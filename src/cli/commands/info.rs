use super::{CommandHandler, CommandOptions, CommandResult};
use crate::cli::render;
use crate::session::Session;
use crate::store::{RecordStore, StudentId};
use crate::Result;
use std::io::Write;

/// Handler for the `info` command
pub struct InfoCommand {
    pub student: StudentId,
    pub options: CommandOptions,
}

impl CommandHandler for InfoCommand {
    fn execute<S: RecordStore, W: Write>(
        &self,
        session: &mut Session<S>,
        out: &mut W,
    ) -> Result<CommandResult> {
        let schedule = session.student_schedule(&self.student)?;
        render::schedule(out, &schedule, self.options.format)?;
        Ok(CommandResult::Success)
    }

    fn name(&self) -> &'static str {
        "info"
    }
}

impl InfoCommand {
    pub fn new(student: impl Into<StudentId>, options: CommandOptions) -> Self {
        Self {
            student: student.into(),
            options,
        }
    }
}
