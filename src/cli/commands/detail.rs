use super::{CommandHandler, CommandOptions, CommandResult};
use crate::cli::render;
use crate::session::Session;
use crate::store::{RecordStore, Ticket};
use crate::Result;
use std::io::Write;

/// Handler for the `detail` command
pub struct DetailCommand {
    pub ticket: Ticket,
    pub options: CommandOptions,
}

impl CommandHandler for DetailCommand {
    fn execute<S: RecordStore, W: Write>(
        &self,
        session: &mut Session<S>,
        out: &mut W,
    ) -> Result<CommandResult> {
        let roster = session.course_roster(self.ticket)?;
        render::roster(out, &roster, self.options.format)?;
        Ok(CommandResult::Success)
    }

    fn name(&self) -> &'static str {
        "detail"
    }
}

impl DetailCommand {
    pub fn new(ticket: Ticket, options: CommandOptions) -> Self {
        Self { ticket, options }
    }
}
