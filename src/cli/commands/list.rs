use super::{CommandHandler, CommandOptions, CommandResult};
use crate::cli::render;
use crate::session::Session;
use crate::store::RecordStore;
use crate::Result;
use std::io::Write;

/// Handler for the `list` command
pub struct ListCommand {
    pub options: CommandOptions,
}

impl CommandHandler for ListCommand {
    fn execute<S: RecordStore, W: Write>(
        &self,
        session: &mut Session<S>,
        out: &mut W,
    ) -> Result<CommandResult> {
        render::listing(out, &session.course_listing(), self.options.format)?;
        Ok(CommandResult::Success)
    }

    fn name(&self) -> &'static str {
        "list"
    }
}

impl ListCommand {
    pub fn new(options: CommandOptions) -> Self {
        Self { options }
    }
}
