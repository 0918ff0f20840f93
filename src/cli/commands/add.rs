use super::{CommandHandler, CommandOptions, CommandResult};
use crate::cli::render;
use crate::session::Session;
use crate::store::RecordStore;
use crate::{RegistrarError, Result};
use std::io::Write;

/// Handler for the `add` command
pub struct AddCommand {
    pub first_name: String,
    pub last_name: String,
    pub options: CommandOptions,
}

impl CommandHandler for AddCommand {
    fn execute<S: RecordStore, W: Write>(
        &self,
        session: &mut Session<S>,
        out: &mut W,
    ) -> Result<CommandResult> {
        validate_name(&self.first_name)?;
        validate_name(&self.last_name)?;

        let student = session.add_student(&self.first_name, &self.last_name)?;
        render::student_added(out, &student, self.options.format)?;
        Ok(CommandResult::Success)
    }

    fn name(&self) -> &'static str {
        "add"
    }
}

impl AddCommand {
    pub fn new(first_name: String, last_name: String, options: CommandOptions) -> Self {
        Self {
            first_name,
            last_name,
            options,
        }
    }
}

/// Names may only contain letters and cannot be blank
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || !name.chars().all(char::is_alphabetic) {
        return Err(RegistrarError::Validation(
            "Student's name can only contain alphabetic letters and cannot be left blank."
                .to_string(),
        ));
    }
    Ok(())
}
