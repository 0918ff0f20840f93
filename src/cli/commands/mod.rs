pub mod add;
pub mod detail;
pub mod drop;
pub mod info;
pub mod list;
pub mod register;
pub mod shell;

use super::app::OutputFormat;
use crate::engine::Decision;
use crate::session::Session;
use crate::store::RecordStore;
use crate::{RegistrarError, Result};
use std::io::Write;
use tracing::{error, warn};

/// Common trait for all command handlers
pub trait CommandHandler {
    /// Execute the command against an open session, writing results to `out`
    fn execute<S: RecordStore, W: Write>(
        &self,
        session: &mut Session<S>,
        out: &mut W,
    ) -> Result<CommandResult>;

    /// Get command name for logging
    fn name(&self) -> &'static str;
}

/// Command execution result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// The command did what was asked
    Success,
    /// A business rule refused the request; nothing changed
    Rejected(String),
}

impl CommandResult {
    /// Convert to exit code
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandResult::Success => 0,
            CommandResult::Rejected(_) => 2,
        }
    }

    /// Get message if any
    pub fn message(&self) -> Option<&str> {
        match self {
            CommandResult::Success => None,
            CommandResult::Rejected(msg) => Some(msg),
        }
    }
}

impl From<&Decision> for CommandResult {
    fn from(decision: &Decision) -> Self {
        match decision.rejection() {
            Some(rejection) => CommandResult::Rejected(rejection.to_string()),
            None => CommandResult::Success,
        }
    }
}

/// Settings shared by every command
#[derive(Debug, Clone, Copy)]
pub struct CommandOptions {
    pub format: OutputFormat,
}

impl Default for CommandOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
        }
    }
}

/// Combine a command's outcome with the result of closing its session.
///
/// Closing retries writes that failed during the command, so an unsaved
/// outcome whose retry succeeded counts as a success. A failed close is never
/// dropped: it becomes the error when the command itself succeeded and is
/// logged when both failed.
pub fn finish(outcome: Result<CommandResult>, closed: Result<()>) -> Result<CommandResult> {
    match (outcome, closed) {
        (Ok(result), Ok(())) => Ok(result),
        (Err(e), Ok(())) if e.is_unsaved() => {
            warn!("{}; written when the session closed", e);
            Ok(CommandResult::Success)
        }
        (Err(e), Ok(())) => Err(e),
        (Ok(_), Err(close_error)) => Err(match close_error {
            unsaved @ RegistrarError::Unsaved(_) => unsaved,
            other => RegistrarError::Unsaved(Box::new(other)),
        }),
        (Err(e), Err(close_error)) => {
            error!("Changes may not be saved: {}", close_error);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write_failure() -> RegistrarError {
        RegistrarError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        ))
    }

    #[test]
    fn test_unsaved_outcome_recovered_on_close() {
        let outcome = Err(RegistrarError::Unsaved(Box::new(write_failure())));
        assert_eq!(finish(outcome, Ok(())).unwrap(), CommandResult::Success);
    }

    #[test]
    fn test_rejection_passes_through() {
        let rejected = CommandResult::Rejected("0 is full.".to_string());
        assert_eq!(finish(Ok(rejected.clone()), Ok(())).unwrap(), rejected);
    }

    #[test]
    fn test_close_failure_reported_after_success() {
        let err = finish(Ok(CommandResult::Success), Err(write_failure())).unwrap_err();
        assert!(err.is_unsaved());
    }

    #[test]
    fn test_command_error_kept_when_close_also_fails() {
        let outcome = Err(RegistrarError::StudentNotFound("zz9".to_string()));
        let err = finish(outcome, Err(write_failure())).unwrap_err();
        assert!(matches!(err, RegistrarError::StudentNotFound(_)));
    }

    #[test]
    fn test_other_errors_survive_clean_close() {
        let outcome = Err(RegistrarError::CourseNotFound(7));
        let err = finish(outcome, Ok(())).unwrap_err();
        assert!(matches!(err, RegistrarError::CourseNotFound(7)));
    }
}
