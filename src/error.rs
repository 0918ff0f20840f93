use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistrarError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: u64,
        message: String,
    },

    #[error("Malformed row in {}:{line}: expected {expected} fields, found {found}", path.display())]
    MalformedRow {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("YAML serialization error: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    #[error("Path error: {0}")]
    Path(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data integrity error: {0}")]
    Integrity(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Student {0} was not found")]
    StudentNotFound(String),

    #[error("Course {0} was not found")]
    CourseNotFound(u32),

    /// The in-memory change was applied but could not be written out.
    #[error("Changes may not be saved: {0}")]
    Unsaved(#[source] Box<RegistrarError>),
}

/// Coarse classification used by callers deciding how to report a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NotFound,
    Validation,
    Io,
    Parse,
    Integrity,
    Config,
}

impl RegistrarError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RegistrarError::StudentNotFound(_) | RegistrarError::CourseNotFound(_) => {
                ErrorCategory::NotFound
            }
            RegistrarError::Validation(_) => ErrorCategory::Validation,
            RegistrarError::Io(_)
            | RegistrarError::Read { .. }
            | RegistrarError::Write { .. }
            | RegistrarError::Unsaved(_) => ErrorCategory::Io,
            RegistrarError::Parse { .. } | RegistrarError::Csv(_) => ErrorCategory::Parse,
            RegistrarError::MalformedRow { .. } | RegistrarError::Integrity(_) => {
                ErrorCategory::Integrity
            }
            RegistrarError::YamlSerialization(_)
            | RegistrarError::JsonSerialization(_)
            | RegistrarError::Path(_)
            | RegistrarError::Config(_) => ErrorCategory::Config,
        }
    }

    /// True when a mutation landed in memory but not on disk.
    pub fn is_unsaved(&self) -> bool {
        matches!(self, RegistrarError::Unsaved(_))
    }
}

pub type Result<T> = std::result::Result<T, RegistrarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(
            RegistrarError::StudentNotFound("alee0".to_string()).category(),
            ErrorCategory::NotFound
        );
        assert_eq!(
            RegistrarError::CourseNotFound(7).category(),
            ErrorCategory::NotFound
        );
        let parse = RegistrarError::Parse {
            path: PathBuf::from("courses.csv"),
            line: 3,
            message: "invalid credit hours 'three'".to_string(),
        };
        assert_eq!(parse.category(), ErrorCategory::Parse);
        assert_eq!(
            parse.to_string(),
            "Parse error in courses.csv:3: invalid credit hours 'three'"
        );
    }

    #[test]
    fn test_unsaved_wraps_io() {
        let inner = RegistrarError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        ));
        let err = RegistrarError::Unsaved(Box::new(inner));
        assert!(err.is_unsaved());
        assert_eq!(err.category(), ErrorCategory::Io);
        assert!(err.to_string().starts_with("Changes may not be saved"));
    }
}
