use crate::{RegistrarError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Seats per course
pub const DEFAULT_CAPACITY: usize = 15;

/// Credit hours a single student may carry
pub const DEFAULT_UNIT_CEILING: u32 = 12;

/// What the loaders do with a row whose field count is wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedRows {
    /// Fail the load, naming the file and line
    #[default]
    Reject,
    /// Log a warning and carry on without the row
    Skip,
}

/// Enrollment ceilings enforced by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub capacity: usize,
    pub unit_ceiling: Decimal,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            unit_ceiling: Decimal::from(DEFAULT_UNIT_CEILING),
        }
    }
}

/// Contents of `registrar.yaml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistrarConfig {
    /// Directory the data files are resolved against
    pub data_dir: PathBuf,
    pub students_file: PathBuf,
    pub courses_file: PathBuf,
    pub enrollments_file: PathBuf,
    pub capacity: usize,
    pub unit_ceiling: Decimal,
    pub malformed_rows: MalformedRows,
}

impl Default for RegistrarConfig {
    fn default() -> Self {
        let limits = Limits::default();
        Self {
            data_dir: PathBuf::from("."),
            students_file: PathBuf::from("students.csv"),
            courses_file: PathBuf::from("courses.csv"),
            enrollments_file: PathBuf::from("registration.csv"),
            capacity: limits.capacity,
            unit_ceiling: limits.unit_ceiling,
            malformed_rows: MalformedRows::default(),
        }
    }
}

impl RegistrarConfig {
    /// Parse configuration from YAML
    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty file means "all defaults"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: RegistrarConfig = serde_yaml_ng::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(RegistrarError::Config(
                "capacity must be at least 1".to_string(),
            ));
        }
        if self.unit_ceiling.is_sign_negative() {
            return Err(RegistrarError::Config(format!(
                "unit_ceiling must not be negative, got {}",
                self.unit_ceiling
            )));
        }
        for (key, value) in [
            ("students_file", &self.students_file),
            ("courses_file", &self.courses_file),
            ("enrollments_file", &self.enrollments_file),
        ] {
            if value.as_os_str().is_empty() {
                return Err(RegistrarError::Config(format!("{} must not be empty", key)));
            }
        }
        Ok(())
    }

    pub fn limits(&self) -> Limits {
        Limits {
            capacity: self.capacity,
            unit_ceiling: self.unit_ceiling,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = RegistrarConfig::default();
        assert_eq!(config.capacity, 15);
        assert_eq!(config.unit_ceiling, Decimal::from(12));
        assert_eq!(config.malformed_rows, MalformedRows::Reject);
        assert_eq!(config.enrollments_file, PathBuf::from("registration.csv"));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
data_dir: /srv/registrar
capacity: 30
malformed_rows: skip
"#;
        let config = RegistrarConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/registrar"));
        assert_eq!(config.capacity, 30);
        assert_eq!(config.unit_ceiling, Decimal::from(12));
        assert_eq!(config.malformed_rows, MalformedRows::Skip);
        assert_eq!(config.students_file, PathBuf::from("students.csv"));
    }

    #[test]
    fn test_fractional_unit_ceiling() {
        let config = RegistrarConfig::from_yaml("unit_ceiling: 12.5\n").unwrap();
        assert_eq!(config.limits().unit_ceiling, Decimal::new(125, 1));
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(
            RegistrarConfig::from_yaml("  \n").unwrap(),
            RegistrarConfig::default()
        );
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = RegistrarConfig::from_yaml("capacity: 0\n").unwrap_err();
        assert!(matches!(err, RegistrarError::Config(_)));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(RegistrarConfig::from_yaml("capacty: 10\n").is_err());
    }
}
