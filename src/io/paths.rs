use crate::config::RegistrarConfig;
use crate::{RegistrarError, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working and config directories
pub const CONFIG_FILE_NAME: &str = "registrar.yaml";

/// Resolved locations of the three record files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub students: PathBuf,
    pub courses: PathBuf,
    pub enrollments: PathBuf,
}

impl DataPaths {
    /// Resolve the configured file names against the configured data directory
    pub fn from_config(config: &RegistrarConfig) -> Self {
        Self::in_dir(
            &config.data_dir,
            &config.students_file,
            &config.courses_file,
            &config.enrollments_file,
        )
    }

    /// Resolve file names against `data_dir`; absolute names are kept as is
    pub fn in_dir(data_dir: &Path, students: &Path, courses: &Path, enrollments: &Path) -> Self {
        Self {
            students: data_dir.join(students),
            courses: data_dir.join(courses),
            enrollments: data_dir.join(enrollments),
        }
    }

    /// Default file names inside `data_dir`
    pub fn for_dir(data_dir: &Path) -> Self {
        let mut config = RegistrarConfig::default();
        config.data_dir = data_dir.to_path_buf();
        Self::from_config(&config)
    }
}

/// Platform configuration directory for registrar (e.g. ~/.config/registrar)
pub fn user_config_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "registrar").ok_or_else(|| {
        RegistrarError::Path("Failed to determine project directories".to_string())
    })?;
    Ok(dirs.config_dir().to_path_buf())
}

/// Candidate configuration files in lookup order
pub fn config_candidates(working_dir: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![working_dir.join(CONFIG_FILE_NAME)];
    if let Ok(dir) = user_config_dir() {
        candidates.push(dir.join(CONFIG_FILE_NAME));
    }
    candidates
}
