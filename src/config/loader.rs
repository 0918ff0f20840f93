use super::types::RegistrarConfig;
use crate::io::paths::config_candidates;
use crate::{RegistrarError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Configuration together with the file it came from, if any
#[derive(Debug, Clone)]
pub struct LoadedConfiguration {
    pub config: RegistrarConfig,
    pub source: Option<PathBuf>,
}

/// Finds and reads `registrar.yaml`
pub struct ConfigLoader {
    working_dir: PathBuf,
    explicit: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a loader that searches from `working_dir`
    pub fn new(working_dir: &Path) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            explicit: None,
        }
    }

    /// Use this file instead of searching. A missing explicit file is an error.
    pub fn with_explicit_path(mut self, path: Option<PathBuf>) -> Self {
        self.explicit = path;
        self
    }

    /// Load configuration from a specific file
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<RegistrarConfig> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            RegistrarError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        RegistrarConfig::from_yaml(&contents).map_err(|e| {
            RegistrarError::Config(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Resolve configuration: explicit path, then the working directory, then the
    /// user config directory, then built-in defaults.
    pub fn load(&self) -> Result<LoadedConfiguration> {
        if let Some(path) = &self.explicit {
            let config = Self::load_file(path)?;
            info!("Loaded configuration from {:?}", path);
            return Ok(LoadedConfiguration {
                config: self.anchor(config, path),
                source: Some(path.clone()),
            });
        }

        for candidate in config_candidates(&self.working_dir) {
            if candidate.is_file() {
                let config = Self::load_file(&candidate)?;
                info!("Loaded configuration from {:?}", candidate);
                return Ok(LoadedConfiguration {
                    config: self.anchor(config, &candidate),
                    source: Some(candidate),
                });
            }
            debug!("No configuration at {:?}", candidate);
        }

        let mut config = RegistrarConfig::default();
        config.data_dir = self.working_dir.clone();
        Ok(LoadedConfiguration {
            config,
            source: None,
        })
    }

    /// A relative data_dir is taken relative to the directory holding the config file
    fn anchor(&self, mut config: RegistrarConfig, source: &Path) -> RegistrarConfig {
        if config.data_dir.is_relative() {
            let base = source
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| self.working_dir.clone());
            config.data_dir = base.join(&config.data_dir);
        }
        config
    }
}
