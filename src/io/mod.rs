pub mod paths;

pub use paths::{config_candidates, user_config_dir, DataPaths, CONFIG_FILE_NAME};
