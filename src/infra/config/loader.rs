use std::{fs, path::Path};

use crate::infra::{
    config::{file_config::FileConfig, AppConfig},
    error::AppError,
};

/// Loads configuration from `path`. Nothing downstream can run without it,
/// so a missing or malformed file is an error the orchestrator aborts on.
pub fn load(path: &Path) -> Result<AppConfig, AppError> {
    let raw = fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    let file_config: FileConfig = toml::from_str(&raw).map_err(|source| AppError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;

    let mut config = AppConfig::default();
    file_config.merge_into(&mut config);
    Ok(config)
}
