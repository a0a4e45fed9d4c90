use std::path::{Path, PathBuf};

use gemval_common::config::SystemConfig;

/// Load the system configuration from a TOML file.
///
/// A missing file is not an error: the engine runs on defaults and
/// logs that it did. A present but malformed file fails loudly so the
/// service refuses to start on misconfiguration.
pub fn load_config(path: &Path) -> Result<SystemConfig, ConfigError> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "Config file not found, using defaults");
        return Ok(SystemConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config: SystemConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;

    tracing::info!(path = %path.display(), "Configuration loaded");
    Ok(config)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {detail}")]
    Parse { path: PathBuf, detail: String },
}

impl From<ConfigError> for gemval_common::GemvalError {
    fn from(e: ConfigError) -> Self {
        gemval_common::GemvalError::Config(e.to_string())
    }
}
