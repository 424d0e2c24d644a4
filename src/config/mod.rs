//! Optional configuration file.
//!
//! No file is read unless one is named on the command line. The file only
//! tunes diagnostics; it never changes what the server sends over the
//! protocol.

mod settings;

pub use settings::{Config, LogLevel, LoggingConfig};

use std::path::Path;

use crate::error::ConfigError;

/// Loads and parses the configuration file at `path`.
///
/// # Errors
///
/// Returns an error if the file does not exist, cannot be read, or is not
/// valid configuration JSON.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|source| ConfigError::ParseError {
        path: path.to_path_buf(),
        source,
    })
}
