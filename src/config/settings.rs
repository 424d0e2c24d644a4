//! Configuration file format.

use serde::Deserialize;
use tracing::Level;

/// Root of the configuration file.
///
/// Every section is optional; `{}` is a valid file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Editor hint, ignored.
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Free-form note, ignored.
    #[serde(rename = "_comment", default)]
    _comment: Option<String>,

    /// Diagnostics written to stderr.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// The `logging` section.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Minimum level emitted when no `-v`/`-q` flag is given.
    #[serde(default)]
    pub level: LogLevel,
}

/// A log level as spelled in the configuration file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_warn() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert_eq!(Level::from(config.logging.level), Level::WARN);
    }

    #[test]
    fn annotated_file() {
        let json = r#"{
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "_comment": "local debugging",
            "logging": { "level": "debug" }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.logging.level, LogLevel::Debug);
    }

    #[test]
    fn unknown_level_rejected() {
        let result: Result<Config, _> = serde_json::from_str(r#"{"logging": {"level": "loud"}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(serde_json::from_str::<Config>(r#"{"port": 8080}"#).is_err());
        assert!(serde_json::from_str::<Config>(r#"{"logging": {"file": "x"}}"#).is_err());
    }
}
