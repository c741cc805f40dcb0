//! Logging configuration
//!
//! Controls the log level, console output and the optional JSON log file.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const VALID_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Global log level (trace, debug, info, warn, error)
    pub global_level: String,

    /// Level for the filter core (kernel and band coordinator)
    pub filter_level: String,

    /// Enable console output
    pub console_output: bool,

    /// Directory for daily rolling JSON log files (None = no file logging)
    pub log_directory: Option<PathBuf>,

    /// Include file location in logs
    pub include_file_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            global_level: "warn".to_string(),
            filter_level: "warn".to_string(),
            console_output: true,
            log_directory: None,
            include_file_location: false,
        }
    }
}

impl LoggingConfig {
    /// Create a development configuration with verbose logging
    pub fn development() -> Self {
        Self {
            global_level: "debug".to_string(),
            filter_level: "trace".to_string(),
            console_output: true,
            log_directory: Some(PathBuf::from("logs")),
            include_file_location: true,
        }
    }

    /// Map a `-v` count onto both levels
    pub fn with_verbosity(mut self, verbose: u8) -> Self {
        if verbose == 0 {
            return self;
        }
        let level = match verbose {
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        self.global_level = level.to_string();
        self.filter_level = level.to_string();
        self
    }

    /// Validate the configuration and provide helpful error messages
    pub fn validate(&self) -> Result<(), String> {
        if !VALID_LEVELS.contains(&self.global_level.as_str()) {
            return Err(format!("Invalid global_level: {}. Must be one of: {:?}",
                             self.global_level, VALID_LEVELS));
        }

        if !VALID_LEVELS.contains(&self.filter_level.as_str()) {
            return Err(format!("Invalid filter_level: {}. Must be one of: {:?}",
                             self.filter_level, VALID_LEVELS));
        }

        if let Some(ref log_dir) = self.log_directory {
            if let Some(parent) = log_dir.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(format!("Log directory parent does not exist: {:?}", parent));
                }
            }
        }

        Ok(())
    }

    /// `EnvFilter` directive string for this configuration
    pub fn filter_directives(&self) -> String {
        let crate_name = env!("CARGO_PKG_NAME").replace('-', "_");
        format!(
            "{}={},{}::filter={}",
            crate_name, self.global_level, crate_name, self.filter_level
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.global_level, "warn");
        assert!(config.console_output);
        assert!(config.log_directory.is_none());
        assert!(!config.include_file_location);
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(LoggingConfig::default().with_verbosity(0).global_level, "warn");
        assert_eq!(LoggingConfig::default().with_verbosity(1).global_level, "info");
        assert_eq!(LoggingConfig::default().with_verbosity(2).filter_level, "debug");
        assert_eq!(LoggingConfig::default().with_verbosity(9).global_level, "trace");
    }

    #[test]
    fn test_config_validation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());

        config.global_level = "invalid".to_string();
        assert!(config.validate().is_err());

        config.global_level = "debug".to_string();
        config.filter_level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_filter_directives_name_crate() {
        let directives = LoggingConfig::development().filter_directives();
        assert_eq!(directives, "median_denoise=debug,median_denoise::filter=trace");
    }
}
