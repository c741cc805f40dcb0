use crate::filter::SeamPolicy;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Run configuration; every field can also be set from the command line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DenoiseConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub threads: usize,
    pub seam_policy: SeamPolicy,
    /// Where to write the JSON run report, if anywhere
    pub report: Option<PathBuf>,
    pub logging: LoggingConfig,
}

impl Default for DenoiseConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("ship.png"),
            output: PathBuf::from("out.png"),
            threads: 1,
            seam_policy: SeamPolicy::Legacy,
            report: None,
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl DenoiseConfig {
    /// Load from TOML, or JSON when the content starts with `{`
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = fs::read_to_string(path)?;

        if content.trim_start().starts_with('{') {
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(toml::from_str(&content)?)
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P, format: ConfigFormat) -> crate::Result<()> {
        let content = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.threads == 0 {
            errors.push("threads must be at least 1".to_string());
        }

        if self.input == self.output {
            errors.push(format!(
                "input and output must differ (both are {})",
                self.input.display()
            ));
        }

        if let Err(e) = self.logging.validate() {
            errors.push(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
