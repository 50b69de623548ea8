//! Configuration for the style validator
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (style-validator.toml)
//! - Environment variables (STYLE_VALIDATOR__*)
//!
//! ## Example config file (style-validator.toml):
//! ```toml
//! [spec]
//! path = "./spec/v8.json"
//!
//! [output]
//! format = "text"
//!
//! [validation]
//! max_diagnostics = 100
//! extensions = ["json"]
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Which style spec to validate against
    #[serde(default)]
    pub spec: SpecConfig,

    /// How diagnostics are printed
    #[serde(default)]
    pub output: OutputConfig,

    /// Validation run settings
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Style spec location
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecConfig {
    /// Path to the style spec JSON. There is no built-in spec, so either
    /// this or `--spec` must be given.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// Diagnostic output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One `path: message` line per diagnostic
    #[default]
    Text,
    /// Compact JSON report
    Json,
    /// Indented JSON report
    Pretty,
}

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Stop reporting after this many diagnostics per document (0 = all)
    #[serde(default)]
    pub max_diagnostics: usize,

    /// File extensions picked up when a directory is given
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_extensions() -> Vec<String> {
    vec!["json".to_string()]
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_diagnostics: 0,
            extensions: default_extensions(),
        }
    }
}

impl ValidatorConfig {
    /// Load configuration, layering an explicit file over the defaults
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = [
            "style-validator.toml",
            ".style-validator.toml",
            "config/style-validator.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "familiar", "style-validator") {
            let xdg_config = config_dir.config_dir().join("style-validator.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        }

        // Load from environment variables (STYLE_VALIDATOR__*)
        builder = builder.add_source(
            Environment::with_prefix("STYLE_VALIDATOR")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Whether a file should be picked up when walking a directory
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.validation.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ValidatorConfig::default();
        assert!(config.spec.path.is_none());
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.validation.max_diagnostics, 0);
        assert!(config.accepts(Path::new("style.JSON")));
        assert!(!config.accepts(Path::new("style.yaml")));
    }

    #[test]
    fn test_serialize_config() {
        let config = ValidatorConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[output]"));
        assert!(toml_str.contains("[validation]"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[spec]\npath = \"spec/v8.json\"\n\n[output]\nformat = \"pretty\"\n\n[validation]\nmax_diagnostics = 5\n",
        )
        .unwrap();

        let config = ValidatorConfig::load_from(Some(&path)).unwrap();
        assert_eq!(config.spec.path, Some(PathBuf::from("spec/v8.json")));
        assert_eq!(config.output.format, OutputFormat::Pretty);
        assert_eq!(config.validation.max_diagnostics, 5);
        assert_eq!(config.validation.extensions, vec!["json"]);
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.toml");

        let mut config = ValidatorConfig::default();
        config.spec.path = Some(PathBuf::from("styles/v8.json"));
        config.output.format = OutputFormat::Json;
        config.validation.max_diagnostics = 20;
        config.validation.extensions = vec!["json".to_string(), "style".to_string()];
        config.save(&path).unwrap();

        let loaded = ValidatorConfig::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.spec.path, config.spec.path);
        assert_eq!(loaded.output.format, OutputFormat::Json);
        assert_eq!(loaded.validation.max_diagnostics, 20);
        assert_eq!(loaded.validation.extensions, vec!["json", "style"]);
        assert!(loaded.accepts(Path::new("city.style")));
    }
}
