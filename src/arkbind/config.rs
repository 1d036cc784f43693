//! # Configuration
//!
//! arkbind reads one YAML file at startup into a typed [`ArkConfig`] and validates
//! it before anything runs.
//!
//! ## Lookup Order
//!
//! 1. `--config <path>`: must exist.
//! 2. `./config.yaml` in the working directory.
//! 3. `config.yaml` in the platform config directory (via `directories`).
//! 4. Compiled defaults.
//!
//! The CLI flags `--noid-path` and `--db-path` override whatever the file says.
//!
//! ## File Layout
//!
//! | Section | Key | Default |
//! |---------|-----|---------|
//! | `NOID` | `noid_path` | `noid` |
//! | `NOID` | `db_path` | `.` |
//! | `Logging` | `level` | `INFO` |
//! | `Fields` | `identifier`, `ogm_aardvark_id`, `title`, `access`, `where`, `download` | Aardvark names |
//! | `Batch` | `extensions` | `[".json"]` |

use crate::batch::BatchOptions;
use crate::error::{ArkError, Result};
use crate::fieldmap::FieldMap;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const CONFIG_FILENAME: &str = "config.yaml";
const DEFAULT_NOID_PATH: &str = "noid";
const DEFAULT_DB_PATH: &str = ".";

/// Where the NOID program and its minter database live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoidSettings {
    #[serde(default = "default_noid_path")]
    pub noid_path: String,

    #[serde(default = "default_db_path")]
    pub db_path: String,
}

fn default_noid_path() -> String {
    DEFAULT_NOID_PATH.to_string()
}

fn default_db_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

impl Default for NoidSettings {
    fn default() -> Self {
        Self {
            noid_path: default_noid_path(),
            db_path: default_db_path(),
        }
    }
}

/// Log verbosity, spelled the way existing NOID deployment configs spell it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error | LogLevel::Critical => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = ArkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            "CRITICAL" | "FATAL" => Ok(LogLevel::Critical),
            other => Err(ArkError::Config(format!("Unknown log level: {}", other))),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = ArkError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        level.to_string()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default)]
    pub level: LogLevel,
}

/// Configuration for arkbind, stored in `config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArkConfig {
    #[serde(rename = "NOID", default)]
    pub noid: NoidSettings,

    #[serde(rename = "Logging", default)]
    pub logging: LoggingSettings,

    #[serde(rename = "Fields", default)]
    pub fields: FieldMap,

    #[serde(rename = "Batch", default)]
    pub batch: BatchOptions,
}

impl ArkConfig {
    /// Parse and validate YAML text. An empty document yields the defaults.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let mut config: ArkConfig = if text.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(text)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load config from an explicit file. The file must exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ArkError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Resolve the config per the lookup order; returns the file used, if any.
    pub fn discover(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        for candidate in default_locations() {
            if candidate.is_file() {
                let config = Self::load(&candidate)?;
                return Ok((config, Some(candidate)));
            }
        }

        Ok((Self::default(), None))
    }

    /// Check required fields and normalize the rest.
    pub fn validate(&mut self) -> Result<()> {
        if self.noid.noid_path.trim().is_empty() {
            return Err(ArkError::Config("NOID.noid_path must not be empty".into()));
        }
        if self.noid.db_path.trim().is_empty() {
            return Err(ArkError::Config("NOID.db_path must not be empty".into()));
        }
        self.fields.validate()?;
        self.batch.normalize();
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

fn default_locations() -> Vec<PathBuf> {
    let mut locations = vec![PathBuf::from(CONFIG_FILENAME)];
    if let Some(dirs) = ProjectDirs::from("org", "arkbind", "arkbind") {
        locations.push(dirs.config_dir().join(CONFIG_FILENAME));
    }
    locations
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
NOID:
  noid_path: /usr/local/bin/noid
  db_path: /var/noid/db
Logging:
  level: WARNING
";

    #[test]
    fn test_default_config() {
        let config = ArkConfig::default();
        assert_eq!(config.noid.noid_path, "noid");
        assert_eq!(config.noid.db_path, ".");
        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.batch.extensions, vec![".json"]);
    }

    #[test]
    fn test_parse_sections() {
        let config = ArkConfig::from_yaml(SAMPLE).unwrap();
        assert_eq!(config.noid.noid_path, "/usr/local/bin/noid");
        assert_eq!(config.noid.db_path, "/var/noid/db");
        assert_eq!(config.logging.level, LogLevel::Warning);
        assert_eq!(config.fields, FieldMap::default());
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(ArkConfig::from_yaml("  \n").unwrap(), ArkConfig::default());
    }

    #[test]
    fn test_missing_keys_fall_back() {
        let config = ArkConfig::from_yaml("NOID:\n  db_path: minter\n").unwrap();
        assert_eq!(config.noid.noid_path, "noid");
        assert_eq!(config.noid.db_path, "minter");
    }

    #[test]
    fn test_unknown_level_is_rejected() {
        let err = ArkConfig::from_yaml("Logging:\n  level: LOUD\n").unwrap_err();
        assert!(err.to_string().contains("LOUD"));
    }

    #[test]
    fn test_level_names() {
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("WARN".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!(LogLevel::Critical.directive(), "error");
        assert_eq!(LogLevel::Warning.to_string(), "WARNING");
    }

    #[test]
    fn test_empty_noid_path_is_rejected() {
        let err = ArkConfig::from_yaml("NOID:\n  noid_path: ''\n").unwrap_err();
        assert!(matches!(err, ArkError::Config(_)));
    }

    #[test]
    fn test_extensions_are_normalized() {
        let config = ArkConfig::from_yaml("Batch:\n  extensions: [json, .geojson]\n").unwrap();
        assert_eq!(config.batch.extensions, vec![".json", ".geojson"]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ArkConfig::load(dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, ArkError::Config(_)));
    }

    #[test]
    fn test_discover_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        fs::write(&path, SAMPLE).unwrap();

        let (config, source) = ArkConfig::discover(Some(&path)).unwrap();
        assert_eq!(config.noid.db_path, "/var/noid/db");
        assert_eq!(source, Some(path));
    }

    #[test]
    fn test_yaml_roundtrip_keeps_section_names() {
        let yaml = ArkConfig::default().to_yaml().unwrap();
        assert!(yaml.contains("NOID:"));
        assert!(yaml.contains("level: INFO"));
        assert_eq!(ArkConfig::from_yaml(&yaml).unwrap(), ArkConfig::default());
    }
}
