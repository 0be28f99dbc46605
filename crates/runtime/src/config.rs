//! Codec configuration via `polycodec.toml`
//!
//! Every field has a default, so an empty file (or no file at all) gives the
//! standard decoding policy. Values are validated eagerly when loaded.

use serde::{Deserialize, Serialize};
use std::path::Path;

use polycodec_core::{Error, Result};

/// Config file name looked up by applications embedding the codec.
pub const CONFIG_FILE_NAME: &str = "polycodec.toml";

/// How passed-through list items are logged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassthroughLog {
    /// Not logged
    Off,
    /// Logged at `DEBUG`
    Debug,
    /// Logged at `WARN`, for deployments that want schema skew to be visible
    Warn,
}

/// List codec configuration loaded from `polycodec.toml`.
///
/// # Example
///
/// ```toml
/// # Recover kind/version metadata for items no decoder can fully decode
/// metadata_fallback = true
///
/// # Log level for items no decoder recognizes: "off", "debug" or "warn"
/// passthrough_log = "debug"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Run the metadata-only pass when no decoder owns an item's kind.
    #[serde(default = "default_metadata_fallback")]
    pub metadata_fallback: bool,
    /// Passthrough log level: `"off"`, `"debug"` or `"warn"`.
    #[serde(default = "default_passthrough_log_str")]
    pub passthrough_log: String,
}

fn default_metadata_fallback() -> bool {
    true
}

fn default_passthrough_log_str() -> String {
    "debug".to_string()
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            metadata_fallback: default_metadata_fallback(),
            passthrough_log: default_passthrough_log_str(),
        }
    }
}

impl CodecConfig {
    /// Parse the passthrough log string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `"off"`, `"debug"` or `"warn"`.
    pub fn parse_passthrough_log(&self) -> Result<PassthroughLog> {
        match self.passthrough_log.as_str() {
            "off" => Ok(PassthroughLog::Off),
            "debug" => Ok(PassthroughLog::Debug),
            "warn" => Ok(PassthroughLog::Warn),
            other => Err(Error::config(format!(
                "Invalid passthrough_log '{}' in {}. Expected \"off\", \"debug\" or \"warn\".",
                other, CONFIG_FILE_NAME
            ))),
        }
    }

    /// Passthrough log level, falling back to `Debug` for invalid values.
    ///
    /// Configs loaded through [`CodecConfig::from_file`] or
    /// [`CodecConfig::from_toml_str`] are already validated.
    pub fn passthrough_log(&self) -> PassthroughLog {
        self.parse_passthrough_log().unwrap_or(PassthroughLog::Debug)
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# polycodec list codec configuration
#
# Recover kind/version metadata for items no decoder can fully decode
# (default: true). When false, such items are passed through untouched.
metadata_fallback = true

# Log level for items no decoder recognizes at all: "off", "debug" (default)
# or "warn". These items are never reported as errors.
passthrough_log = "debug"
"#
    }

    /// Parse and validate config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be parsed or holds invalid values.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CodecConfig = toml::from_str(content)
            .map_err(|e| Error::config(format!("Failed to parse config: {}", e)))?;
        config.parse_passthrough_log()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: CodecConfig = toml::from_str(&content).map_err(|e| {
            Error::config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.parse_passthrough_log()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml())?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
