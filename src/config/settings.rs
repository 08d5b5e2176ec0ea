//! Application settings and configuration management

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Application settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    /// Cloud account name addressed by upload and delivery URLs
    pub cloud_name: String,
    /// API key for signed operations (optional for unsigned preset uploads)
    #[serde(default)]
    pub api_key: Option<String>,
    /// Unsigned upload preset name sent with every upload
    #[serde(default = "default_upload_preset")]
    pub upload_preset: String,
    /// Default folder new assets are uploaded into
    #[serde(default)]
    pub folder: Option<String>,
    /// Maximum accepted file size in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
    /// Mime-type allow-list; `None` accepts any type
    #[serde(default)]
    pub accepted_types: Option<Vec<String>>,
}

fn default_upload_preset() -> String {
    "ml_default".to_string()
}

fn default_max_upload_bytes() -> u64 {
    // 100 MiB
    100 * 1024 * 1024
}

/// Error types for configuration operations
#[derive(Debug)]
pub enum ConfigError {
    IoError(io::Error),
    ParseError(String),
    ValidationError(String),
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "I/O error: {}", e),
            ConfigError::ParseError(s) => write!(f, "Parse error: {}", s),
            ConfigError::ValidationError(s) => write!(f, "Validation error: {}", s),
        }
    }
}

impl Error for ConfigError {}

impl Settings {
    /// Create default settings
    pub fn default() -> Self {
        Settings {
            cloud_name: String::new(),
            api_key: None,
            upload_preset: default_upload_preset(),
            folder: None,
            max_upload_bytes: default_max_upload_bytes(),
            accepted_types: None,
        }
    }

    /// Load settings from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    /// Save settings to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(&self)?;

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config").join("mediacli").join("config.json")
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cloud_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "Cloud name cannot be empty".to_string(),
            ));
        }

        if self.upload_preset.is_empty() {
            return Err(ConfigError::ValidationError(
                "Upload preset cannot be empty".to_string(),
            ));
        }

        if self.max_upload_bytes == 0 {
            return Err(ConfigError::ValidationError(
                "Maximum upload size must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
