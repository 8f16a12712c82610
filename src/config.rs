use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::{AttachmentPolicy, DEFAULT_BASE_URL, MAX_FILE_SIZE};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub attachments: AttachmentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the Webex REST API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentConfig {
    /// Largest local file accepted, in bytes
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Only accept extensions listed in `allowed_extensions`
    #[serde(default)]
    pub restrict_extensions: bool,
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

fn default_max_file_size() -> u64 {
    MAX_FILE_SIZE
}

fn default_allowed_extensions() -> Vec<String> {
    [
        "doc", "docx", "xls", "xlsx", "ppt", "pptx", "pdf", "jpg", "jpeg", "png", "gif", "bmp",
        "txt",
    ]
    .iter()
    .map(|ext| ext.to_string())
    .collect()
}

impl Default for AttachmentConfig {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
            restrict_extensions: false,
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format for the room list
    #[serde(default = "default_format")]
    pub default_format: String,
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_format() -> String {
    "table".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: default_format(),
            color: default_true(),
        }
    }
}

impl Config {
    /// Get the project directories
    pub fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "webex-notify", "webex-notify")
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs().context("Could not determine config directory")?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from `path`, or from the default location.
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::config_path()?,
        };

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", config_path))
        } else {
            Ok(Self::default())
        }
    }

    /// Attachment rules handed to the request builder
    pub fn attachment_policy(&self) -> AttachmentPolicy {
        let allowed_extensions = self.attachments.restrict_extensions.then(|| {
            self.attachments
                .allowed_extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
                .collect()
        });

        AttachmentPolicy {
            max_file_size: self.attachments.max_file_size,
            allowed_extensions,
        }
    }
}
