//! Application configuration loaded from a TOML file.
//!
//! All fields have sensible defaults so the library works without a config
//! file. The configuration is passed explicitly to [`crate::session::ExportSession`]
//! construction; there is no global.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Top-level configuration for the export-folder subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Name of the export folder under the platform documents root.
    #[serde(default = "default_folder_name")]
    pub folder_name: String,
    /// Overrides the platform documents root. Mainly useful for tests and
    /// portable installs.
    #[serde(default)]
    pub documents_root: Option<PathBuf>,
    #[serde(default)]
    pub preview: PreviewConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            folder_name: default_folder_name(),
            documents_root: None,
            preview: PreviewConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::Io`] if the file cannot be read.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }

    /// Absolute path of the export directory.
    ///
    /// Resolution order: the `documents_root` override, then the platform
    /// documents directory, then the home directory. When none of these can
    /// be determined the folder name is returned as a relative path and the
    /// directory bootstrap decides whether it is usable.
    pub fn export_dir(&self) -> PathBuf {
        self.documents_root
            .clone()
            .or_else(dirs::document_dir)
            .or_else(dirs::home_dir)
            .map(|root| root.join(&self.folder_name))
            .unwrap_or_else(|| PathBuf::from(&self.folder_name))
    }
}

/// File preview limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Files larger than this many bytes are not previewed.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
        }
    }
}

fn default_folder_name() -> String {
    "OutTray".to_string()
}

fn default_max_file_size() -> u64 {
    10 * 1024 * 1024
}
