//! Synchronization settings shared between the scanner, the reconciler, and
//! the launcher.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::error::Error;

/// Screensaver synchronization settings, loaded from a JSON document.
///
/// The document usually lives next to the image share itself, so the path it
/// is read from may be a UNC-style mount. Fetching the document over HTTP is
/// the launcher's business, not this crate's.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SyncConfig {
    /// Network share holding the source-of-truth images.
    pub remote_dir: PathBuf,

    /// Absolute local directory mirroring the share's matching files.
    pub cache_dir: PathBuf,

    /// Allowed extensions, lowercase with leading dot (e.g. ".jpg").
    #[serde(default = "SyncConfig::default_extensions")]
    pub allowed_extensions: Vec<String>,

    /// Seconds each image stays on screen.
    #[serde(default = "SyncConfig::default_display_seconds")]
    pub display_seconds: f64,

    /// Free-form version tag carried in the shared document.
    #[serde(default)]
    pub config_version: Option<String>,
}

impl SyncConfig {
    fn default_extensions() -> Vec<String> {
        [".jpg", ".jpeg", ".png", ".gif", ".bmp"]
            .iter()
            .map(|s| (*s).to_owned())
            .collect()
    }

    const fn default_display_seconds() -> f64 {
        10.0
    }

    /// Load settings from a JSON file on disk (the path may be UNC-style).
    pub fn from_json_file(path: &Path) -> Result<Self, Error> {
        let raw = fs::read_to_string(path)?;
        let cfg: Self = serde_json::from_str(&raw)?;
        info!(
            config = %path.display(),
            version = cfg.config_version.as_deref().unwrap_or("unspecified"),
            "configuration loaded"
        );
        Ok(cfg)
    }

    /// Check required values and normalize the extension list to lowercase
    /// with a leading dot. An empty list falls back to the defaults.
    pub fn validate(&mut self) -> Result<(), Error> {
        if self.remote_dir.as_os_str().is_empty() {
            return Err(Error::BadConfig("remote-dir must not be empty".into()));
        }
        if self.cache_dir.as_os_str().is_empty() {
            return Err(Error::BadConfig("cache-dir must not be empty".into()));
        }
        if !self.display_seconds.is_finite() || self.display_seconds <= 0.0 {
            return Err(Error::BadConfig(format!(
                "display-seconds must be positive, got {}",
                self.display_seconds
            )));
        }
        if self.allowed_extensions.is_empty() {
            self.allowed_extensions = Self::default_extensions();
        }
        for ext in &mut self.allowed_extensions {
            *ext = ext.to_ascii_lowercase();
            if !ext.starts_with('.') {
                ext.insert(0, '.');
            }
        }
        Ok(())
    }
}
