//! Settings for a sync run.
//!
//! Values come from (highest priority first) CLI flags, environment
//! variables, an optional TOML file, and the defaults below. The binary does
//! the layering; this module owns the file format and validation.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{IconSyncError, Result};

pub const DEFAULT_API_URL: &str = "https://api.figma.com/v1";
pub const DEFAULT_INDEX_FILE_NAME: &str = "index.jsx";

/// Frame values that mean "take the page's direct children".
const NO_FRAME_SENTINEL: &str = "-1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Config {
    pub access_token: String,
    pub file_id: String,
    pub page: String,
    pub frame: Option<String>,
    pub export_path: PathBuf,
    pub remove_from_name: Option<String>,
    pub index_file: Option<PathBuf>,
    pub normalize: bool,
    pub api_url: String,
    pub timeouts: Timeouts,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    #[serde(with = "humantime_serde")]
    pub connect: Duration,
    #[serde(with = "humantime_serde")]
    pub request: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(10),
            request: Duration::from_secs(60),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            file_id: String::new(),
            page: String::new(),
            frame: None,
            export_path: PathBuf::new(),
            remove_from_name: None,
            index_file: None,
            normalize: true,
            api_url: DEFAULT_API_URL.to_string(),
            timeouts: Timeouts::default(),
        }
    }
}

impl Config {
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| IconSyncError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        let required = [
            ("access token (FIGMA_ACCESS_TOKEN)", self.access_token.as_str()),
            ("file id (FIGMA_FILE_ID)", self.file_id.as_str()),
            ("page (FIGMA_PAGE)", self.page.as_str()),
        ];
        for (label, value) in required {
            if value.trim().is_empty() {
                return Err(IconSyncError::Config(format!("missing {label}")));
            }
        }
        if self.export_path.as_os_str().is_empty() {
            return Err(IconSyncError::Config(
                "missing export path (EXPORT_PATH)".to_string(),
            ));
        }
        Url::parse(&self.api_url)?;
        if self.timeouts.connect.is_zero() || self.timeouts.request.is_zero() {
            return Err(IconSyncError::Config(
                "timeouts must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Frame path segments, or `None` when the icons live directly on the page.
    ///
    /// Empty segments are dropped, so `"Icons//Regular/"` is `["Icons", "Regular"]`.
    pub fn frame_segments(&self) -> Option<Vec<String>> {
        let raw = self.frame.as_deref()?.trim();
        if raw.is_empty() || raw == NO_FRAME_SENTINEL {
            return None;
        }
        let segments: Vec<String> = raw
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if segments.is_empty() {
            None
        } else {
            Some(segments)
        }
    }

    pub fn index_path(&self) -> PathBuf {
        self.index_file
            .clone()
            .unwrap_or_else(|| self.export_path.join(DEFAULT_INDEX_FILE_NAME))
    }

    /// Strips the first occurrence of `remove_from_name` from an icon name.
    pub fn clean_name(&self, name: &str) -> String {
        match self.remove_from_name.as_deref() {
            Some(needle) if !needle.is_empty() => name.replacen(needle, "", 1),
            _ => name.to_string(),
        }
    }
}
