use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use rollcall_core::attendance::infrastructure::retrying_attendance_service::RetryPolicy;
use rollcall_core::attendance::infrastructure::service_factory::{DataSource, ServiceConfig};
use rollcall_core::shared::constants::{
    API_BASE_URL_ENV, DEFAULT_API_BASE_URL, DEFAULT_MAX_ATTEMPTS, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_RETRY_BACKOFF_MS,
};

pub const DEFAULT_DISPLAY_WIDTH: u32 = 800;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize settings: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data_source: DataSource,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub max_attempts: u32,
    pub retry_backoff_ms: u64,
    pub mock_seed: u64,
    pub simulate_latency: bool,
    /// Width the photo is shown at when mapping and annotating boxes.
    pub display_width: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_source: DataSource::Live,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_backoff_ms: DEFAULT_RETRY_BACKOFF_MS,
            mock_seed: 0,
            simulate_latency: false,
            display_width: DEFAULT_DISPLAY_WIDTH,
        }
    }
}

impl Settings {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("Rollcall").join("settings.json"))
    }

    /// Loads the default settings file; missing or malformed files yield defaults.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        Self::load_from(&path).unwrap_or_else(|e| {
            log::warn!("{e}; using default settings");
            Self::default()
        })
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|e| SettingsError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&json).map_err(|e| SettingsError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let io_err = |e| SettingsError::Io {
            path: path.to_path_buf(),
            source: e,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(SettingsError::Serialize)?;
        fs::write(path, json).map_err(io_err)
    }

    /// Applies environment overrides, reading variables through `lookup`.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(API_BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            log::debug!("{API_BASE_URL_ENV} overrides API base URL with {url}");
            self.api_base_url = url.trim().to_string();
        }
        self
    }

    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            data_source: self.data_source,
            api_base_url: self.api_base_url.clone(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            retry: RetryPolicy::new(
                self.max_attempts,
                Duration::from_millis(self.retry_backoff_ms),
            ),
            mock_seed: self.mock_seed,
            simulate_latency: self.simulate_latency,
        }
    }
}
