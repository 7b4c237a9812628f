use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::http_attendance_service::HttpAttendanceService;
use super::mock_attendance_service::{MockAttendanceService, MockLatency};
use super::retrying_attendance_service::{RetryPolicy, RetryingAttendanceService};
use crate::attendance::domain::attendance_service::AttendanceService;
use crate::attendance::domain::service_error::ServiceError;
use crate::shared::constants::{DEFAULT_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS};

/// Where attendance data comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    #[default]
    Live,
    Mock,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Live => write!(f, "live"),
            DataSource::Mock => write!(f, "mock"),
        }
    }
}

impl FromStr for DataSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(DataSource::Live),
            "mock" => Ok(DataSource::Mock),
            other => Err(format!("unknown data source '{other}' (expected live or mock)")),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ServiceConfig {
    pub data_source: DataSource,
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub retry: RetryPolicy,
    pub mock_seed: u64,
    pub simulate_latency: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_source: DataSource::default(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            retry: RetryPolicy::default(),
            mock_seed: 0,
            simulate_latency: false,
        }
    }
}

/// Builds the attendance backend selected by `config`.
///
/// Live backends are wrapped in [`RetryingAttendanceService`]. Fails only
/// when the live base URL is unusable.
pub fn create_service(config: &ServiceConfig) -> Result<Arc<dyn AttendanceService>, ServiceError> {
    match config.data_source {
        DataSource::Live => {
            let http = HttpAttendanceService::new(&config.api_base_url, config.request_timeout)?;
            log::info!(
                "Using live attendance backend at {} (timeout={}s, attempts={})",
                http.base_url(),
                config.request_timeout.as_secs(),
                config.retry.max_attempts
            );
            Ok(Arc::new(RetryingAttendanceService::new(
                Box::new(http),
                config.retry,
            )))
        }
        DataSource::Mock => {
            let latency = if config.simulate_latency {
                MockLatency::realistic()
            } else {
                MockLatency::none()
            };
            log::info!(
                "Using mock attendance backend (seed={}, latency={})",
                config.mock_seed,
                config.simulate_latency
            );
            Ok(Arc::new(MockAttendanceService::new(config.mock_seed, latency)))
        }
    }
}
