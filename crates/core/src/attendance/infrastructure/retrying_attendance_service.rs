use std::thread;
use std::time::Duration;

use chrono::NaiveDate;

use crate::attendance::domain::attendance_service::AttendanceService;
use crate::attendance::domain::image_upload::ImageUpload;
use crate::attendance::domain::service_error::ServiceError;
use crate::shared::constants::{DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_BACKOFF_MS};
use crate::shared::detection::Detection;
use crate::shared::student::{SessionSummary, StudentAttendanceSummary};

/// How many times to try a call and how long to wait between tries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, initial_backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_backoff,
        }
    }

    /// Single attempt, no retries.
    pub fn none() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Delay before attempt `attempt + 1`, doubling each time (attempt is 1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u32 << attempt.saturating_sub(1).min(16);
        self.initial_backoff.saturating_mul(factor)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_MAX_ATTEMPTS,
            Duration::from_millis(DEFAULT_RETRY_BACKOFF_MS),
        )
    }
}

/// Decorator that retries transient failures of the wrapped service.
///
/// Only errors reporting [`ServiceError::is_retryable`] are retried, with
/// exponential backoff between attempts. Client errors (4xx) and decoding
/// errors surface immediately.
pub struct RetryingAttendanceService {
    inner: Box<dyn AttendanceService>,
    policy: RetryPolicy,
}

impl RetryingAttendanceService {
    pub fn new(inner: Box<dyn AttendanceService>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    fn with_retry<T>(
        &self,
        mut call: impl FnMut(&dyn AttendanceService) -> Result<T, ServiceError>,
    ) -> Result<T, ServiceError> {
        let mut attempt = 1;
        loop {
            match call(self.inner.as_ref()) {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt < self.policy.max_attempts => {
                    let delay = self.policy.backoff(attempt);
                    log::warn!(
                        "Attempt {attempt}/{} failed: {err}; retrying in {}ms",
                        self.policy.max_attempts,
                        delay.as_millis()
                    );
                    thread::sleep(delay);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

impl AttendanceService for RetryingAttendanceService {
    fn recognize(&self, upload: &ImageUpload) -> Result<Vec<Detection>, ServiceError> {
        self.with_retry(|svc| svc.recognize(upload))
    }

    fn mark_attendance(&self, date: NaiveDate, names: &[String]) -> Result<(), ServiceError> {
        self.with_retry(|svc| svc.mark_attendance(date, names))
    }

    fn all_students(&self) -> Result<Vec<StudentAttendanceSummary>, ServiceError> {
        self.with_retry(|svc| svc.all_students())
    }

    fn student(&self, id: &str) -> Result<StudentAttendanceSummary, ServiceError> {
        self.with_retry(|svc| svc.student(id))
    }

    fn sessions(&self) -> Result<Vec<SessionSummary>, ServiceError> {
        self.with_retry(|svc| svc.sessions())
    }
}
