use chrono::NaiveDate;

use crate::shared::detection::Detection;
use crate::shared::student::{SessionSummary, StudentAttendanceSummary};

use super::image_upload::ImageUpload;
use super::service_error::ServiceError;

/// Domain interface to the recognition and attendance backend.
///
/// Live and canned implementations are interchangeable behind this trait.
/// Calls block until the backend answers or fails.
pub trait AttendanceService: Send + Sync {
    /// Detects and identifies faces in a classroom photo.
    fn recognize(&self, upload: &ImageUpload) -> Result<Vec<Detection>, ServiceError>;

    /// Records the named students as present on `date`.
    fn mark_attendance(&self, date: NaiveDate, names: &[String]) -> Result<(), ServiceError>;

    fn all_students(&self) -> Result<Vec<StudentAttendanceSummary>, ServiceError>;

    fn student(&self, id: &str) -> Result<StudentAttendanceSummary, ServiceError>;

    fn sessions(&self) -> Result<Vec<SessionSummary>, ServiceError>;
}
