use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;

use crate::attendance::domain::attendance_service::AttendanceService;
use crate::attendance::domain::in_flight::InFlight;
use crate::attendance::domain::notifier::Notifier;
use crate::attendance::domain::service_error::ServiceError;
use crate::dashboard::recognition_session::RecognitionSession;
use crate::shared::student::StudentAttendanceSummary;

#[derive(Error, Debug)]
pub enum MarkAttendanceError {
    #[error("no faces recognized; recognize an image before marking attendance")]
    EmptyRecognition,
    #[error("a mark-attendance request is already in progress")]
    Busy,
    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Result of a successful mark.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkAttendanceReport {
    pub date: NaiveDate,
    pub marked: Vec<String>,
    /// Roster re-fetched after marking; `None` if that fetch failed, in which
    /// case an error notification has already been sent.
    pub roster: Option<Vec<StudentAttendanceSummary>>,
}

/// Marks everyone in the recognition session present on a date.
pub struct MarkAttendanceUseCase {
    service: Arc<dyn AttendanceService>,
    notifier: Arc<dyn Notifier>,
    in_flight: InFlight,
}

impl MarkAttendanceUseCase {
    pub fn new(service: Arc<dyn AttendanceService>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            service,
            notifier,
            in_flight: InFlight::new(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_busy()
    }

    /// Submits the session's names for `date`.
    ///
    /// An empty session is rejected before any request is made. On success
    /// the session is cleared and the roster is re-fetched; on failure the
    /// session is left as it was so the operator can retry.
    pub fn execute(
        &self,
        date: NaiveDate,
        session: &mut RecognitionSession,
    ) -> Result<MarkAttendanceReport, MarkAttendanceError> {
        let report = self.submit(date, session.names())?;
        session.clear();
        Ok(report)
    }

    /// Submits names typed by the operator instead of recognized ones.
    ///
    /// Names are trimmed; blanks and repeats are dropped.
    pub fn execute_names(
        &self,
        date: NaiveDate,
        names: &[String],
    ) -> Result<MarkAttendanceReport, MarkAttendanceError> {
        let mut unique: Vec<String> = Vec::with_capacity(names.len());
        for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
            if !unique.iter().any(|u| u == name) {
                unique.push(name.to_string());
            }
        }
        self.submit(date, unique)
    }

    fn submit(
        &self,
        date: NaiveDate,
        names: Vec<String>,
    ) -> Result<MarkAttendanceReport, MarkAttendanceError> {
        if names.is_empty() {
            self.notifier
                .error("No faces recognized. Please upload and recognize an image first.");
            return Err(MarkAttendanceError::EmptyRecognition);
        }

        let Some(_token) = self.in_flight.try_begin() else {
            log::warn!("Attendance marking already in progress, ignoring request for {date}");
            return Err(MarkAttendanceError::Busy);
        };

        if let Err(e) = self.service.mark_attendance(date, &names) {
            log::error!("Failed to mark attendance: {e}");
            self.notifier
                .error("Failed to mark attendance. Please try again.");
            return Err(e.into());
        }

        self.notifier
            .success(&format!("Attendance marked for {} student(s)", names.len()));

        let roster = match self.service.all_students() {
            Ok(roster) => Some(roster),
            Err(e) => {
                log::error!("Attendance marked but roster refresh failed: {e}");
                self.notifier
                    .error("Failed to refresh attendance. Please reload the roster.");
                None
            }
        };

        Ok(MarkAttendanceReport {
            date,
            marked: names,
            roster,
        })
    }
}
