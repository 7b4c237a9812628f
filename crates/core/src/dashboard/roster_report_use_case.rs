use std::sync::Arc;

use crate::attendance::domain::attendance_service::AttendanceService;
use crate::attendance::domain::notifier::Notifier;
use crate::attendance::domain::service_error::ServiceError;
use crate::roster::domain::attendance_status::AttendanceStatus;
use crate::roster::domain::roster_query::filter_and_sort;
use crate::roster::domain::roster_stats::RosterStats;
use crate::roster::domain::session_history::newest_first;
use crate::roster::domain::sort::SortState;
use crate::shared::student::{SessionSummary, StudentAttendanceSummary};

#[derive(Clone, Debug, PartialEq)]
pub struct RosterRow {
    pub student: StudentAttendanceSummary,
    pub status: AttendanceStatus,
}

/// Filtered, sorted table rows plus headline figures for the whole roster.
#[derive(Clone, Debug, PartialEq)]
pub struct RosterOverview {
    pub rows: Vec<RosterRow>,
    pub stats: RosterStats,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StudentReport {
    pub summary: StudentAttendanceSummary,
    pub status: AttendanceStatus,
    pub absent: u32,
    pub present_share: f64,
    pub absent_share: f64,
}

impl StudentReport {
    pub fn from_summary(summary: StudentAttendanceSummary) -> Self {
        Self {
            status: AttendanceStatus::classify(summary.percentage),
            absent: summary.absent(),
            present_share: summary.present_share(),
            absent_share: summary.absent_share(),
            summary,
        }
    }
}

/// Read-only report views: roster overview, single student, session history.
pub struct RosterReportUseCase {
    service: Arc<dyn AttendanceService>,
    notifier: Arc<dyn Notifier>,
}

impl RosterReportUseCase {
    pub fn new(service: Arc<dyn AttendanceService>, notifier: Arc<dyn Notifier>) -> Self {
        Self { service, notifier }
    }

    /// Fetches the roster, then filters and sorts it for display.
    ///
    /// `stats` covers every student regardless of `query`.
    pub fn overview(&self, query: &str, sort: SortState) -> Result<RosterOverview, ServiceError> {
        let roster = self
            .service
            .all_students()
            .map_err(|e| self.report_failure("students", e))?;

        let rows = filter_and_sort(&roster, query, sort.key, sort.order)
            .into_iter()
            .map(|student| RosterRow {
                status: AttendanceStatus::classify(student.percentage),
                student,
            })
            .collect();

        Ok(RosterOverview {
            rows,
            stats: RosterStats::from_roster(&roster),
        })
    }

    pub fn student_report(&self, id: &str) -> Result<StudentReport, ServiceError> {
        self.service
            .student(id)
            .map(StudentReport::from_summary)
            .map_err(|e| self.report_failure("student", e))
    }

    /// Attendance sessions, newest first.
    pub fn sessions(&self) -> Result<Vec<SessionSummary>, ServiceError> {
        self.service
            .sessions()
            .map(|sessions| newest_first(&sessions))
            .map_err(|e| self.report_failure("sessions", e))
    }

    fn report_failure(&self, what: &str, e: ServiceError) -> ServiceError {
        log::error!("Failed to load {what}: {e}");
        self.notifier
            .error(&format!("Failed to load {what}. Please try again."));
        e
    }
}
