use crate::shared::student::StudentAttendanceSummary;

use super::attendance_status::AttendanceStatus;

/// Mean `percentage` over the roster; 0 for an empty roster.
pub fn average_percentage(roster: &[StudentAttendanceSummary]) -> f64 {
    if roster.is_empty() {
        return 0.0;
    }
    roster.iter().map(|s| s.percentage).sum::<f64>() / roster.len() as f64
}

/// Dashboard headline figures for a roster.
#[derive(Clone, Debug, PartialEq)]
pub struct RosterStats {
    pub total_students: usize,
    pub average_percentage: f64,
    pub excellent: usize,
    pub average: usize,
    pub poor: usize,
}

impl RosterStats {
    pub fn from_roster(roster: &[StudentAttendanceSummary]) -> Self {
        let mut stats = Self {
            total_students: roster.len(),
            average_percentage: average_percentage(roster),
            excellent: 0,
            average: 0,
            poor: 0,
        };
        for s in roster {
            match AttendanceStatus::classify(s.percentage) {
                AttendanceStatus::Excellent => stats.excellent += 1,
                AttendanceStatus::Average => stats.average += 1,
                AttendanceStatus::Poor => stats.poor += 1,
            }
        }
        stats
    }

    pub fn count(&self, status: AttendanceStatus) -> usize {
        match status {
            AttendanceStatus::Excellent => self.excellent,
            AttendanceStatus::Average => self.average,
            AttendanceStatus::Poor => self.poor,
        }
    }
}
