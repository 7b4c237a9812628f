use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Per-student attendance totals as served by `/attendance/*`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StudentAttendanceSummary {
    pub id: String,
    pub name: String,
    pub roll_no: String,
    pub present: u32,
    pub total: u32,
    pub percentage: f64,
}

/// Tolerance when comparing a backend-supplied percentage to the recomputed one.
const PERCENTAGE_TOLERANCE: f64 = 0.05;

impl StudentAttendanceSummary {
    /// `100 * present / total`, with `present` capped at `total` and 0 for no classes.
    pub fn computed_percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.present.min(self.total) as f64 / self.total as f64 * 100.0
    }

    /// Replaces `percentage` with the value derived from `present/total`.
    pub fn with_recomputed_percentage(mut self) -> Self {
        let computed = self.computed_percentage();
        if (computed - self.percentage).abs() > PERCENTAGE_TOLERANCE || !self.percentage.is_finite()
        {
            log::debug!(
                "Student {} reported {}% but {}/{} gives {:.1}%",
                self.id,
                self.percentage,
                self.present,
                self.total,
                computed
            );
        }
        if self.present > self.total {
            log::warn!(
                "Student {} has present={} greater than total={}",
                self.id,
                self.present,
                self.total
            );
        }
        self.percentage = computed;
        self
    }

    pub fn absent(&self) -> u32 {
        self.total.saturating_sub(self.present)
    }

    /// Share of classes attended, as a percentage of `total` (0 when `total` is 0).
    pub fn present_share(&self) -> f64 {
        self.computed_percentage()
    }

    pub fn absent_share(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.absent() as f64 / self.total as f64 * 100.0
    }
}

/// One attendance-taking date and how many students were present.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: String,
    pub date: NaiveDate,
    pub attendance_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn summary(present: u32, total: u32, percentage: f64) -> StudentAttendanceSummary {
        StudentAttendanceSummary {
            id: "student-1".to_string(),
            name: "Lohit Kumar".to_string(),
            roll_no: "CS001".to_string(),
            present,
            total,
            percentage,
        }
    }

    #[rstest]
    #[case::typical(24, 30, 80.0)]
    #[case::perfect(30, 30, 100.0)]
    #[case::none_present(0, 30, 0.0)]
    #[case::no_classes(0, 0, 0.0)]
    #[case::present_exceeds_total(35, 30, 100.0)]
    fn test_computed_percentage(#[case] present: u32, #[case] total: u32, #[case] expected: f64) {
        assert_relative_eq!(summary(present, total, 0.0).computed_percentage(), expected);
    }

    #[test]
    fn test_recompute_overrides_backend_value() {
        let s = summary(24, 30, 55.5).with_recomputed_percentage();
        assert_relative_eq!(s.percentage, 80.0);
    }

    #[test]
    fn test_recompute_replaces_nan() {
        let s = summary(15, 30, f64::NAN).with_recomputed_percentage();
        assert_relative_eq!(s.percentage, 50.0);
    }

    #[test]
    fn test_absent_and_shares() {
        let s = summary(24, 30, 80.0);
        assert_eq!(s.absent(), 6);
        assert_relative_eq!(s.present_share(), 80.0);
        assert_relative_eq!(s.absent_share(), 20.0);
    }

    #[test]
    fn test_shares_are_zero_without_classes() {
        let s = summary(0, 0, 0.0);
        assert_eq!(s.absent(), 0);
        assert_relative_eq!(s.present_share(), 0.0);
        assert_relative_eq!(s.absent_share(), 0.0);
    }

    #[test]
    fn test_absent_saturates() {
        assert_eq!(summary(40, 30, 100.0).absent(), 0);
    }

    #[test]
    fn test_summary_wire_format() {
        let json = r#"{"id":"s1","name":"Priya Singh","roll_no":"CS003","present":12,"total":20,"percentage":60.0}"#;
        let s: StudentAttendanceSummary = serde_json::from_str(json).unwrap();
        assert_eq!(s.roll_no, "CS003");
        assert_eq!(s.present, 12);
    }

    #[test]
    fn test_session_wire_format() {
        let json = r#"{"id":"x","date":"2024-09-02","attendance_count":4}"#;
        let s: SessionSummary = serde_json::from_str(json).unwrap();
        assert_eq!(s.date, NaiveDate::from_ymd_opt(2024, 9, 2).unwrap());
        assert_eq!(s.attendance_count, 4);
    }
}
