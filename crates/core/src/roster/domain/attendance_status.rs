use std::fmt;

use crate::shared::constants::{AVERAGE_THRESHOLD, EXCELLENT_THRESHOLD};

/// Three-tier attendance status shown as a badge next to each student.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttendanceStatus {
    Excellent,
    Average,
    Poor,
}

impl AttendanceStatus {
    pub const ALL: &[AttendanceStatus] = &[
        AttendanceStatus::Excellent,
        AttendanceStatus::Average,
        AttendanceStatus::Poor,
    ];

    /// Excellent at 75 and above, Average from 50, Poor below.
    ///
    /// Total over `f64`: values above 100 are Excellent, negatives and NaN are Poor.
    pub fn classify(percentage: f64) -> Self {
        if percentage >= EXCELLENT_THRESHOLD {
            AttendanceStatus::Excellent
        } else if percentage >= AVERAGE_THRESHOLD {
            AttendanceStatus::Average
        } else {
            AttendanceStatus::Poor
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttendanceStatus::Excellent => write!(f, "Excellent"),
            AttendanceStatus::Average => write!(f, "Average"),
            AttendanceStatus::Poor => write!(f, "Poor"),
        }
    }
}
