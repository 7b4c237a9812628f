pub mod attendance_status;
pub mod roster_query;
pub mod roster_stats;
pub mod session_history;
pub mod sort;
