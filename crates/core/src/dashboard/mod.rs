pub mod mark_attendance_use_case;
pub mod recognition_session;
pub mod recognize_faces_use_case;
pub mod roster_report_use_case;
