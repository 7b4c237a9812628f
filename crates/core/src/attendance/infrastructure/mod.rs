pub mod http_attendance_service;
pub mod mock_attendance_service;
pub mod retrying_attendance_service;
pub mod service_factory;
