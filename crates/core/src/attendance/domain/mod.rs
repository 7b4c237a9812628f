pub mod attendance_service;
pub mod image_upload;
pub mod in_flight;
pub mod notifier;
pub mod service_error;
