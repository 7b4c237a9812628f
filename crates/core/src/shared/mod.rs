pub mod constants;
pub mod detection;
pub mod photo;
pub mod student;
