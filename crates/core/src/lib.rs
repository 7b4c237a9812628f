pub mod attendance;
pub mod dashboard;
pub mod overlay;
pub mod roster;
pub mod shared;
