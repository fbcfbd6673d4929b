//! Small helpers shared by controllers and services.

pub mod extract;
pub mod password;
