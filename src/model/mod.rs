//! API data transfer objects.
//!
//! Request and response bodies exchanged over HTTP, plus the uniform response
//! envelope. Field names serialize in camelCase; enumerations serialize as the
//! snake_case strings stored in the database.

pub mod achievement;
pub mod api;
pub mod course;
pub mod notification;
pub mod progress;
pub mod storage;
pub mod user;
