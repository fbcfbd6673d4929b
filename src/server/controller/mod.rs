//! HTTP request handlers.
//!
//! Controllers extract and validate input, check permissions through `AuthGuard`,
//! convert DTOs into service parameters and wrap results in the response envelope.

pub mod achievement;
pub mod course;
pub mod health;
pub mod module;
pub mod notification;
pub mod oauth;
pub mod storage;
pub mod unit;
pub mod user;
