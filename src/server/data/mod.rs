//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations (CRUD) for each
//! aggregate in the application. Repositories return SeaORM entity models; services convert
//! them into domain models. Every repository is generic over `ConnectionTrait` so the same
//! code runs against a pooled connection or inside a transaction.

pub mod achievement;
pub mod course;
pub mod module;
pub mod notification;
pub mod progress;
pub mod section;
pub mod unit;
pub mod user;

#[cfg(test)]
mod test;
