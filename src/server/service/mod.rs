//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Numbering, ownership checks and progress computation
//! - **Orchestration**: Coordinating multiple repository calls and external services
//! - **Domain Models**: Working with domain models rather than DTOs or entity models
//! - **Transaction Management**: Running multi-row writes on a single transaction

pub mod achievement;
pub mod course;
pub mod module;
pub mod notification;
pub mod oauth;
pub mod progress;
pub mod storage;
pub mod streak;
pub mod token;
pub mod tree;
pub mod unit;
pub mod user;
