//! Server-side domain models and parameter types.
//!
//! Domain models are converted from entity models in the service layer and
//! transformed to DTOs at the controller boundary. Enumerated string columns are
//! parsed here; a stored value outside its enumeration is an internal error.

pub mod achievement;
pub mod course;
pub mod notification;
pub mod page;
pub mod progress;
pub mod storage;
pub mod user;

use crate::server::error::internal::InternalError;

/// Parses an enumerated string column.
///
/// # Arguments
/// - `column` - Column name reported on failure
/// - `value` - Stored value
/// - `parse` - The enumeration's parser
///
/// # Returns
/// - `Ok(T)` - Known value
/// - `Err(InternalError::InvalidEnumValue)` - Value outside the enumeration
pub(crate) fn parse_column<T>(
    column: &'static str,
    value: &str,
    parse: fn(&str) -> Option<T>,
) -> Result<T, InternalError> {
    parse(value).ok_or_else(|| InternalError::InvalidEnumValue {
        column,
        value: value.to_string(),
    })
}
