use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// A string column holds a value outside its enumeration.
    ///
    /// Indicates a schema/data mismatch rather than bad input. Results in a 500
    /// Internal Server Error with a generic message returned to client.
    #[error("Invalid value '{value}' in column {column}")]
    InvalidEnumValue {
        /// Column the value was read from
        column: &'static str,
        /// The stored value
        value: String,
    },

    /// Password hashing failed.
    #[error("Failed to hash password: {0}")]
    PasswordHash(String),

    /// JWT signing failed.
    #[error("Failed to encode token: {0}")]
    TokenEncode(#[source] jsonwebtoken::errors::Error),
}
