//! Error types for the lorem generator core.

use thiserror::Error;

/// Errors raised by the random stream and text generator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoremError {
    /// `next_int` was asked for a range whose upper bound is below its lower bound.
    #[error("invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: i64, max: i64 },

    /// An element was requested from an empty slice.
    #[error("cannot pick an element from an empty collection")]
    EmptyCollection,

    /// Generation settings failed validation.
    #[error("invalid generation config: {message}")]
    InvalidConfig { message: String },
}

pub type Result<T> = std::result::Result<T, LoremError>;
