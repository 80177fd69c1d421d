//! # Error Types
//!
//! Error types shared by the formcast crates. All errors use `thiserror`
//! for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Temporal parse failures carry a machine-readable reason whose
//!   `Display` form is embedded verbatim in field error messages
//!   (`expected datetime (missing_offset)`).
//! - Field-level normalization failures are not errors in this sense;
//!   they are data, collected in `formcast_schema::ErrorRecord`.

use thiserror::Error;

/// Top-level error type for the core crate.
#[derive(Error, Debug)]
pub enum FormcastError {
    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Reason an ISO-8601 date or datetime could not be parsed.
///
/// The `Display` output is the snake_case reason name and is part of the
/// user-visible error message format.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemporalError {
    /// The text does not have the shape of an ISO-8601 date/datetime.
    #[error("invalid_format")]
    InvalidFormat,

    /// The shape is right but the calendar date does not exist.
    #[error("invalid_date")]
    InvalidDate,

    /// The shape is right but the time of day does not exist.
    #[error("invalid_time")]
    InvalidTime,

    /// A datetime without a UTC offset or `Z` designator.
    #[error("missing_offset")]
    MissingOffset,
}

impl TemporalError {
    /// The snake_case reason name.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::InvalidFormat => "invalid_format",
            Self::InvalidDate => "invalid_date",
            Self::InvalidTime => "invalid_time",
            Self::MissingOffset => "missing_offset",
        }
    }
}
