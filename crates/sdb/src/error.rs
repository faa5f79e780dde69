// Copyright 2025 StrongDM Inc
// SPDX-License-Identifier: Apache-2.0

/// Error type returned by an underlying HTTP transport.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// SDB client error type.
///
/// Validation variants embed the field label and the offending literal so a
/// caller can locate the bad entry inside a batch by value rather than by
/// index.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid {field}: {value}")]
    InvalidValue { field: &'static str, value: String },

    #[error("Invalid attribute {part} in update ({name}, {value})")]
    InvalidUpdate {
        part: &'static str,
        name: String,
        value: String,
    },

    #[error("Invalid number of updates: {count} (must be between 1 and 256)")]
    UpdateCount { count: usize },

    #[error("Invalid number of items: {count} (must be between 1 and 25)")]
    ItemCount { count: usize },

    #[error("Invalid precondition for attribute \"{name}\": missing operand")]
    PreconditionMissingOperand { name: String },

    #[error("Invalid precondition for attribute \"{name}\": has two operands")]
    PreconditionTwoOperands { name: String },

    #[error("SignRequest: {0}")]
    Sign(String),

    #[error("SendRequest: {source}")]
    Send { source: TransportError },

    #[error("error from server ({status}): {body}")]
    Server { status: u16, body: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid_value(field: &'static str, value: &str) -> Self {
        Error::InvalidValue {
            field,
            value: value.to_string(),
        }
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Error::InvalidResponse(msg.into())
    }
}
