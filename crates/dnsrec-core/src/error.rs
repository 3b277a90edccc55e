//! Error types for dnsrec
//!
//! Every failure is returned to the caller as soon as it happens. Nothing in
//! the library retries, and bulk operations leave already-applied mutations
//! in place when they stop on an error.

use thiserror::Error;

/// Result type alias for dnsrec operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// The HTTP call itself failed (connect, TLS, timeout, body read)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The provider answered with an HTTP status other than 200
    #[error("Unexpected status code: {status}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body, kept for diagnostics
        body: String,
    },

    /// The response body could not be decoded
    ///
    /// The raw body is preserved because providers sometimes answer with an
    /// HTML error page instead of JSON.
    #[error("Malformed response ({detail}): {body}")]
    Decode {
        /// Decoder message
        detail: String,
        /// Raw response body
        body: String,
    },

    /// The provider returned a well-formed envelope with a failure status
    #[error("Rejected by provider: {0}")]
    VendorRejected(String),

    /// Record not found
    #[error("Record not found: {0}")]
    NotFound(String),

    /// The caller cancelled the operation
    #[error("Operation cancelled")]
    Cancelled,

    /// The caller's deadline passed before the operation finished
    #[error("Deadline exceeded")]
    DeadlineExceeded,

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create an unexpected status error
    pub fn unexpected_status(status: u16, body: impl Into<String>) -> Self {
        Self::UnexpectedStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error carrying the raw body
    pub fn decode(detail: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Decode {
            detail: detail.into(),
            body: body.into(),
        }
    }

    /// Create a provider rejection error
    pub fn vendor_rejected(msg: impl Into<String>) -> Self {
        Self::VendorRejected(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// True for [`Error::NotFound`]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// True when the caller's context stopped the operation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded)
    }
}
