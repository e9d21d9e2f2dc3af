//! Error types for the webca library.
//!
//! Certificate issuance is all-or-nothing: every fallible operation returns
//! exactly one of the kinds below and performs no internal retry or partial
//! recovery. How a failure is presented to a user (HTTP status, process exit
//! code) is the caller's concern.

use thiserror::Error;

/// The main error type for issuance operations.
#[derive(Error, Debug)]
pub enum WebCaError {
    /// RSA key-pair generation failed (entropy or backend failure).
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    /// Certificate construction or signature computation failed, including
    /// a signing key that does not correspond to the parent certificate.
    #[error("signing failed: {0}")]
    Signing(String),

    /// Subject attributes were rejected before template construction.
    #[error("invalid subject: {0}")]
    Validation(String),
}

/// A specialized Result type for issuance operations.
pub type Result<T> = std::result::Result<T, WebCaError>;
