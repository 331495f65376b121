//! Error taxonomy shared by key validation and the transform dispatch.

use thiserror::Error;

/// Errors produced by the cipher engine.
///
/// Validation is eager: a bad key fails before any transformation starts
/// and no partial output is ever produced. Every call is independent, so
/// a failed invocation has no effect on later ones.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CipherError {
    /// Key fails type, format, range or invertibility checks.
    #[error("invalid key: {0}")]
    InvalidKey(String),
    /// Input text lacks usable alphabetic content where at least one
    /// letter is required.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Cipher/mode combination with no implemented transform.
    #[error("unsupported operation: {0}")]
    Unsupported(String),
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, CipherError>;
