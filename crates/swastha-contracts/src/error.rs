//! Runtime error types for the SWASTHA crates.
//!
//! Every fallible operation returns `SwasthaResult<T>`. None of these are
//! fatal to a front end: each variant degrades to a user-visible notice.
//! A missing session record is deliberately NOT an error; loaders return
//! `Option` and callers redirect to login.

use thiserror::Error;

/// The unified error type for the SWASTHA runtime.
#[derive(Debug, Error)]
pub enum SwasthaError {
    /// Login was attempted with an empty email or password.
    #[error("login failed: please check your credentials and try again")]
    InvalidCredentials,

    /// The user (or configuration) refused location access.
    #[error("location access denied: {reason}")]
    LocationDenied { reason: String },

    /// No location source is available at all.
    #[error("location services are not supported on this device")]
    LocationUnsupported,

    /// The session record could not be read or written.
    #[error("session storage error: {reason}")]
    StorageError { reason: String },

    /// A configuration or rule file is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },
}

/// Convenience alias used throughout the SWASTHA crates.
pub type SwasthaResult<T> = Result<T, SwasthaError>;
