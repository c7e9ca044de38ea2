//! # Session Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Session Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │      Cart       │  │  Configuration  │  │       Runtime           │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Core(...)      │  │  InvalidConfig  │  │  NoRuntime              │ │
//! │  │  (not found,    │  │  ConfigParse    │  │  Io                     │ │
//! │  │   gift locked)  │  │  ConfigSave...  │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use giftcart_core::{CartError, CoreError};
use thiserror::Error;

/// Result type alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    // =========================================================================
    // Cart Errors
    // =========================================================================
    /// Error from the cart engine or catalog.
    #[error(transparent)]
    Core(#[from] CoreError),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration values are inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The config file is not valid TOML for this schema.
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Failed to write the config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Runtime Errors
    // =========================================================================
    /// A session was created outside a tokio runtime.
    #[error("CartSession must be created inside a tokio runtime")]
    NoRuntime,

    /// File system error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<CartError> for SessionError {
    fn from(err: CartError) -> Self {
        SessionError::Core(err.into())
    }
}

impl From<toml::ser::Error> for SessionError {
    fn from(err: toml::ser::Error) -> Self {
        SessionError::ConfigSaveFailed(err.to_string())
    }
}

impl SessionError {
    /// True for the "tried to touch the gift line" protocol violation.
    pub fn is_gift_locked(&self) -> bool {
        matches!(
            self,
            SessionError::Core(CoreError::Cart(CartError::GiftLineLocked { .. }))
        )
    }
}
