//! Shared Error Types
//!
//! This module defines the error taxonomy surfaced to screen controllers.
//! Every failure that reaches the UI is one of these variants, so a
//! controller can always turn it into a dialog.
//!
//! # Error Categories
//!
//! - `Validation` - Local input failures, caught before any remote call
//! - `Remote` - Failures reported by the hosted backend (network, auth, row policy)
//! - `Unexpected` - Anything not shaped as a backend error
//! - `NoSession` - A user id was required but no session is active
//!
//! # Usage
//!
//! ```rust
//! use storefront::shared::error::StoreError;
//!
//! let error = StoreError::validation("E-mail inválido", "Digite um e-mail válido.");
//! assert!(error.is_validation());
//! ```
use thiserror::Error;

/// Errors surfaced to the screen controllers
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    /// Local validation failure
    #[error("{title}: {message}")]
    Validation {
        /// Dialog title
        title: String,
        /// Human-readable error message
        message: String,
    },

    /// Backend-reported failure
    #[error("{message}")]
    Remote {
        /// Message safe to show to the user
        message: String,
    },

    /// Failure that is not shaped as a backend error
    #[error("unexpected error: {message}")]
    Unexpected {
        /// Human-readable error message
        message: String,
    },

    /// No authenticated session is present
    #[error("no active session")]
    NoSession,
}

impl StoreError {
    /// Create a new validation error
    pub fn validation(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Create a new remote error
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            message: message.into(),
        }
    }

    /// Create a new unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// The message part, without any title
    pub fn message(&self) -> String {
        match self {
            Self::Validation { message, .. }
            | Self::Remote { message }
            | Self::Unexpected { message } => message.clone(),
            Self::NoSession => "Nenhum usuário autenticado.".to_string(),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::unexpected(format!("JSON error: {}", err))
    }
}
