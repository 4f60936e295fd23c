//! Shared Module
//!
//! Types shared by the backend client, the controllers and the UI shell.
//! Everything here is plain data plus the error taxonomy; nothing performs I/O.

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Product listing types
pub mod product;

/// Authentication session types
pub mod session;

/// Re-export commonly used types for convenience
pub use error::StoreError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use product::{Product, ProductDraft, ProductId, ProductRow};
pub use session::{AuthChangeEvent, AuthStateChange, Credentials, Session, User};
