//! Storefront - Main Library
//!
//! A desktop storefront built with egui: users sign up or sign in against a
//! hosted auth service and manage their own product listings (description,
//! price, image URL) stored in a hosted table.
//!
//! # Module Structure
//!
//! - **`shared`** - Plain data types and errors
//!   - Products, drafts and the row shape sent to the backend
//!   - Sessions, credentials and auth change notifications
//!   - Configuration with a validating builder
//!
//! - **`egui_app`** - Native desktop app (egui/eframe)
//!   - Backend client and session persistence
//!   - Session Manager and Navigation Gate
//!   - Product access scoped to the signed-in user
//!   - Screen controllers and views
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use storefront::egui_app::backend::SupabaseClient;
//! use storefront::egui_app::{AppState, Config, Worker};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load()?;
//! let backend = Arc::new(SupabaseClient::from_config(config.app())?);
//! let state = AppState::new(config, backend, Worker::new()?);
//! state.start();
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! - **Backend client**: `Send + Sync`; the session sits behind a tokio `Mutex`
//! - **UI**: egui is single-threaded immediate mode; remote calls run on the
//!   worker runtime and report back over a channel
//!
//! # Error Handling
//!
//! - `BackendError` for transport, API and storage failures
//! - `StoreError` for everything a screen can show the user
//! - `ConfigError` for configuration loading

/// Shared types and data structures
pub mod shared;

/// egui native desktop app
pub mod egui_app;
