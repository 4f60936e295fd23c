//! egui Native Desktop App Module
//!
//! A small storefront: sign in against a hosted backend, then manage your own
//! product listings.
//!
//! # Architecture
//!
//! - **`backend`** - Remote backend trait, HTTP client and session storage
//! - **`session`** - Session Manager over the backend's auth operations
//! - **`navigation`** - Navigation Gate deciding which screens are reachable
//! - **`products`** - Product access scoped to the signed-in user
//! - **`screens`** - Per-screen controllers (validation, in-flight state, dialogs)
//! - **`validation`** - Input rules shared by the screens
//! - **`worker`** - tokio runtime that runs remote calls off the UI thread
//! - **`state`** - `AppState` wiring everything for the views
//! - **`views`**, **`theme`** - egui rendering
//! - **`config`** - Layered configuration loading
//!
//! # Example
//!
//! ```rust,no_run
//! // Run the app:
//! // cargo run --bin storefront_app
//! ```

pub mod backend;
pub mod config;
pub mod navigation;
pub mod products;
pub mod screens;
pub mod session;
pub mod state;
pub mod theme;
pub mod types;
pub mod validation;
pub mod views;
pub mod worker;

// Re-export commonly used types
pub use config::Config;
pub use navigation::{NavigationError, NavigationGate};
pub use products::ProductService;
pub use session::SessionManager;
pub use state::AppState;
pub use types::{GateState, Screen, ScreenKind};
pub use worker::{UiEvent, Worker};
