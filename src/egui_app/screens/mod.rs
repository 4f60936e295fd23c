//! Screen Controllers
//!
//! One controller per screen. Each keeps its own transient view state and
//! splits every action into a synchronous `submit` (validate, mark in
//! flight, build the request) and a `finish` that applies the result. The
//! remote call in between runs wherever the caller wants: awaited inline by
//! the async convenience methods, or on the UI worker runtime.

pub mod login;
pub mod product_form;
pub mod product_list;
pub mod signup;

pub use login::LoginController;
pub use product_form::{FormOutcome, ProductFormController, SaveRequest};
pub use product_list::{FetchTicket, ProductListController};
pub use signup::SignUpController;

use crate::shared::StoreError;

pub const TITLE_UNEXPECTED: &str = "Erro inesperado";
pub const TITLE_ERROR: &str = "Erro";

/// Blocking message shown over the current screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub title: String,
    pub message: String,
}

impl Dialog {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Dialog for a failed action; `remote_title` heads backend-reported failures
    pub fn for_error(error: &StoreError, remote_title: &str) -> Self {
        match error {
            StoreError::Validation { title, message } => Self::new(title.clone(), message.clone()),
            StoreError::Remote { message } => Self::new(remote_title, message.clone()),
            StoreError::Unexpected { message } => Self::new(TITLE_UNEXPECTED, message.clone()),
            StoreError::NoSession => Self::new(TITLE_ERROR, error.message()),
        }
    }
}
