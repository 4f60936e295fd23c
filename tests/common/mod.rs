//! Common test utilities and helpers
//!
//! - In-memory `FakeBackend` with failure injection and call counters
//! - Builders for the services the screens depend on

#![allow(dead_code)]

pub mod fake_backend;

pub use fake_backend::*;

use std::sync::Arc;

use storefront::egui_app::backend::RemoteBackend;
use storefront::egui_app::{ProductService, SessionManager};
use storefront::shared::ProductDraft;

pub const EMAIL: &str = "ana@example.com";
pub const PASSWORD: &str = "segredo123";

pub fn services(backend: &Arc<FakeBackend>) -> (SessionManager, ProductService) {
    let remote: Arc<dyn RemoteBackend> = backend.clone();
    (SessionManager::new(remote.clone()), ProductService::new(remote))
}

pub fn draft(description: &str, price: f64) -> ProductDraft {
    ProductDraft {
        description: description.to_string(),
        price,
        image: "https://img.example/new.jpg".to_string(),
    }
}
