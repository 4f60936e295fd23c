//! Theme Module
//!
//! Color constants plus the frame and button builders the views share.
//!
//! # Usage
//!
//! ```rust,ignore
//! use storefront::egui_app::theme::{colors, styles};
//!
//! styles::apply_global_theme(ctx);
//! styles::card_frame().show(ui, |ui| {
//!     ui.colored_label(colors::TEXT_PRIMARY, "...");
//! });
//! ```

pub mod colors;
pub mod styles;

pub use colors::*;
pub use styles::*;
