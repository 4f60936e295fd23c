//! Color Constants
//!
//! A light scheme with a single blue accent.

use eframe::egui::Color32;

/// Primary accent - Blue
pub const ACCENT: Color32 = Color32::from_rgb(0x4E, 0x73, 0xDF);

/// Screen background - Off-white
pub const BG_LIGHT: Color32 = Color32::from_rgb(0xF8, 0xF9, 0xFC);

/// Cards, inputs and dialogs
pub const SURFACE: Color32 = Color32::from_rgb(0xFF, 0xFF, 0xFF);

/// Top bar background
pub const TOP_BAR_BG: Color32 = ACCENT;

/// Text on the accent color
pub const TEXT_LIGHT: Color32 = Color32::from_rgb(0xFF, 0xFF, 0xFF);

/// Headings and body text
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(0x34, 0x3A, 0x40);

/// Input text
pub const TEXT_DARK: Color32 = Color32::from_rgb(0x21, 0x25, 0x29);

/// Secondary text color (muted)
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0x6C, 0x75, 0x7D);

/// Placeholders and borders
pub const BORDER: Color32 = Color32::from_rgb(0xAA, 0xAA, 0xAA);

/// Destructive actions
pub const DANGER: Color32 = Color32::from_rgb(0xDC, 0x35, 0x45);
