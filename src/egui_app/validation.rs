//! Input validation for the auth and product forms.
//!
//! Every rule fails with a `StoreError::Validation` carrying the dialog
//! title and message, so no remote call is made for bad input.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::shared::StoreError;

pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));
static PRICE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(?:[.,]\d+)?$").expect("price pattern is valid"));

pub fn validate_email(email: &str) -> Result<(), StoreError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(StoreError::validation("E-mail inválido", "Digite um e-mail válido."))
    }
}

pub fn validate_password(password: &str) -> Result<(), StoreError> {
    if password.chars().count() >= MIN_PASSWORD_LEN {
        Ok(())
    } else {
        Err(StoreError::validation(
            "Senha inválida",
            "A senha deve ter no mínimo 6 caracteres.",
        ))
    }
}

pub fn validate_password_confirmation(password: &str, confirmation: &str) -> Result<(), StoreError> {
    if password == confirmation {
        Ok(())
    } else {
        Err(StoreError::validation("Senhas diferentes", "As senhas não coincidem."))
    }
}

/// Fails unless every field has non-whitespace content
pub fn require_filled(fields: &[&str], message: &str) -> Result<(), StoreError> {
    if fields.iter().all(|field| !field.trim().is_empty()) {
        Ok(())
    } else {
        Err(StoreError::validation("Campos obrigatórios", message))
    }
}

/// Parse a positive price; `,` and `.` are both accepted as decimal separator
pub fn parse_price(input: &str) -> Result<f64, StoreError> {
    let invalid = || StoreError::validation("Preço inválido", "Digite um preço válido maior que zero.");

    let trimmed = input.trim();
    if !PRICE_RE.is_match(trimmed) {
        return Err(invalid());
    }
    let price: f64 = trimmed.replacen(',', ".", 1).parse().map_err(|_| invalid())?;
    if price.is_finite() && price > 0.0 {
        Ok(price)
    } else {
        Err(invalid())
    }
}
