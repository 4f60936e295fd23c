//! Product listing types
//!
//! `Product` is the row shape of the `product` table. `ProductDraft` is what
//! the product form produces; `ProductRow` is the draft scoped to its owner,
//! ready to be sent to the backend.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Backend-assigned product identifier.
///
/// The table may use a text or an integer primary key; both are held as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Integer(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Integer(number) => Self(number.to_string()),
        })
    }
}

/// A listing owned by exactly one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
    pub user_id: String,
}

impl Product {
    /// Price as shown in the list, e.g. `R$ 2900.00`
    pub fn formatted_price(&self) -> String {
        format!("R$ {:.2}", self.price)
    }
}

/// Validated form input for a create or update
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub description: String,
    pub price: f64,
    pub image: String,
}

impl ProductDraft {
    /// Attach the owning user, producing the payload sent to the backend
    pub fn scoped_to<'a>(&'a self, user_id: &'a str) -> ProductRow<'a> {
        ProductRow {
            description: &self.description,
            price: self.price,
            image: &self.image,
            user_id,
        }
    }
}

/// Insert/update payload for the `product` table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProductRow<'a> {
    pub description: &'a str,
    pub price: f64,
    pub image: &'a str,
    pub user_id: &'a str,
}
