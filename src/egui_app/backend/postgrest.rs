//! Minimal PostgREST query description.
//!
//! Only what the product table needs: column selection and equality filters.

use std::fmt::Display;

/// REST prefix for table endpoints
pub const REST_PATH: &str = "/rest/v1";

/// A table request: `GET|POST|PATCH|DELETE /rest/v1/<table>?<params>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableQuery {
    table: String,
    select: Option<String>,
    filters: Vec<(String, String)>,
}

impl TableQuery {
    pub fn from(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            select: None,
            filters: Vec::new(),
        }
    }

    /// Columns to return, e.g. `*`
    pub fn select(mut self, columns: impl Into<String>) -> Self {
        self.select = Some(columns.into());
        self
    }

    /// Add an `column=eq.value` filter
    pub fn eq(mut self, column: impl Into<String>, value: impl Display) -> Self {
        self.filters.push((column.into(), format!("eq.{}", value)));
        self
    }

    pub fn path(&self) -> String {
        format!("{}/{}", REST_PATH, self.table)
    }

    /// Query-string pairs, `select` first. Values are not yet URL-encoded.
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(self.filters.len() + 1);
        if let Some(ref columns) = self.select {
            params.push(("select".to_string(), columns.clone()));
        }
        params.extend(self.filters.iter().cloned());
        params
    }
}
