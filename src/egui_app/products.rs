//! Product Access Layer
//!
//! Turns product operations into user-scoped calls on the `product` table.
//! Each call takes the owner explicitly; nothing here looks up the session.
//! Failures come back as a `ProductError` with a message fit for a dialog;
//! the underlying cause only goes to the log.

use std::sync::Arc;

use thiserror::Error;

use crate::egui_app::backend::RemoteBackend;
use crate::shared::{Product, ProductDraft, ProductId, StoreError};

pub const LIST_FAILED: &str = "Ocorreu um erro ao buscar os produtos";
pub const CREATE_FAILED: &str = "Ocorreu um erro ao cadastrar o produto";
pub const UPDATE_FAILED: &str = "Ocorreu um erro ao editar o produto";
pub const DELETE_FAILED: &str = "Ocorreu um erro ao deletar o produto";

/// Normalized product operation failure
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ProductError {
    pub message: String,
}

impl ProductError {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

impl From<ProductError> for StoreError {
    fn from(err: ProductError) -> Self {
        StoreError::remote(err.message)
    }
}

pub type ProductResult<T> = Result<T, ProductError>;

#[derive(Clone)]
pub struct ProductService {
    backend: Arc<dyn RemoteBackend>,
}

impl ProductService {
    pub fn new(backend: Arc<dyn RemoteBackend>) -> Self {
        Self { backend }
    }

    /// Every product owned by `user_id`
    pub async fn list(&self, user_id: &str) -> ProductResult<Vec<Product>> {
        match self.backend.select_products(user_id).await {
            Ok(products) => {
                tracing::debug!("[PRODUCT] loaded {} products", products.len());
                Ok(products)
            }
            Err(e) => {
                tracing::error!("[PRODUCT] list failed: {}", e);
                Err(ProductError::new(LIST_FAILED))
            }
        }
    }

    pub async fn create(&self, user_id: &str, draft: &ProductDraft) -> ProductResult<Product> {
        let rows = self
            .backend
            .insert_product(&draft.scoped_to(user_id))
            .await
            .map_err(|e| {
                tracing::error!("[PRODUCT] create failed: {}", e);
                ProductError::new(CREATE_FAILED)
            })?;

        rows.into_iter().next().ok_or_else(|| {
            tracing::error!("[PRODUCT] create returned no rows");
            ProductError::new(CREATE_FAILED)
        })
    }

    /// Update the product only if it is both `product_id` and owned by `user_id`
    pub async fn update(
        &self,
        user_id: &str,
        product_id: &ProductId,
        draft: &ProductDraft,
    ) -> ProductResult<Product> {
        let rows = self
            .backend
            .update_product(product_id, &draft.scoped_to(user_id))
            .await
            .map_err(|e| {
                tracing::error!("[PRODUCT] update of {} failed: {}", product_id, e);
                ProductError::new(UPDATE_FAILED)
            })?;

        rows.into_iter().next().ok_or_else(|| {
            tracing::warn!("[PRODUCT] update of {} matched no row owned by the user", product_id);
            ProductError::new(UPDATE_FAILED)
        })
    }

    /// Delete the product only if it is both `product_id` and owned by `user_id`.
    /// Deleting a row that is already gone succeeds.
    pub async fn delete(&self, user_id: &str, product_id: &ProductId) -> ProductResult<()> {
        self.backend
            .delete_product(product_id, user_id)
            .await
            .map_err(|e| {
                tracing::error!("[PRODUCT] delete of {} failed: {}", product_id, e);
                ProductError::new(DELETE_FAILED)
            })
    }
}
