//! Product List screen.
//!
//! The list is fetched fresh on every focus. Fetches are numbered; a result
//! for anything but the latest fetch is dropped so a slow response can't
//! overwrite a newer one. Deleting needs a confirmation and only touches the
//! local list once the backend has confirmed.

use crate::egui_app::products::ProductService;
use crate::egui_app::screens::{Dialog, TITLE_ERROR};
use crate::egui_app::session::SessionManager;
use crate::shared::{Product, ProductId, StoreError};

pub const CONFIRM_DELETE_TITLE: &str = "Excluir produto";
pub const CONFIRM_DELETE_MESSAGE: &str = "Tem certeza que deseja excluir este produto?";
pub const EMPTY_MESSAGE: &str = "Nenhum produto cadastrado.";

/// Identifies one fetch of the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Debug, Default)]
pub struct ProductListController {
    products: Vec<Product>,
    loading: bool,
    latest_fetch: u64,
    pending_delete: Option<ProductId>,
    deleting: Option<ProductId>,
    dialog: Option<Dialog>,
}

/// Resolve the signed-in user and load their products
pub async fn fetch_products(
    sessions: &SessionManager,
    products: &ProductService,
) -> Result<Vec<Product>, StoreError> {
    let user_id = sessions.current_user_id().await?;
    Ok(products.list(&user_id).await?)
}

/// Resolve the signed-in user and delete one of their products
pub async fn delete_product(
    sessions: &SessionManager,
    products: &ProductService,
    product_id: &ProductId,
) -> Result<(), StoreError> {
    let user_id = sessions.current_user_id().await?;
    Ok(products.delete(&user_id, product_id).await?)
}

impl ProductListController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products,
            ..Self::default()
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_deleting(&self, product_id: &ProductId) -> bool {
        self.deleting.as_ref() == Some(product_id)
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    pub fn dismiss_dialog(&mut self) {
        self.dialog = None;
    }

    /// Forget the listed products and any pending work.
    ///
    /// The fetch counter survives, so a response still in flight from
    /// before the reset can never match a later ticket.
    pub fn clear(&mut self) {
        *self = Self {
            latest_fetch: self.latest_fetch,
            ..Self::default()
        };
    }

    /// Start a fetch; only the newest ticket's result will be applied
    pub fn begin_refresh(&mut self) -> FetchTicket {
        self.latest_fetch += 1;
        self.loading = true;
        FetchTicket(self.latest_fetch)
    }

    /// Apply a fetch result. Returns `false` when the ticket is stale.
    pub fn finish_refresh(&mut self, ticket: FetchTicket, result: Result<Vec<Product>, StoreError>) -> bool {
        if ticket.0 != self.latest_fetch {
            tracing::debug!("[PRODUCT] dropping stale list response #{}", ticket.0);
            return false;
        }
        self.loading = false;
        match result {
            Ok(products) => self.products = products,
            Err(e) => self.dialog = Some(Dialog::for_error(&e, TITLE_ERROR)),
        }
        true
    }

    /// Ask for confirmation before deleting
    pub fn request_delete(&mut self, product_id: ProductId) {
        if self.deleting.is_none() {
            self.pending_delete = Some(product_id);
        }
    }

    /// Confirmation prompt, while a delete awaits an answer
    pub fn confirmation(&self) -> Option<Dialog> {
        self.pending_delete
            .as_ref()
            .map(|_| Dialog::new(CONFIRM_DELETE_TITLE, CONFIRM_DELETE_MESSAGE))
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// The user confirmed: returns the id to delete and marks it in flight
    pub fn confirm_delete(&mut self) -> Option<ProductId> {
        let product_id = self.pending_delete.take()?;
        self.deleting = Some(product_id.clone());
        Some(product_id)
    }

    /// Apply the delete result; the local list changes only on success
    pub fn finish_delete(&mut self, product_id: &ProductId, result: Result<(), StoreError>) {
        if self.deleting.as_ref() != Some(product_id) {
            tracing::debug!("[PRODUCT] dropping delete result for {}", product_id.as_str());
            return;
        }
        self.deleting = None;
        match result {
            Ok(()) => self.products.retain(|p| &p.id != product_id),
            Err(e) => self.dialog = Some(Dialog::for_error(&e, TITLE_ERROR)),
        }
    }

    /// Fetch and apply in one go
    pub async fn refresh(&mut self, sessions: &SessionManager, products: &ProductService) {
        let ticket = self.begin_refresh();
        let result = fetch_products(sessions, products).await;
        self.finish_refresh(ticket, result);
    }

    /// Delete the confirmed product. Returns whether a remote call was made.
    pub async fn delete_confirmed(&mut self, sessions: &SessionManager, products: &ProductService) -> bool {
        let Some(product_id) = self.confirm_delete() else {
            return false;
        };
        let result = delete_product(sessions, products, &product_id).await;
        self.finish_delete(&product_id, result);
        true
    }
}
