//! Product Form screen, for both creating and editing.

use crate::egui_app::products::ProductService;
use crate::egui_app::screens::{Dialog, TITLE_ERROR};
use crate::egui_app::session::SessionManager;
use crate::egui_app::validation::{parse_price, require_filled};
use crate::shared::{Product, ProductDraft, ProductId, StoreError};

pub const TITLE_SUCCESS: &str = "Sucesso";

/// What the form asks the backend to do
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
    /// Product being edited; `None` creates
    pub target: Option<ProductId>,
    pub draft: ProductDraft,
}

/// Result of applying a save
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    /// Saved; the form should close and the list be shown again
    Saved(Product),
    Failed,
}

/// Resolve the signed-in user and create or update
pub async fn save_product(
    sessions: &SessionManager,
    products: &ProductService,
    request: &SaveRequest,
) -> Result<Product, StoreError> {
    let user_id = sessions.current_user_id().await?;
    let saved = match request.target {
        Some(ref product_id) => products.update(&user_id, product_id, &request.draft).await?,
        None => products.create(&user_id, &request.draft).await?,
    };
    Ok(saved)
}

#[derive(Debug)]
pub struct ProductFormController {
    editing: Option<ProductId>,
    pub description: String,
    pub price: String,
    pub image: String,
    in_flight: bool,
    dialog: Option<Dialog>,
}

impl ProductFormController {
    /// Empty when creating, pre-filled from `editing` otherwise
    pub fn new(editing: Option<&Product>) -> Self {
        match editing {
            Some(product) => Self {
                editing: Some(product.id.clone()),
                description: product.description.clone(),
                price: product.price.to_string(),
                image: product.image.clone(),
                in_flight: false,
                dialog: None,
            },
            None => Self {
                editing: None,
                description: String::new(),
                price: String::new(),
                image: String::new(),
                in_flight: false,
                dialog: None,
            },
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn title(&self) -> &'static str {
        if self.is_editing() {
            "Editar Produto"
        } else {
            "Cadastrar Produto"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            "Salvar alterações"
        } else {
            "Cadastrar produto"
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    pub fn dismiss_dialog(&mut self) {
        self.dialog = None;
    }

    pub fn take_dialog(&mut self) -> Option<Dialog> {
        self.dialog.take()
    }

    fn validate(&self) -> Result<SaveRequest, StoreError> {
        require_filled(
            &[self.description.as_str(), self.price.as_str(), self.image.as_str()],
            "Preencha todos os campos.",
        )?;
        let price = parse_price(&self.price)?;
        Ok(SaveRequest {
            target: self.editing.clone(),
            draft: ProductDraft {
                description: self.description.trim().to_string(),
                price,
                image: self.image.trim().to_string(),
            },
        })
    }

    /// Validate and mark the save in flight
    pub fn submit(&mut self) -> Option<SaveRequest> {
        if self.in_flight {
            return None;
        }
        match self.validate() {
            Ok(request) => {
                self.in_flight = true;
                Some(request)
            }
            Err(e) => {
                self.dialog = Some(Dialog::for_error(&e, TITLE_ERROR));
                None
            }
        }
    }

    pub fn finish(&mut self, result: Result<Product, StoreError>) -> FormOutcome {
        self.in_flight = false;
        match result {
            Ok(product) => {
                let message = if self.is_editing() {
                    "Produto atualizado!"
                } else {
                    "Produto cadastrado!"
                };
                tracing::info!("[PRODUCT] saved {}", product.id);
                self.dialog = Some(Dialog::new(TITLE_SUCCESS, message));
                FormOutcome::Saved(product)
            }
            Err(e) => {
                self.dialog = Some(Dialog::for_error(&e, TITLE_ERROR));
                FormOutcome::Failed
            }
        }
    }

    /// Submit and await the save. `None` when nothing was sent.
    pub async fn save(&mut self, sessions: &SessionManager, products: &ProductService) -> Option<FormOutcome> {
        let request = self.submit()?;
        let result = save_product(sessions, products, &request).await;
        Some(self.finish(result))
    }
}
