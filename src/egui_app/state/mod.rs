use std::sync::Arc;

use crate::egui_app::backend::RemoteBackend;
use crate::egui_app::navigation::NavigationGate;
use crate::egui_app::products::ProductService;
use crate::egui_app::screens::product_form::save_product;
use crate::egui_app::screens::product_list::{delete_product, fetch_products};
use crate::egui_app::screens::{
    Dialog, FormOutcome, LoginController, ProductFormController, ProductListController,
    SignUpController, TITLE_ERROR,
};
use crate::egui_app::session::SessionManager;
use crate::egui_app::types::{GateState, Screen, ScreenKind};
use crate::egui_app::worker::{UiEvent, Worker};
use crate::egui_app::Config;
use crate::shared::Product;

/// Central application state shared across egui views.
pub struct AppState {
    pub config: Config,
    worker: Worker,
    sessions: SessionManager,
    products: ProductService,
    gate: NavigationGate,
    pub login: LoginController,
    pub signup: SignUpController,
    pub list: ProductListController,
    pub form: Option<ProductFormController>,
    /// App-level message, e.g. a save confirmation or a failed sign-out
    pub notice: Option<Dialog>,
    signing_out: bool,
    last_screen: Option<ScreenKind>,
}

impl AppState {
    pub fn new(config: Config, backend: Arc<dyn RemoteBackend>, worker: Worker) -> Self {
        let sessions = SessionManager::new(backend.clone());
        let gate = NavigationGate::new(sessions.subscribe());
        Self {
            config,
            worker,
            sessions,
            products: ProductService::new(backend),
            gate,
            login: LoginController::new(),
            signup: SignUpController::new(),
            list: ProductListController::new(),
            form: None,
            notice: None,
            signing_out: false,
            last_screen: None,
        }
    }

    /// Kick off the startup session lookup
    pub fn start(&self) {
        let sessions = self.sessions.clone();
        self.worker
            .spawn(async move { UiEvent::InitialSession(sessions.current_session().await) });
    }

    pub fn gate(&self) -> &NavigationGate {
        &self.gate
    }

    pub fn gate_state(&self) -> GateState {
        self.gate.state()
    }

    pub fn current_screen(&self) -> Option<&Screen> {
        self.gate.current_screen()
    }

    pub fn is_signing_out(&self) -> bool {
        self.signing_out
    }

    /// Apply session notifications and finished background tasks.
    /// Called once per frame.
    pub fn process_events(&mut self) {
        if self.gate.poll() {
            self.on_group_change();
        }
        for event in self.worker.drain() {
            self.apply(event);
        }
        self.track_focus();
    }

    /// Apply one background result
    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::InitialSession(session) => {
                if self.gate.resolve_initial(session.as_ref()) {
                    self.on_group_change();
                }
            }
            UiEvent::SignedIn(result) => self.login.finish(result),
            UiEvent::SignedUp(result) => self.signup.finish(result),
            UiEvent::SignedOut(result) => {
                self.signing_out = false;
                if let Err(e) = result {
                    self.notice = Some(Dialog::for_error(&e, TITLE_ERROR));
                }
            }
            UiEvent::ProductsLoaded { ticket, result } => {
                self.list.finish_refresh(ticket, result);
            }
            UiEvent::ProductDeleted { id, result } => self.list.finish_delete(&id, result),
            UiEvent::ProductSaved(result) => self.finish_save(result),
        }
    }

    fn finish_save(&mut self, result: Result<Product, crate::shared::StoreError>) {
        let Some(form) = self.form.as_mut() else {
            tracing::debug!("[PRODUCT] save finished after the form closed");
            return;
        };
        if let FormOutcome::Saved(_) = form.finish(result) {
            self.notice = form.take_dialog();
            self.form = None;
            self.gate.go_back();
        }
    }

    fn on_group_change(&mut self) {
        self.form = None;
        self.login = LoginController::new();
        self.signup = SignUpController::new();
        if self.gate.state() == GateState::Unauthenticated {
            self.list.clear();
        }
    }

    /// The list refetches every time it comes back into view
    fn track_focus(&mut self) {
        let current = self.gate.current_screen().map(Screen::kind);
        if current != self.last_screen {
            if current == Some(ScreenKind::ProductList) {
                self.refresh_products();
            }
            if current != Some(ScreenKind::ProductForm) {
                self.form = None;
            }
            self.last_screen = current;
        }
    }

    pub fn handle_login(&mut self) {
        let Some(credentials) = self.login.submit() else {
            return;
        };
        let sessions = self.sessions.clone();
        self.worker
            .spawn(async move { UiEvent::SignedIn(sessions.sign_in(&credentials).await) });
    }

    pub fn handle_signup(&mut self) {
        let Some(credentials) = self.signup.submit() else {
            return;
        };
        let sessions = self.sessions.clone();
        self.worker
            .spawn(async move { UiEvent::SignedUp(sessions.sign_up(&credentials).await) });
    }

    pub fn handle_sign_out(&mut self) {
        if self.signing_out {
            return;
        }
        self.signing_out = true;
        let sessions = self.sessions.clone();
        self.worker
            .spawn(async move { UiEvent::SignedOut(sessions.sign_out().await) });
    }

    pub fn open_signup(&mut self) {
        if let Err(e) = self.gate.navigate(Screen::SignUp) {
            tracing::warn!("[GATE] {}", e);
        }
    }

    /// Open the form, pre-filled when `editing` is given
    pub fn open_product_form(&mut self, editing: Option<Product>) {
        let form = ProductFormController::new(editing.as_ref());
        match self.gate.navigate(Screen::ProductForm { editing }) {
            Ok(()) => {
                self.form = Some(form);
                self.last_screen = Some(ScreenKind::ProductForm);
            }
            Err(e) => tracing::warn!("[GATE] {}", e),
        }
    }

    /// Back to the previous screen; not while a save is in flight
    pub fn go_back(&mut self) {
        if self.form.as_ref().is_some_and(ProductFormController::is_in_flight) {
            return;
        }
        self.gate.go_back();
    }

    pub fn refresh_products(&mut self) {
        let ticket = self.list.begin_refresh();
        let sessions = self.sessions.clone();
        let products = self.products.clone();
        self.worker.spawn(async move {
            let result = fetch_products(&sessions, &products).await;
            UiEvent::ProductsLoaded { ticket, result }
        });
    }

    pub fn handle_save(&mut self) {
        let Some(request) = self.form.as_mut().and_then(ProductFormController::submit) else {
            return;
        };
        let sessions = self.sessions.clone();
        let products = self.products.clone();
        self.worker.spawn(async move {
            UiEvent::ProductSaved(save_product(&sessions, &products, &request).await)
        });
    }

    pub fn confirm_delete(&mut self) {
        let Some(id) = self.list.confirm_delete() else {
            return;
        };
        let sessions = self.sessions.clone();
        let products = self.products.clone();
        self.worker.spawn(async move {
            let result = delete_product(&sessions, &products, &id).await;
            UiEvent::ProductDeleted { id, result }
        });
    }
}
