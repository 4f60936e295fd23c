//! In-memory backend for integration tests
//!
//! Behaves like the hosted service for the operations the app uses: accounts,
//! one current session, session notifications and a user-scoped product
//! table. Individual operations can be made to fail and every call is counted.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use storefront::egui_app::backend::{AuthEventHub, AuthSubscription, BackendError, RemoteBackend};
use storefront::shared::{
    AuthChangeEvent, Credentials, Product, ProductId, ProductRow, Session, User,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    GetSession,
    GetUser,
    SignIn,
    SignUp,
    SignOut,
    Select,
    Insert,
    Update,
    Delete,
}

#[derive(Default)]
struct Inner {
    accounts: HashMap<String, (String, User)>,
    session: Option<Session>,
    products: Vec<Product>,
    next_id: u64,
    failing: HashMap<Op, BackendError>,
    calls: HashMap<Op, usize>,
    confirm_email: bool,
    select_delays: HashMap<String, Duration>,
}

pub struct FakeBackend {
    hub: AuthEventHub,
    inner: Mutex<Inner>,
}

pub fn session_for(user: &User) -> Session {
    Session {
        access_token: format!("access-{}", user.id),
        token_type: "bearer".to_string(),
        expires_in: Some(3600),
        expires_at: None,
        refresh_token: format!("refresh-{}", user.id),
        user: user.clone(),
    }
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            hub: AuthEventHub::new(),
            inner: Mutex::new(Inner {
                next_id: 1,
                ..Inner::default()
            }),
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }

    fn enter(&self, op: Op) -> Result<(), BackendError> {
        let mut inner = self.lock();
        *inner.calls.entry(op).or_default() += 1;
        match inner.failing.get(&op) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// Register an account; returns its user id
    pub fn add_account(&self, email: &str, password: &str) -> String {
        let mut inner = self.lock();
        let user = User {
            id: format!("user-{}", inner.accounts.len() + 1),
            email: Some(email.to_string()),
        };
        let id = user.id.clone();
        inner
            .accounts
            .insert(email.to_string(), (password.to_string(), user));
        id
    }

    /// Start with `email` already signed in, as if restored from storage
    pub fn restore_session(&self, email: &str) -> Session {
        let mut inner = self.lock();
        let user = inner.accounts[email].1.clone();
        let session = session_for(&user);
        inner.session = Some(session.clone());
        session
    }

    /// Drop the session on the service side and notify, like an expired refresh
    pub fn expire_session(&self) {
        self.lock().session = None;
        self.hub.emit(AuthChangeEvent::SignedOut, None);
    }

    /// Sign-ups leave the account awaiting email confirmation
    pub fn require_email_confirmation(&self) {
        self.lock().confirm_email = true;
    }

    pub fn fail(&self, op: Op, error: BackendError) {
        self.lock().failing.insert(op, error);
    }

    /// Hold back list responses for one user
    pub fn delay_select(&self, user_id: &str, delay: Duration) {
        self.lock().select_delays.insert(user_id.to_string(), delay);
    }

    pub fn heal(&self, op: Op) {
        self.lock().failing.remove(&op);
    }

    pub fn calls(&self, op: Op) -> usize {
        self.lock().calls.get(&op).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.lock().calls.values().sum()
    }

    pub fn subscriber_count(&self) -> usize {
        self.hub.subscriber_count()
    }

    pub fn seed_product(&self, user_id: &str, description: &str, price: f64) -> Product {
        let mut inner = self.lock();
        let product = Product {
            id: ProductId::new(inner.next_id.to_string()),
            description: description.to_string(),
            price,
            image: format!("https://img.example/{}.jpg", inner.next_id),
            user_id: user_id.to_string(),
        };
        inner.next_id += 1;
        inner.products.push(product.clone());
        product
    }

    /// Every stored row, regardless of owner
    pub fn all_products(&self) -> Vec<Product> {
        self.lock().products.clone()
    }

    pub fn product_ids(&self) -> HashSet<String> {
        self.lock()
            .products
            .iter()
            .map(|p| p.id.as_str().to_string())
            .collect()
    }
}

#[async_trait]
impl RemoteBackend for FakeBackend {
    async fn get_session(&self) -> Result<Option<Session>, BackendError> {
        self.enter(Op::GetSession)?;
        Ok(self.lock().session.clone())
    }

    async fn get_user(&self) -> Result<User, BackendError> {
        self.enter(Op::GetUser)?;
        self.lock()
            .session
            .as_ref()
            .map(|s| s.user.clone())
            .ok_or_else(BackendError::session_missing)
    }

    fn on_auth_state_change(&self) -> AuthSubscription {
        self.hub.subscribe()
    }

    async fn sign_in_with_password(&self, credentials: &Credentials) -> Result<Session, BackendError> {
        self.enter(Op::SignIn)?;
        let session = {
            let mut inner = self.lock();
            let user = match inner.accounts.get(&credentials.email) {
                Some((password, user)) if *password == credentials.password => user.clone(),
                _ => return Err(BackendError::api(Some(400), "Invalid login credentials")),
            };
            let session = session_for(&user);
            inner.session = Some(session.clone());
            session
        };
        self.hub.emit(AuthChangeEvent::SignedIn, Some(session.clone()));
        Ok(session)
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<Option<Session>, BackendError> {
        self.enter(Op::SignUp)?;
        if self.lock().accounts.contains_key(&credentials.email) {
            return Err(BackendError::api(Some(422), "User already registered"));
        }
        self.add_account(&credentials.email, &credentials.password);
        if self.lock().confirm_email {
            return Ok(None);
        }

        let session = {
            let mut inner = self.lock();
            let session = session_for(&inner.accounts[&credentials.email].1);
            inner.session = Some(session.clone());
            session
        };
        self.hub.emit(AuthChangeEvent::SignedIn, Some(session.clone()));
        Ok(Some(session))
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        self.enter(Op::SignOut)?;
        self.lock().session = None;
        self.hub.emit(AuthChangeEvent::SignedOut, None);
        Ok(())
    }

    async fn select_products(&self, user_id: &str) -> Result<Vec<Product>, BackendError> {
        self.enter(Op::Select)?;
        let delay = self.lock().select_delays.get(user_id).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self
            .lock()
            .products
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_product(&self, row: &ProductRow<'_>) -> Result<Vec<Product>, BackendError> {
        self.enter(Op::Insert)?;
        let mut inner = self.lock();
        let product = Product {
            id: ProductId::new(inner.next_id.to_string()),
            description: row.description.to_string(),
            price: row.price,
            image: row.image.to_string(),
            user_id: row.user_id.to_string(),
        };
        inner.next_id += 1;
        inner.products.push(product.clone());
        Ok(vec![product])
    }

    async fn update_product(
        &self,
        product_id: &ProductId,
        row: &ProductRow<'_>,
    ) -> Result<Vec<Product>, BackendError> {
        self.enter(Op::Update)?;
        let mut inner = self.lock();
        let updated = inner
            .products
            .iter_mut()
            .filter(|p| &p.id == product_id && p.user_id == row.user_id)
            .map(|p| {
                p.description = row.description.to_string();
                p.price = row.price;
                p.image = row.image.to_string();
                p.clone()
            })
            .collect();
        Ok(updated)
    }

    async fn delete_product(&self, product_id: &ProductId, user_id: &str) -> Result<(), BackendError> {
        self.enter(Op::Delete)?;
        self.lock()
            .products
            .retain(|p| !(&p.id == product_id && p.user_id == user_id));
        Ok(())
    }
}
