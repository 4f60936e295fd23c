//! Remote Backend Client
//!
//! The hosted auth/data service as seen by the rest of the app. Everything
//! above this module talks to the `RemoteBackend` trait; `SupabaseClient`
//! is the production implementation.
//!
//! Session-change notifications are delivered through an `AuthEventHub`
//! owned by the client. Each call to `on_auth_state_change` hands out an
//! independent `AuthSubscription`; dropping it releases the listener.

pub mod postgrest;
pub mod storage;
pub mod supabase;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use uuid::Uuid;

use crate::shared::{
    AuthChangeEvent, AuthStateChange, Credentials, Product, ProductId, ProductRow, Session,
    StoreError, User,
};

pub use storage::{FileSessionStorage, MemorySessionStorage, SessionStorage};
pub use supabase::SupabaseClient;

/// Capacity of the session-change channel
const AUTH_EVENT_CAPACITY: usize = 16;

/// Client-layer errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BackendError {
    /// Error body returned by the service
    #[error("{message}")]
    Api { status: Option<u16>, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("session storage error: {0}")]
    Storage(String),
}

impl BackendError {
    pub fn api(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Returned when an authenticated call is made without a session
    pub fn session_missing() -> Self {
        Self::api(None, "Auth session missing!")
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }

    /// Whether the failure is shaped as a backend error
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Api { .. } | Self::Network(_))
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<BackendError> for StoreError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Api { message, .. } => StoreError::remote(message),
            BackendError::Network(message) => StoreError::remote(message),
            other => StoreError::unexpected(other.to_string()),
        }
    }
}

/// Operations the app consumes from the hosted service
#[async_trait]
pub trait RemoteBackend: Send + Sync {
    /// Current session, restored from storage on first use
    async fn get_session(&self) -> Result<Option<Session>, BackendError>;

    /// User behind the current access token
    async fn get_user(&self) -> Result<User, BackendError>;

    /// Subscribe to session transitions
    fn on_auth_state_change(&self) -> AuthSubscription;

    async fn sign_in_with_password(&self, credentials: &Credentials) -> Result<Session, BackendError>;

    /// `None` when the account awaits email confirmation
    async fn sign_up(&self, credentials: &Credentials) -> Result<Option<Session>, BackendError>;

    async fn sign_out(&self) -> Result<(), BackendError>;

    /// Rows of `product` owned by `user_id`
    async fn select_products(&self, user_id: &str) -> Result<Vec<Product>, BackendError>;

    /// Insert one row and return the stored representation
    async fn insert_product(&self, row: &ProductRow<'_>) -> Result<Vec<Product>, BackendError>;

    /// Update the row matching both `product_id` and `row.user_id`
    async fn update_product(
        &self,
        product_id: &ProductId,
        row: &ProductRow<'_>,
    ) -> Result<Vec<Product>, BackendError>;

    /// Delete the row matching both `product_id` and `user_id`
    async fn delete_product(&self, product_id: &ProductId, user_id: &str) -> Result<(), BackendError>;
}

/// Broadcast point for session transitions
#[derive(Debug, Clone)]
pub struct AuthEventHub {
    sender: broadcast::Sender<AuthStateChange>,
}

impl AuthEventHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(AUTH_EVENT_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> AuthSubscription {
        AuthSubscription {
            id: Uuid::new_v4(),
            receiver: Some(self.sender.subscribe()),
        }
    }

    /// Notify every live subscription. Returns how many received it.
    pub fn emit(&self, event: AuthChangeEvent, session: Option<Session>) -> usize {
        tracing::debug!("[AUTH] emitting {}", event);
        self.sender
            .send(AuthStateChange { event, session })
            .unwrap_or(0)
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for AuthEventHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Listener handle for session transitions
#[derive(Debug)]
pub struct AuthSubscription {
    id: Uuid,
    receiver: Option<broadcast::Receiver<AuthStateChange>>,
}

impl AuthSubscription {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.receiver.is_some()
    }

    /// Next pending notification, without waiting.
    ///
    /// A lagged receiver skips ahead; only the newest notifications matter.
    pub fn try_next(&mut self) -> Option<AuthStateChange> {
        let receiver = self.receiver.as_mut()?;
        loop {
            match receiver.try_recv() {
                Ok(change) => return Some(change),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!("[AUTH] subscription {} skipped {} notifications", self.id, skipped);
                }
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Closed) => {
                    self.receiver = None;
                    return None;
                }
            }
        }
    }

    /// Wait for the next notification. `None` once unsubscribed or closed.
    pub async fn next(&mut self) -> Option<AuthStateChange> {
        let receiver = self.receiver.as_mut()?;
        loop {
            match receiver.recv().await {
                Ok(change) => return Some(change),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("[AUTH] subscription {} skipped {} notifications", self.id, skipped);
                }
                Err(RecvError::Closed) => {
                    self.receiver = None;
                    return None;
                }
            }
        }
    }

    /// Stop receiving notifications
    pub fn unsubscribe(&mut self) {
        if self.receiver.take().is_some() {
            tracing::debug!("[AUTH] subscription {} released", self.id);
        }
    }
}
