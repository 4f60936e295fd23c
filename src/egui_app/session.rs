//! Session Manager
//!
//! Thin layer over the backend's auth operations. It keeps no state of its
//! own: the session lives in the backend client, and every subscription it
//! hands out belongs to whoever holds it (normally the navigation gate).

use std::sync::Arc;

use crate::egui_app::backend::{AuthSubscription, BackendError, RemoteBackend};
use crate::shared::{Credentials, Session, StoreError};

#[derive(Clone)]
pub struct SessionManager {
    backend: Arc<dyn RemoteBackend>,
}

impl SessionManager {
    pub fn new(backend: Arc<dyn RemoteBackend>) -> Self {
        Self { backend }
    }

    /// Session at startup. A failing lookup counts as signed out.
    pub async fn current_session(&self) -> Option<Session> {
        match self.backend.get_session().await {
            Ok(session) => session,
            Err(e) => {
                tracing::error!("[AUTH] session lookup failed: {}", e);
                None
            }
        }
    }

    /// Listen for session transitions
    pub fn subscribe(&self) -> AuthSubscription {
        self.backend.on_auth_state_change()
    }

    pub async fn sign_in(&self, credentials: &Credentials) -> Result<(), StoreError> {
        self.backend
            .sign_in_with_password(credentials)
            .await
            .map(|_| ())
            .map_err(|e| log_auth_failure("sign-in", e))
    }

    pub async fn sign_up(&self, credentials: &Credentials) -> Result<(), StoreError> {
        self.backend
            .sign_up(credentials)
            .await
            .map(|_| ())
            .map_err(|e| log_auth_failure("sign-up", e))
    }

    pub async fn sign_out(&self) -> Result<(), StoreError> {
        self.backend
            .sign_out()
            .await
            .map_err(|e| log_auth_failure("sign-out", e))
    }

    /// Id of the signed-in user.
    ///
    /// Fails with `StoreError::NoSession` when nobody is signed in; a
    /// session lookup that itself fails is reported as that failure.
    pub async fn current_user_id(&self) -> Result<String, StoreError> {
        match self.backend.get_session().await {
            Ok(Some(_)) => {}
            Ok(None) => {
                tracing::warn!("[AUTH] user id requested without an active session");
                return Err(StoreError::NoSession);
            }
            Err(e) => return Err(log_auth_failure("session lookup", e)),
        }
        match self.backend.get_user().await {
            Ok(user) => Ok(user.id),
            Err(e) if e == BackendError::session_missing() => Err(StoreError::NoSession),
            Err(e) => Err(log_auth_failure("user lookup", e)),
        }
    }
}

fn log_auth_failure(operation: &str, error: BackendError) -> StoreError {
    if error.is_remote() {
        tracing::warn!("[AUTH] {} rejected: {}", operation, error);
    } else {
        tracing::error!("[AUTH] {} failed unexpectedly: {}", operation, error);
    }
    error.into()
}
