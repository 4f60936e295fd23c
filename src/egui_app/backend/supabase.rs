//! Supabase HTTP client
//!
//! Talks to the auth service (`/auth/v1`) and the table API (`/rest/v1`) of a
//! hosted project with reqwest. Owns the current session, its persistence
//! through a `SessionStorage`, and the `AuthEventHub` that announces session
//! transitions.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::egui_app::backend::postgrest::TableQuery;
use crate::egui_app::backend::storage::{FileSessionStorage, MemorySessionStorage, SessionStorage};
use crate::egui_app::backend::{AuthEventHub, AuthSubscription, BackendError, RemoteBackend};
use crate::shared::{
    AppConfig, AuthChangeEvent, Credentials, Product, ProductId, ProductRow, Session, User,
};

/// Table holding the listings
pub const PRODUCT_TABLE: &str = "product";

const AUTH_PATH: &str = "/auth/v1";

#[derive(Debug, Default)]
struct SessionSlot {
    session: Option<Session>,
    restored: bool,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// Client for one hosted project
pub struct SupabaseClient {
    http: Client,
    base_url: String,
    anon_key: String,
    auto_refresh: bool,
    storage: Arc<dyn SessionStorage>,
    slot: Mutex<SessionSlot>,
    events: AuthEventHub,
}

impl SupabaseClient {
    pub fn new(config: &AppConfig, storage: Arc<dyn SessionStorage>) -> Result<Self, BackendError> {
        let http = Client::builder()
            .build()
            .map_err(|e| BackendError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
            auto_refresh: config.auto_refresh_token,
            storage,
            slot: Mutex::new(SessionSlot::default()),
            events: AuthEventHub::new(),
        })
    }

    /// Build a client with the storage binding the configuration asks for
    pub fn from_config(config: &AppConfig) -> Result<Self, BackendError> {
        let storage: Arc<dyn SessionStorage> = if config.persist_session {
            let file = match config.session_file {
                Some(ref path) => FileSessionStorage::new(path),
                None => FileSessionStorage::in_data_dir(&config.storage_key()).ok_or_else(|| {
                    BackendError::Storage("no data directory for session storage".to_string())
                })?,
            };
            tracing::info!("[STORAGE] persisting session to {}", file.path().display());
            Arc::new(file)
        } else {
            Arc::new(MemorySessionStorage::new())
        };
        Self::new(config, storage)
    }

    pub fn events(&self) -> &AuthEventHub {
        &self.events
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, AUTH_PATH, path)
    }

    fn authorized(&self, request: RequestBuilder, bearer: &str) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", bearer))
    }

    /// Access token of the current session, or the anon key when signed out
    async fn bearer(&self) -> Result<String, BackendError> {
        Ok(self
            .get_session()
            .await?
            .map(|session| session.access_token)
            .unwrap_or_else(|| self.anon_key.clone()))
    }

    async fn table_request(&self, method: Method, query: &TableQuery) -> Result<RequestBuilder, BackendError> {
        let bearer = self.bearer().await?;
        let url = format!("{}{}", self.base_url, query.path());
        let request = self.http.request(method, url).query(&query.params());
        Ok(self.authorized(request, &bearer))
    }

    fn persist(&self, slot: &mut SessionSlot, session: Option<Session>) {
        let result = match session {
            Some(ref session) => self.storage.store(session),
            None => self.storage.clear(),
        };
        if let Err(e) = result {
            tracing::warn!("[STORAGE] failed to update stored session: {}", e);
        }
        slot.session = session;
        slot.restored = true;
    }

    /// Load the stored session once, on first use
    fn restore(&self, slot: &mut SessionSlot) {
        if slot.restored {
            return;
        }
        slot.session = match self.storage.load() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("[STORAGE] could not restore session: {}", e);
                None
            }
        };
        slot.restored = true;
        if slot.session.is_some() {
            tracing::info!("[AUTH] session restored from storage");
        }
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session, BackendError> {
        tracing::debug!("[AUTH] refreshing access token");
        let request = self
            .http
            .post(self.auth_url("/token"))
            .query(&[("grant_type", "refresh_token")])
            .json(&RefreshRequest { refresh_token });
        let session: Session = send_json(self.authorized(request, &self.anon_key)).await?;
        Ok(session.with_expiry_from(now()))
    }
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Human message from an auth or table error body
pub(crate) fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["msg", "message", "error_description", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::to_string)
}

async fn check(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body).unwrap_or_else(|| {
        if body.is_empty() {
            status.to_string()
        } else {
            body.clone()
        }
    });
    Err(BackendError::api(Some(status.as_u16()), message))
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, BackendError> {
    let response = check(request.send().await?).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| BackendError::Decode(e.to_string()))
}

#[async_trait]
impl RemoteBackend for SupabaseClient {
    async fn get_session(&self) -> Result<Option<Session>, BackendError> {
        let mut slot = self.slot.lock().await;
        self.restore(&mut slot);

        let session = match slot.session.clone() {
            Some(session) => session,
            None => return Ok(None),
        };
        if !self.auto_refresh || !session.is_expired() {
            return Ok(Some(session));
        }

        match self.refresh(&session.refresh_token).await {
            Ok(refreshed) => {
                self.persist(&mut slot, Some(refreshed.clone()));
                self.events.emit(AuthChangeEvent::TokenRefreshed, Some(refreshed.clone()));
                Ok(Some(refreshed))
            }
            Err(e @ BackendError::Api { .. }) => {
                tracing::warn!("[AUTH] refresh rejected, signing out: {}", e);
                self.persist(&mut slot, None);
                self.events.emit(AuthChangeEvent::SignedOut, None);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn get_user(&self) -> Result<User, BackendError> {
        let session = self
            .get_session()
            .await?
            .ok_or_else(BackendError::session_missing)?;
        let request = self.http.get(self.auth_url("/user"));
        send_json(self.authorized(request, &session.access_token)).await
    }

    fn on_auth_state_change(&self) -> AuthSubscription {
        self.events.subscribe()
    }

    async fn sign_in_with_password(&self, credentials: &Credentials) -> Result<Session, BackendError> {
        let request = self
            .http
            .post(self.auth_url("/token"))
            .query(&[("grant_type", "password")])
            .json(credentials);
        let session: Session = send_json(self.authorized(request, &self.anon_key)).await?;
        let session = session.with_expiry_from(now());

        let mut slot = self.slot.lock().await;
        self.persist(&mut slot, Some(session.clone()));
        drop(slot);

        tracing::info!("[AUTH] signed in as {}", session.user_id());
        self.events.emit(AuthChangeEvent::SignedIn, Some(session.clone()));
        Ok(session)
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<Option<Session>, BackendError> {
        let request = self.http.post(self.auth_url("/signup")).json(credentials);
        let body: serde_json::Value = send_json(self.authorized(request, &self.anon_key)).await?;

        if body.get("access_token").is_none() {
            tracing::info!("[AUTH] sign-up accepted, awaiting email confirmation");
            return Ok(None);
        }

        let session: Session =
            serde_json::from_value(body).map_err(|e| BackendError::Decode(e.to_string()))?;
        let session = session.with_expiry_from(now());

        let mut slot = self.slot.lock().await;
        self.persist(&mut slot, Some(session.clone()));
        drop(slot);

        tracing::info!("[AUTH] signed up as {}", session.user_id());
        self.events.emit(AuthChangeEvent::SignedIn, Some(session.clone()));
        Ok(Some(session))
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        let mut slot = self.slot.lock().await;
        self.restore(&mut slot);
        if let Some(ref session) = slot.session {
            let request = self.http.post(self.auth_url("/logout"));
            let result = match self.authorized(request, &session.access_token).send().await {
                Ok(response) => check(response).await.map(|_| ()),
                Err(e) => Err(e.into()),
            };
            match result {
                Ok(()) => {}
                // The token is already gone server-side; clear locally.
                Err(ref e) if matches!(e.status(), Some(401 | 403 | 404)) => {
                    tracing::debug!("[AUTH] logout for an invalid session: {}", e);
                }
                Err(e) => {
                    tracing::error!("[AUTH] logout failed: {}", e);
                    return Err(e);
                }
            }
        }

        self.persist(&mut slot, None);
        drop(slot);

        tracing::info!("[AUTH] signed out");
        self.events.emit(AuthChangeEvent::SignedOut, None);
        Ok(())
    }

    async fn select_products(&self, user_id: &str) -> Result<Vec<Product>, BackendError> {
        let query = TableQuery::from(PRODUCT_TABLE).select("*").eq("user_id", user_id);
        send_json(self.table_request(Method::GET, &query).await?).await
    }

    async fn insert_product(&self, row: &ProductRow<'_>) -> Result<Vec<Product>, BackendError> {
        let query = TableQuery::from(PRODUCT_TABLE).select("*");
        let request = self
            .table_request(Method::POST, &query)
            .await?
            .header("Prefer", "return=representation")
            .json(&[row]);
        send_json(request).await
    }

    async fn update_product(
        &self,
        product_id: &ProductId,
        row: &ProductRow<'_>,
    ) -> Result<Vec<Product>, BackendError> {
        let query = TableQuery::from(PRODUCT_TABLE)
            .select("*")
            .eq("id", product_id)
            .eq("user_id", row.user_id);
        let request = self
            .table_request(Method::PATCH, &query)
            .await?
            .header("Prefer", "return=representation")
            .json(row);
        send_json(request).await
    }

    async fn delete_product(&self, product_id: &ProductId, user_id: &str) -> Result<(), BackendError> {
        let query = TableQuery::from(PRODUCT_TABLE)
            .eq("id", product_id)
            .eq("user_id", user_id);
        let request = self
            .table_request(Method::DELETE, &query)
            .await?
            .header("Prefer", "return=minimal");
        check(request.send().await?).await?;
        Ok(())
    }
}
