//! HTTP client against a mock hosted project

use std::sync::Arc;

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use serde_json::json;
use storefront::egui_app::backend::{
    BackendError, FileSessionStorage, MemorySessionStorage, RemoteBackend, SessionStorage,
    SupabaseClient,
};
use storefront::shared::{AppConfig, AuthChangeEvent, Credentials, ProductDraft, ProductId, Session, User};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ANON: &str = "anon-key";

fn config(server: &MockServer) -> AppConfig {
    AppConfig::builder()
        .supabase_url(server.uri())
        .anon_key(ANON)
        .build()
        .unwrap()
}

fn session_json(access_token: &str, expires_in: i64) -> serde_json::Value {
    json!({
        "access_token": access_token,
        "token_type": "bearer",
        "expires_in": expires_in,
        "refresh_token": "refresh-1",
        "user": { "id": "user-1", "email": "ana@example.com" }
    })
}

fn stored_session(expires_at: i64) -> Session {
    Session {
        access_token: "old-token".to_string(),
        token_type: "bearer".to_string(),
        expires_in: Some(3600),
        expires_at: Some(expires_at),
        refresh_token: "refresh-1".to_string(),
        user: User {
            id: "user-1".to_string(),
            email: Some("ana@example.com".to_string()),
        },
    }
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

async fn signed_in_client(server: &MockServer) -> SupabaseClient {
    let storage = Arc::new(MemorySessionStorage::new());
    storage.store(&stored_session(now() + 3600)).unwrap();
    SupabaseClient::new(&config(server), storage).unwrap()
}

#[tokio::test]
async fn test_sign_in_persists_and_notifies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .and(header("apikey", ANON))
        .and(body_json(json!({ "email": "ana@example.com", "password": "segredo123" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_json("access-1", 3600)))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("session.json");
    let client = SupabaseClient::new(&config(&server), Arc::new(FileSessionStorage::new(&file))).unwrap();
    let mut subscription = client.on_auth_state_change();

    let session = client
        .sign_in_with_password(&Credentials::new("ana@example.com", "segredo123"))
        .await
        .unwrap();
    assert_eq!(session.user_id(), "user-1");
    assert!(session.expires_at.is_some());

    let change = subscription.try_next().unwrap();
    assert_eq!(change.event, AuthChangeEvent::SignedIn);
    assert_eq!(client.get_session().await.unwrap(), Some(session.clone()));

    let restored = FileSessionStorage::new(&file).load().unwrap();
    assert_eq!(restored, Some(session));
}

#[tokio::test]
async fn test_sign_in_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": 400,
            "error_code": "invalid_credentials",
            "msg": "Invalid login credentials"
        })))
        .mount(&server)
        .await;

    let client = SupabaseClient::new(&config(&server), Arc::new(MemorySessionStorage::new())).unwrap();
    let mut subscription = client.on_auth_state_change();

    let result = client
        .sign_in_with_password(&Credentials::new("ana@example.com", "errada123"))
        .await;
    assert_eq!(result, Err(BackendError::api(Some(400), "Invalid login credentials")));
    assert!(subscription.try_next().is_none());
}

#[tokio::test]
async fn test_sign_up_awaiting_confirmation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "user-1",
            "email": "ana@example.com",
            "confirmation_sent_at": "2026-01-01T00:00:00Z"
        })))
        .mount(&server)
        .await;

    let client = SupabaseClient::new(&config(&server), Arc::new(MemorySessionStorage::new())).unwrap();
    let result = client.sign_up(&Credentials::new("ana@example.com", "segredo123")).await;
    assert_eq!(result, Ok(None));
    assert_eq!(client.get_session().await.unwrap(), None);
}

#[tokio::test]
async fn test_select_is_scoped_to_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/product"))
        .and(query_param("select", "*"))
        .and(query_param("user_id", "eq.user-1"))
        .and(header("authorization", "Bearer old-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "description": "Cadeira", "price": 150.5, "image": "https://img/1.jpg", "user_id": "user-1" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in_client(&server).await;
    let products = client.select_products("user-1").await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, ProductId::new("1"));
    assert_eq!(products[0].formatted_price(), "R$ 150.50");
}

#[tokio::test]
async fn test_insert_sends_owned_row() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/product"))
        .and(header("prefer", "return=representation"))
        .and(body_json(json!([
            { "description": "Mesa", "price": 300.0, "image": "https://img/m.jpg", "user_id": "user-1" }
        ])))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            { "id": 7, "description": "Mesa", "price": 300.0, "image": "https://img/m.jpg", "user_id": "user-1" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in_client(&server).await;
    let draft = ProductDraft {
        description: "Mesa".to_string(),
        price: 300.0,
        image: "https://img/m.jpg".to_string(),
    };
    let rows = client.insert_product(&draft.scoped_to("user-1")).await.unwrap();
    assert_eq!(rows[0].id.as_str(), "7");
}

#[tokio::test]
async fn test_update_filters_on_id_and_owner() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/product"))
        .and(query_param("id", "eq.7"))
        .and(query_param("user_id", "eq.user-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = signed_in_client(&server).await;
    let draft = ProductDraft {
        description: "Mesa".to_string(),
        price: 300.0,
        image: "https://img/m.jpg".to_string(),
    };
    let rows = client
        .update_product(&ProductId::new("7"), &draft.scoped_to("user-1"))
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_delete_row_level_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/product"))
        .and(query_param("id", "eq.7"))
        .and(query_param("user_id", "eq.user-1"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "code": "42501",
            "message": "permission denied for table product"
        })))
        .mount(&server)
        .await;

    let client = signed_in_client(&server).await;
    let result = client.delete_product(&ProductId::new("7"), "user-1").await;
    assert_matches!(result, Err(BackendError::Api { status: Some(403), .. }));
}

#[tokio::test]
async fn test_expired_session_is_refreshed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "refresh_token"))
        .and(body_json(json!({ "refresh_token": "refresh-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_json("new-token", 3600)))
        .expect(1)
        .mount(&server)
        .await;

    let storage = Arc::new(MemorySessionStorage::new());
    storage.store(&stored_session(now() + 10)).unwrap();
    let client = SupabaseClient::new(&config(&server), storage.clone()).unwrap();
    let mut subscription = client.on_auth_state_change();

    let session = client.get_session().await.unwrap().unwrap();
    assert_eq!(session.access_token, "new-token");
    assert_eq!(subscription.try_next().unwrap().event, AuthChangeEvent::TokenRefreshed);
    assert_eq!(storage.load().unwrap(), Some(session));
}

#[tokio::test]
async fn test_rejected_refresh_signs_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid Refresh Token: Already Used"
        })))
        .mount(&server)
        .await;

    let storage = Arc::new(MemorySessionStorage::new());
    storage.store(&stored_session(now() - 60)).unwrap();
    let client = SupabaseClient::new(&config(&server), storage.clone()).unwrap();
    let mut subscription = client.on_auth_state_change();

    assert_eq!(client.get_session().await.unwrap(), None);
    let change = subscription.try_next().unwrap();
    assert_eq!(change.event, AuthChangeEvent::SignedOut);
    assert!(change.session.is_none());
    assert_eq!(storage.load().unwrap(), None);
}

#[tokio::test]
async fn test_sign_out_keeps_session_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "msg": "database unavailable" })))
        .mount(&server)
        .await;

    let client = signed_in_client(&server).await;
    assert!(client.get_session().await.unwrap().is_some());

    let result = client.sign_out().await;
    assert_eq!(result, Err(BackendError::api(Some(500), "database unavailable")));
    assert!(client.get_session().await.unwrap().is_some());
}

#[tokio::test]
async fn test_sign_out_with_revoked_token_clears() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "msg": "invalid JWT" })))
        .mount(&server)
        .await;

    let client = signed_in_client(&server).await;
    client.get_session().await.unwrap();
    let mut subscription = client.on_auth_state_change();

    client.sign_out().await.unwrap();
    assert_eq!(subscription.try_next().unwrap().event, AuthChangeEvent::SignedOut);
    assert_eq!(client.get_session().await.unwrap(), None);
}

#[tokio::test]
async fn test_get_user_without_session() {
    let server = MockServer::start().await;
    let client = SupabaseClient::new(&config(&server), Arc::new(MemorySessionStorage::new())).unwrap();
    assert_eq!(client.get_user().await, Err(BackendError::session_missing()));
}
