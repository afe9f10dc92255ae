//! Integration tests against a live NovaShop backend.
//!
//! These tests require:
//! - A running backend at `NOVASHOP_TEST_BACKEND_URL`
//!   (default `http://localhost:8000`)
//! - Open registration (the round-trip test creates a throwaway account)
//!
//! Run with: `cargo test -p novashop-integration-tests -- --ignored`

#![allow(clippy::unwrap_used)]

use uuid::Uuid;

use novashop_client::api::{ApiClient, ApiError};
use novashop_client::error::AuthError;
use novashop_client::session::{InMemorySessionStorage, SessionStore};
use novashop_client::validate::NewAccount;
use novashop_core::ProductId;

use novashop_integration_tests::backend_url;

/// A registration form with a collision-free email and username.
fn throwaway_account() -> NewAccount {
    let tag = Uuid::new_v4().simple().to_string();
    NewAccount {
        full_name: "Integration Test".to_string(),
        email: format!("it-{tag}@novashop-tests.example"),
        username: format!("it_{tag}"),
        phone_number: "0555123456".to_string(),
        password: "integration-pass".to_string(),
    }
}

// ============================================================================
// Catalog
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running NovaShop backend"]
async fn test_list_products_decodes() {
    let api = ApiClient::new(backend_url());
    let products = api.list_products().await.unwrap();

    for product in &products {
        assert!(!product.name.is_empty());
    }
}

#[tokio::test]
#[ignore = "Requires a running NovaShop backend"]
async fn test_list_products_is_cached() {
    let api = ApiClient::new(backend_url());
    let first = api.list_products().await.unwrap();
    // Second read is served from cache; same contents either way.
    let second = api.list_products().await.unwrap();
    assert_eq!(first.len(), second.len());
}

#[tokio::test]
#[ignore = "Requires a running NovaShop backend"]
async fn test_missing_product_is_not_found() {
    let api = ApiClient::new(backend_url());
    let result = api.get_product(ProductId::new(i64::MAX)).await;
    assert!(matches!(result, Err(ApiError::NotFound(_))));
}

// ============================================================================
// Auth
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running NovaShop backend"]
async fn test_register_then_login_round_trip() {
    let api = ApiClient::new(backend_url());
    let mut session = SessionStore::new(api.clone(), Box::new(InMemorySessionStorage::new()));
    let account = throwaway_account();

    let identity = session.register(&account).await.unwrap();
    assert_eq!(identity.email, account.email);
    assert!(api.has_credential());

    session.logout().unwrap();
    assert!(!api.has_credential());

    let identity = session.login(&account.email, &account.password).await.unwrap();
    assert_eq!(identity.email, account.email);

    // Registering the same email again must report the conflict field.
    let mut other = SessionStore::new(api.clone(), Box::new(InMemorySessionStorage::new()));
    let mut duplicate = throwaway_account();
    duplicate.email = account.email.clone();
    assert!(matches!(
        other.register(&duplicate).await,
        Err(AuthError::FieldTaken { .. })
    ));
}

#[tokio::test]
#[ignore = "Requires a running NovaShop backend"]
async fn test_wrong_password_is_generic_rejection() {
    let api = ApiClient::new(backend_url());
    let mut session = SessionStore::new(api, Box::new(InMemorySessionStorage::new()));

    let result = session
        .login("nobody@novashop-tests.example", "wrong-password")
        .await;
    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    assert!(!session.is_authenticated());
}

// ============================================================================
// Orders
// ============================================================================

// Client-side guard; needs no backend.
#[tokio::test]
async fn test_orders_require_a_credential() {
    let api = ApiClient::new(backend_url());
    let result = api.list_orders().await;
    assert!(matches!(result, Err(ApiError::MissingCredential)));
}

#[tokio::test]
#[ignore = "Requires a running NovaShop backend"]
async fn test_fresh_account_has_no_orders() {
    let api = ApiClient::new(backend_url());
    let mut session = SessionStore::new(api.clone(), Box::new(InMemorySessionStorage::new()));
    session.register(&throwaway_account()).await.unwrap();

    let orders = api.list_orders().await.unwrap();
    assert!(orders.is_empty());
}
