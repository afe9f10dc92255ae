//! Typed REST client for the NovaShop backend.
//!
//! A thin, explicit wrapper over `reqwest`: one method per backend
//! endpoint, with response decoding split into pure helpers so status and
//! shape handling is unit-testable without a network. Catalog reads are
//! cached via `moka` (5-minute TTL) and invalidated by seller mutations.
//!
//! Calls are fire-and-forget: no retry, no deduplication, no timeout
//! beyond transport defaults. A failed call leaves client state untouched.

mod cache;
pub mod types;

use std::path::Path;
use std::sync::{Arc, RwLock};

use moka::future::Cache;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use novashop_core::ProductId;

use crate::error::AuthError;
use crate::validate::NewAccount;
use cache::{CacheValue, PRODUCTS_KEY, build_cache, product_key};
use types::{AuthSession, CheckoutSession, NewProduct, Order, OrderDraft, Product};

/// Header carrying the bearer credential, as expected by the backend.
pub const AUTH_HEADER: &str = "x-auth-token";

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connect, TLS, read).
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body did not have the expected shape.
    #[error("unexpected response body: {0}")]
    Parse(#[from] serde_json::Error),

    /// Non-2xx response without a more specific meaning.
    #[error("backend rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A protected call was attempted with no stored credential.
    #[error("no stored credential for a protected call")]
    MissingCredential,

    /// A product upload could not be read from disk.
    #[error("could not read upload: {0}")]
    Upload(#[from] std::io::Error),
}

/// Client for the NovaShop REST backend.
///
/// Cheap to clone; all clones share the HTTP connection pool, the
/// credential slot, and the catalog cache.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: String,
    credential: RwLock<Option<SecretString>>,
    cache: Cache<String, CacheValue>,
}

impl ApiClient {
    /// Create a client for the given backend origin (no trailing slash).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                http: reqwest::Client::new(),
                base_url: base_url.into(),
                credential: RwLock::new(None),
                cache: build_cache(),
            }),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// Install the bearer credential used for protected calls.
    pub fn set_credential(&self, token: SecretString) {
        if let Ok(mut slot) = self.inner.credential.write() {
            *slot = Some(token);
        }
    }

    /// Drop the stored credential.
    pub fn clear_credential(&self) {
        if let Ok(mut slot) = self.inner.credential.write() {
            *slot = None;
        }
    }

    /// Whether a credential is currently installed.
    #[must_use]
    pub fn has_credential(&self) -> bool {
        self.inner
            .credential
            .read()
            .map_or(false, |slot| slot.is_some())
    }

    fn credential(&self) -> Result<String, ApiError> {
        self.inner
            .credential
            .read()
            .ok()
            .and_then(|slot| slot.as_ref().map(|t| t.expose_secret().to_owned()))
            .ok_or(ApiError::MissingCredential)
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// `POST /auth/register`.
    ///
    /// # Errors
    ///
    /// On a non-2xx response the error carries the conflicting field name
    /// reported by the server when one is present.
    #[instrument(skip(self, account))]
    pub async fn register(&self, account: &NewAccount) -> Result<AuthSession, AuthError> {
        let response = self
            .inner
            .http
            .post(self.endpoint("/auth/register"))
            .json(account)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        let body = response.text().await.map_err(ApiError::from)?;
        if status.is_success() {
            decode_auth_session(&body).map_err(AuthError::from)
        } else {
            debug!(status = %status, "registration rejected");
            Err(decode_register_failure(status, &body))
        }
    }

    /// `POST /auth/login`.
    ///
    /// # Errors
    ///
    /// Any non-2xx response maps to [`AuthError::InvalidCredentials`]
    /// without revealing which field was wrong.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let response = self
            .inner
            .http
            .post(self.endpoint("/auth/login"))
            .json(&body)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = %status, "login rejected");
            return Err(AuthError::InvalidCredentials);
        }
        let text = response.text().await.map_err(ApiError::from)?;
        decode_auth_session(&text).map_err(AuthError::from)
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// `GET /products`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or an
    /// unrecognized body shape.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(PRODUCTS_KEY).await {
            debug!("cache hit for product list");
            return Ok(products.as_ref().clone());
        }

        let response = self
            .inner
            .http
            .get(self.endpoint("/products"))
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(rejected(status, &body));
        }

        let products = decode_products(&body)?;
        self.inner
            .cache
            .insert(
                PRODUCTS_KEY.to_string(),
                CacheValue::Products(Arc::new(products.clone())),
            )
            .await;
        Ok(products)
    }

    /// `GET /products/:id`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for a 404, otherwise transport and
    /// decoding errors.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, ApiError> {
        let key = product_key(id);
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&key).await {
            debug!("cache hit for product");
            return Ok(product.as_ref().clone());
        }

        let response = self
            .inner
            .http
            .get(self.endpoint(&format!("/products/{id}")))
            .send()
            .await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(format!("product {id}")));
        }
        let body = response.text().await?;
        if !status.is_success() {
            return Err(rejected(status, &body));
        }

        let product = decode_product(&body)?;
        self.inner
            .cache
            .insert(key, CacheValue::Product(Arc::new(product.clone())))
            .await;
        Ok(product)
    }

    /// `POST /products` (multipart, protected).
    ///
    /// `image` is an optional local file uploaded as the `pictures` part.
    /// Invalidates the cached product list on success.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingCredential`] when signed out, and
    /// [`ApiError::Upload`] when the image file cannot be read.
    #[instrument(skip(self, product, image))]
    pub async fn create_product(
        &self,
        product: &NewProduct,
        image: Option<&Path>,
    ) -> Result<Product, ApiError> {
        let token = self.credential()?;

        let mut form = reqwest::multipart::Form::new()
            .text("product_name", product.name.clone())
            .text("product_description", product.description.clone())
            .text("product_price", product.price.to_string())
            .text("add_by_user", product.added_by.to_string());
        if let Some(path) = image {
            let bytes = tokio::fs::read(path).await?;
            let file_name = path
                .file_name()
                .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());
            form = form.part(
                "pictures",
                reqwest::multipart::Part::bytes(bytes).file_name(file_name),
            );
        }

        let response = self
            .inner
            .http
            .post(self.endpoint("/products"))
            .header(AUTH_HEADER, token)
            .multipart(form)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(rejected(status, &body));
        }

        let created = decode_product(&body)?;
        self.inner.cache.invalidate(PRODUCTS_KEY).await;
        Ok(created)
    }

    /// `DELETE /products/:id` (protected).
    ///
    /// Invalidates both the cached list and the cached product on success.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingCredential`] when signed out and
    /// [`ApiError::NotFound`] for a 404.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        let token = self.credential()?;

        let response = self
            .inner
            .http
            .delete(self.endpoint(&format!("/products/{id}")))
            .header(AUTH_HEADER, token)
            .send()
            .await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(format!("product {id}")));
        }
        if !status.is_success() {
            let body = response.text().await?;
            return Err(rejected(status, &body));
        }

        self.inner.cache.invalidate(PRODUCTS_KEY).await;
        self.inner.cache.invalidate(&product_key(id)).await;
        Ok(())
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// `GET /order` (protected).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingCredential`] when signed out.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        let token = self.credential()?;

        let response = self
            .inner
            .http
            .get(self.endpoint("/order"))
            .header(AUTH_HEADER, token)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(rejected(status, &body));
        }
        decode_orders(&body)
    }

    /// `POST /order`: create an order and a payment session.
    ///
    /// # Errors
    ///
    /// Returns transport and decoding errors; the order is not created on
    /// failure.
    #[instrument(skip(self, draft), fields(items = draft.items.len()))]
    pub async fn create_order(&self, draft: &OrderDraft) -> Result<CheckoutSession, ApiError> {
        let response = self
            .inner
            .http
            .post(self.endpoint("/order"))
            .json(draft)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(rejected(status, &body));
        }
        decode_checkout_session(&body)
    }
}

// =============================================================================
// Response Decoding
// =============================================================================

fn rejected(status: StatusCode, body: &str) -> ApiError {
    ApiError::Rejected {
        status: status.as_u16(),
        message: snippet(body),
    }
}

/// Truncate a response body for error messages and logs.
fn snippet(body: &str) -> String {
    body.chars().take(200).collect()
}

/// `GET /products` body: either `{"products": [...]}` or a bare array.
/// Both shapes are live in the wild, so both are explicit variants here.
#[derive(Deserialize)]
#[serde(untagged)]
enum ProductsBody {
    Enveloped { products: Vec<Product> },
    Bare(Vec<Product>),
}

fn decode_products(body: &str) -> Result<Vec<Product>, ApiError> {
    match serde_json::from_str(body)? {
        ProductsBody::Enveloped { products } | ProductsBody::Bare(products) => Ok(products),
    }
}

/// Single-product body: `{"product": {...}}` or the bare object.
#[derive(Deserialize)]
#[serde(untagged)]
enum ProductBody {
    Enveloped { product: Product },
    Bare(Product),
}

fn decode_product(body: &str) -> Result<Product, ApiError> {
    match serde_json::from_str(body)? {
        ProductBody::Enveloped { product } | ProductBody::Bare(product) => Ok(product),
    }
}

#[derive(Deserialize)]
struct OrdersEnvelope {
    orders: Vec<Order>,
}

fn decode_orders(body: &str) -> Result<Vec<Order>, ApiError> {
    let envelope: OrdersEnvelope = serde_json::from_str(body)?;
    Ok(envelope.orders)
}

#[derive(Deserialize)]
struct CheckoutEnvelope {
    data: CheckoutData,
}

#[derive(Deserialize)]
struct CheckoutData {
    #[serde(rename = "paymentLink")]
    payment_link: String,
}

fn decode_checkout_session(body: &str) -> Result<CheckoutSession, ApiError> {
    let envelope: CheckoutEnvelope = serde_json::from_str(body)?;
    Ok(CheckoutSession {
        payment_link: envelope.data.payment_link,
    })
}

#[derive(Deserialize)]
struct AuthEnvelope {
    user: types::Identity,
    token: String,
}

fn decode_auth_session(body: &str) -> Result<AuthSession, ApiError> {
    let envelope: AuthEnvelope = serde_json::from_str(body)?;
    Ok(AuthSession {
        identity: envelope.user,
        token: envelope.token,
    })
}

/// Registration failure body: `{"error": [{"path": "email"}, ...]}`.
/// The first path names the conflicting field.
fn decode_register_failure(status: StatusCode, body: &str) -> AuthError {
    #[derive(Deserialize)]
    struct FieldErrors {
        error: Vec<FieldError>,
    }
    #[derive(Deserialize)]
    struct FieldError {
        path: String,
    }

    if let Ok(parsed) = serde_json::from_str::<FieldErrors>(body)
        && let Some(first) = parsed.error.first()
    {
        return AuthError::FieldTaken {
            field: first.path.clone(),
        };
    }
    AuthError::Api(rejected(status, body))
}
