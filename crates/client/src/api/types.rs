//! Domain types crossing the NovaShop REST boundary.
//!
//! Wire field names (`product_name`, `add_by_user`, `paymentLink`, ...)
//! are mapped to domain names with serde attributes here so the rest of
//! the crate never sees them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use novashop_core::{OrderId, ProductId, Role, UserId};

// =============================================================================
// Catalog Types
// =============================================================================

/// A catalog product as reported by the backend.
///
/// Read-only to this client; sellers mutate the catalog through
/// [`crate::api::ApiClient::create_product`] and
/// [`crate::api::ApiClient::delete_product`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(rename = "product_name")]
    pub name: String,
    #[serde(rename = "product_description", default)]
    pub description: String,
    #[serde(rename = "product_price", with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Stored picture reference; resolve with
    /// [`crate::config::ClientConfig::product_image_url`].
    #[serde(rename = "product_picture", default)]
    pub picture_ref: String,
    #[serde(rename = "add_by_user", default)]
    pub added_by: Option<UserId>,
    /// Average review rating; absent until the first review lands.
    #[serde(default)]
    pub rating: Option<f64>,
}

/// Seller-entered fields for a new product listing.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    /// The seller creating the listing.
    pub added_by: UserId,
}

// =============================================================================
// Identity Types
// =============================================================================

/// Authenticated user profile returned by the auth endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    #[serde(default)]
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub role: Role,
}

/// Credential + profile pair returned by a successful login or
/// registration.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub identity: Identity,
    pub token: String,
}

// =============================================================================
// Order Types
// =============================================================================

/// One line of an order, both as submitted at checkout and as echoed back
/// in order listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub quantity: u32,
}

/// Payload for `POST /order`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub user_id: UserId,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub shipping_address: String,
    pub items: Vec<OrderItem>,
}

/// A placed order as reported by `GET /order`.
///
/// Status fields are display-only: the backend offers no status-mutation
/// endpoint, so this client never edits them.
#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    pub id: OrderId,
    #[serde(alias = "userId", default)]
    pub user_id: Option<UserId>,
    #[serde(
        alias = "totalAmount",
        default,
        with = "rust_decimal::serde::float_option"
    )]
    pub total_amount: Option<Decimal>,
    #[serde(alias = "shippingAddress", default)]
    pub shipping_address: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(alias = "paymentStatus", default)]
    pub payment_status: Option<String>,
    #[serde(alias = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Fulfillment status label, `"pending"` when the backend omits it.
    #[must_use]
    pub fn status_label(&self) -> &str {
        self.status.as_deref().unwrap_or("pending")
    }

    /// Payment status label, `"pending"` when the backend omits it.
    #[must_use]
    pub fn payment_status_label(&self) -> &str {
        self.payment_status.as_deref().unwrap_or("pending")
    }
}

/// Gateway hand-off returned by `POST /order`. The shopper is sent to
/// `payment_link` to complete payment.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    pub payment_link: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_wire_names() {
        let json = r#"{
            "id": 3,
            "product_name": "Desk Lamp",
            "product_description": "Warm light",
            "product_price": 120.5,
            "product_picture": "lamp.jpg",
            "add_by_user": 7,
            "rating": 4.5
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.name, "Desk Lamp");
        assert_eq!(product.price, Decimal::new(1205, 1));
        assert_eq!(product.picture_ref, "lamp.jpg");
        assert_eq!(product.added_by, Some(UserId::new(7)));
        assert_eq!(product.rating, Some(4.5));
    }

    #[test]
    fn test_product_missing_optionals() {
        let json = r#"{"id": 1, "product_name": "Mug", "product_price": 20}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.description, "");
        assert_eq!(product.rating, None);
        assert_eq!(product.added_by, None);
    }

    #[test]
    fn test_order_draft_wire_names() {
        let draft = OrderDraft {
            user_id: UserId::new(1),
            total_amount: Decimal::from(250),
            shipping_address: "12 Rue Didouche".to_string(),
            items: vec![OrderItem {
                product_id: ProductId::new(3),
                name: "Desk Lamp".to_string(),
                price: Decimal::from(125),
                image: None,
                quantity: 2,
            }],
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["userId"], 1);
        assert_eq!(json["totalAmount"], 250.0);
        assert_eq!(json["shippingAddress"], "12 Rue Didouche");
        assert_eq!(json["items"][0]["productId"], 3);
        assert_eq!(json["items"][0]["quantity"], 2);
    }

    #[test]
    fn test_order_status_defaults_to_pending() {
        let json = r#"{"id": 9}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.status_label(), "pending");
        assert_eq!(order.payment_status_label(), "pending");
        assert!(order.items.is_empty());
    }

    #[test]
    fn test_order_accepts_both_casings() {
        let camel = r#"{"id": 1, "totalAmount": 99.5, "shippingAddress": "x"}"#;
        let snake = r#"{"id": 1, "total_amount": 99.5, "shipping_address": "x"}"#;
        let a: Order = serde_json::from_str(camel).unwrap();
        let b: Order = serde_json::from_str(snake).unwrap();
        assert_eq!(a.total_amount, b.total_amount);
        assert_eq!(a.shipping_address, b.shipping_address);
    }

    #[test]
    fn test_identity_defaults_role() {
        let json = r#"{"id": 2, "email": "user@example.com"}"#;
        let identity: Identity = serde_json::from_str(json).unwrap();
        assert_eq!(identity.role, Role::Customer);
    }
}
