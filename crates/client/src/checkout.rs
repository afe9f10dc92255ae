//! Checkout flow: turn the cart into an order and interpret the payment
//! provider's return URL.
//!
//! The client never confirms payment itself. It creates the order, hands
//! the buyer the hosted payment link, and later learns the outcome from
//! the `status`/`order_id` query parameters on the return URL.

use url::Url;

use novashop_core::OrderId;

use crate::api::types::{CheckoutSession, OrderDraft, OrderItem};
use crate::api::ApiClient;
use crate::cart::{CartStore, LineItem};
use crate::error::ClientError;
use crate::session::SessionStore;
use crate::validate::ShippingDetails;

impl From<&LineItem> for OrderItem {
    fn from(line: &LineItem) -> Self {
        Self {
            product_id: line.product_id,
            name: line.name.clone(),
            price: line.unit_price,
            image: (!line.image_url.is_empty()).then(|| line.image_url.clone()),
            quantity: line.quantity,
        }
    }
}

/// Create an order for the cart contents and return the payment session.
///
/// The cart is left untouched; it is only cleared once the payment return
/// URL reports success.
///
/// # Errors
///
/// Returns [`ClientError::NotSignedIn`] without a signed-in identity,
/// [`ClientError::EmptyCart`] for an empty cart, validation errors for a
/// bad shipping form, and API errors from the order call.
pub async fn begin_checkout(
    api: &ApiClient,
    session: &SessionStore,
    cart: &CartStore,
    shipping: &ShippingDetails,
) -> Result<CheckoutSession, ClientError> {
    let identity = session.current().ok_or(ClientError::NotSignedIn)?;
    if cart.is_empty() {
        return Err(ClientError::EmptyCart);
    }
    shipping.validate()?;

    let draft = OrderDraft {
        user_id: identity.id,
        total_amount: cart.subtotal(),
        shipping_address: shipping.address.clone(),
        items: cart.items().iter().map(OrderItem::from).collect(),
    };
    Ok(api.create_order(&draft).await?)
}

/// Payment result decoded from the provider's return URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    Success { order_id: Option<OrderId> },
    Failed,
    Cancelled,
}

impl PaymentOutcome {
    /// Decode `?status=...&order_id=...` from a payment return URL.
    /// Unknown or missing statuses read as [`PaymentOutcome::Failed`].
    #[must_use]
    pub fn from_return_url(url: &Url) -> Self {
        let mut status = None;
        let mut order_id = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "status" => status = Some(value.into_owned()),
                "order_id" => order_id = value.parse().ok(),
                _ => {}
            }
        }
        match status.as_deref() {
            Some("success") => Self::Success { order_id },
            Some("cancelled") => Self::Cancelled,
            _ => Self::Failed,
        }
    }

    /// Whether the cart should be emptied in response to this outcome.
    #[must_use]
    pub const fn clears_cart(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
