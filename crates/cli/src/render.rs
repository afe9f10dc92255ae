//! Plain-text rendering for shell output.
//!
//! Everything here returns a `String`; the shell decides when to print.

use rust_decimal::Decimal;
use std::fmt::Write as _;

use novashop_client::api::types::{Order, Product};
use novashop_client::cart::CartStore;
use novashop_client::catalog::CatalogView;
use novashop_core::Price;

/// Format an amount in the store currency ("120.50 DA").
#[must_use]
pub fn amount(value: Decimal) -> String {
    Price::from_dinars(value).map_or_else(|_| format!("{value} DA"), |price| price.to_string())
}

fn rating_label(rating: Option<f64>) -> String {
    rating.map_or_else(|| "unrated".to_string(), |r| format!("{r:.1}/5"))
}

/// One catalog page plus the results header and pagination footer.
#[must_use]
pub fn catalog_page(view: &CatalogView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.summary());
    for product in view.page_items() {
        let _ = writeln!(
            out,
            "  #{:<4} {:<30} {:>12}  {}",
            product.id.as_i64(),
            product.name,
            amount(product.price),
            rating_label(product.rating),
        );
    }
    let _ = write!(out, "page {}/{}", view.current_page(), view.total_pages());
    out
}

/// Full product detail, with the resolved image URL when one exists.
#[must_use]
pub fn product_detail(product: &Product, image_url: Option<&str>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "#{} {}", product.id, product.name);
    let _ = writeln!(out, "  price:  {}", amount(product.price));
    let _ = writeln!(out, "  rating: {}", rating_label(product.rating));
    if !product.description.is_empty() {
        let _ = writeln!(out, "  {}", product.description);
    }
    if let Some(url) = image_url {
        let _ = writeln!(out, "  image:  {url}");
    }
    out.truncate(out.trim_end().len());
    out
}

/// Cart contents, per-line totals, and the subtotal.
#[must_use]
pub fn cart(cart: &CartStore) -> String {
    if cart.is_empty() {
        return "the cart is empty".to_string();
    }
    let mut out = String::new();
    for line in cart.items() {
        let _ = writeln!(
            out,
            "  #{:<4} {:<30} {:>3} x {:>10} = {}",
            line.product_id.as_i64(),
            line.name,
            line.quantity,
            amount(line.unit_price),
            amount(line.line_total()),
        );
    }
    let _ = write!(
        out,
        "{} item(s), subtotal {}",
        cart.total_quantity(),
        amount(cart.subtotal())
    );
    out
}

/// Order history table.
#[must_use]
pub fn orders(orders: &[Order]) -> String {
    if orders.is_empty() {
        return "no orders yet".to_string();
    }
    let mut out = String::new();
    for order in orders {
        let total = order
            .total_amount
            .map_or_else(|| "-".to_string(), amount);
        let placed = order
            .created_at
            .map_or_else(|| "-".to_string(), |at| at.format("%Y-%m-%d").to_string());
        let _ = writeln!(
            out,
            "  order #{:<4} {:>12}  placed {}  status: {}  payment: {}",
            order.id.as_i64(),
            total,
            placed,
            order.status_label(),
            order.payment_status_label(),
        );
    }
    out.truncate(out.trim_end().len());
    out
}
