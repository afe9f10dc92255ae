//! In-memory shopping cart state container.
//!
//! The cart lives for the duration of the process (one shopping session)
//! and is never persisted. Each product appears in at most one line;
//! adding a product already in the cart merges quantities. Price and
//! image are captured when the item is added and are not re-synced
//! against the catalog afterwards.

use rust_decimal::Decimal;

use novashop_core::ProductId;

use crate::api::types::Product;

/// One product + quantity entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub product_id: ProductId,
    pub name: String,
    /// Unit price captured at add time.
    pub unit_price: Decimal,
    /// Resolved image URL captured at add time.
    pub image_url: String,
    /// Always at least 1.
    pub quantity: u32,
}

impl LineItem {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Shopping cart: line items in insertion order plus a drawer visibility
/// flag.
///
/// Derived totals are recomputed from the current contents on every read;
/// nothing is cached.
#[derive(Debug, Default)]
pub struct CartStore {
    items: Vec<LineItem>,
    is_open: bool,
}

impl CartStore {
    /// An empty, closed cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` of `product`, merging into the existing line when
    /// the product is already in the cart. Opens the drawer.
    ///
    /// `image_url` is the resolved image location for the snapshot (see
    /// [`crate::config::ClientConfig::product_image_url`]). Quantities
    /// below 1 are clamped to 1.
    pub fn add_item(&mut self, product: &Product, image_url: String, quantity: u32) {
        let quantity = quantity.max(1);
        if let Some(existing) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            existing.quantity += quantity;
        } else {
            self.items.push(LineItem {
                product_id: product.id,
                name: product.name.clone(),
                unit_price: product.price,
                image_url,
                quantity,
            });
        }
        self.open();
    }

    /// Add a single unit of `product`.
    pub fn add_item_one(&mut self, product: &Product, image_url: String) {
        self.add_item(product, image_url, 1);
    }

    /// Replace the quantity of an existing line. Values below 1 are
    /// clamped to 1 so the line invariant holds regardless of the caller.
    /// No-op when the product is not in the cart.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: u32) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            item.quantity = quantity.max(1);
        }
    }

    /// Remove a line. No-op when the product is not in the cart.
    pub fn remove_item(&mut self, product_id: ProductId) {
        self.items.retain(|i| i.product_id != product_id);
    }

    /// Empty the cart. The drawer flag is untouched.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Show the cart drawer. Contents are unaffected.
    pub fn open(&mut self) {
        self.is_open = true;
    }

    /// Hide the cart drawer. Contents are unaffected.
    pub fn close(&mut self) {
        self.is_open = false;
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines (not units).
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of unit price x quantity across all lines.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(LineItem::line_total).sum()
    }
}
