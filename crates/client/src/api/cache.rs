//! In-memory cache for catalog reads.
//!
//! Values are wrapped in a single enum so one cache can hold the full
//! product list and individual products under string keys.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use novashop_core::ProductId;

use super::types::Product;

/// Catalog responses stay fresh for five minutes.
const CACHE_TTL: Duration = Duration::from_secs(300);
const CACHE_CAPACITY: u64 = 1000;

/// Cache key for the full product list.
pub(super) const PRODUCTS_KEY: &str = "products";

/// Values stored in the catalog cache.
#[derive(Clone)]
pub(super) enum CacheValue {
    Products(Arc<Vec<Product>>),
    Product(Arc<Product>),
}

pub(super) fn build_cache() -> Cache<String, CacheValue> {
    Cache::builder()
        .max_capacity(CACHE_CAPACITY)
        .time_to_live(CACHE_TTL)
        .build()
}

/// Cache key for a single product.
pub(super) fn product_key(id: ProductId) -> String {
    format!("product:{id}")
}
