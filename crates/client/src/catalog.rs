//! Client-side catalog filtering and pagination.
//!
//! A pure derivation over the fetched product list: nothing here talks to
//! the network, and the filtered view is recomputed on every read. This
//! state is view-local, not shared between views.

use rust_decimal::Decimal;

use crate::api::types::Product;

/// Number of products shown per catalog page.
pub const PAGE_SIZE: usize = 6;

/// Price range used when the catalog is empty and no bounds can be
/// derived from it.
#[must_use]
pub fn fallback_price_range() -> (Decimal, Decimal) {
    (Decimal::ZERO, Decimal::ONE_THOUSAND)
}

/// Derive the catalog's inclusive `[min, max]` price bounds, falling back
/// to [`fallback_price_range`] for an empty catalog.
#[must_use]
pub fn price_bounds(products: &[Product]) -> (Decimal, Decimal) {
    let mut prices = products.iter().map(|p| p.price);
    prices.next().map_or_else(fallback_price_range, |first| {
        prices.fold((first, first), |(min, max), p| (min.min(p), max.max(p)))
    })
}

/// User-chosen search/price/rating constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub search: String,
    /// Inclusive price range.
    pub price_range: (Decimal, Decimal),
    /// Products missing a rating are treated as rated 0.
    pub min_rating: f64,
}

impl FilterCriteria {
    /// Criteria that match everything in `products`: empty search, price
    /// range seeded from the catalog bounds, no minimum rating.
    #[must_use]
    pub fn for_catalog(products: &[Product]) -> Self {
        Self {
            search: String::new(),
            price_range: price_bounds(products),
            min_rating: 0.0,
        }
    }

    /// Whether `product` passes all three predicates (ANDed).
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let query = self.search.trim().to_lowercase();
        let name_match = query.is_empty() || product.name.to_lowercase().contains(&query);

        let (min_price, max_price) = self.price_range;
        let price_match = product.price >= min_price && product.price <= max_price;

        let rating_match = product.rating.unwrap_or(0.0) >= self.min_rating;

        name_match && price_match && rating_match
    }
}

/// Filter `products` by `criteria`, preserving catalog order.
#[must_use]
pub fn filter_products<'a>(products: &'a [Product], criteria: &FilterCriteria) -> Vec<&'a Product> {
    products.iter().filter(|p| criteria.matches(p)).collect()
}

/// View-local state for the catalog page: the full product list, the
/// active filter criteria, and the requested page.
///
/// Any criteria change resets the page to 1, and the current page is
/// clamped into `[1, total_pages]` on every read, so shrinking the
/// filtered set can never leave the view past the end.
#[derive(Debug)]
pub struct CatalogView {
    products: Vec<Product>,
    criteria: FilterCriteria,
    page: usize,
}

impl CatalogView {
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        let criteria = FilterCriteria::for_catalog(&products);
        Self {
            products,
            criteria,
            page: 1,
        }
    }

    /// Replace the product list, reseeding the default criteria (the
    /// price bounds come from the new catalog) and returning to page 1.
    pub fn set_products(&mut self, products: Vec<Product>) {
        *self = Self::new(products);
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.criteria.search = search.into();
        self.page = 1;
    }

    pub fn set_price_range(&mut self, min: Decimal, max: Decimal) {
        self.criteria.price_range = (min, max);
        self.page = 1;
    }

    pub fn set_min_rating(&mut self, min_rating: f64) {
        self.criteria.min_rating = min_rating;
        self.page = 1;
    }

    /// Reset criteria to the catalog defaults ("Clear filters").
    pub fn clear_filters(&mut self) {
        self.criteria = FilterCriteria::for_catalog(&self.products);
        self.page = 1;
    }

    /// The filtered product list, in catalog order.
    #[must_use]
    pub fn filtered(&self) -> Vec<&Product> {
        filter_products(&self.products, &self.criteria)
    }

    /// Page count for the current filtered set; at least 1.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.filtered().len().div_ceil(PAGE_SIZE).max(1)
    }

    /// Requested page clamped into `[1, total_pages]`.
    #[must_use]
    pub fn current_page(&self) -> usize {
        self.page.clamp(1, self.total_pages())
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages());
    }

    pub fn next_page(&mut self) {
        self.set_page(self.current_page() + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.current_page().saturating_sub(1));
    }

    /// The slice of filtered products visible on the current page.
    #[must_use]
    pub fn page_items(&self) -> Vec<&Product> {
        let start = (self.current_page() - 1) * PAGE_SIZE;
        self.filtered().into_iter().skip(start).take(PAGE_SIZE).collect()
    }

    /// Results header line ("Showing x of y products").
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Showing {} of {} products",
            self.page_items().len(),
            self.filtered().len()
        )
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }
}
