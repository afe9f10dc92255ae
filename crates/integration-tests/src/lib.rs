//! Integration tests for the NovaShop client.
//!
//! # Running Tests
//!
//! ```bash
//! # Point the tests at a running backend
//! export NOVASHOP_TEST_BACKEND_URL=http://localhost:8000
//!
//! # Run the ignored-by-default backend tests
//! cargo test -p novashop-integration-tests -- --ignored
//! ```
//!
//! Tests that need a live backend carry `#[ignore]` so `cargo test` stays
//! green on machines without one. Tests that only exercise client-side
//! behavior run unconditionally.

#![cfg_attr(not(test), forbid(unsafe_code))]

/// Backend origin for live tests (configurable via environment).
#[must_use]
pub fn backend_url() -> String {
    std::env::var("NOVASHOP_TEST_BACKEND_URL")
        .unwrap_or_else(|_| "http://localhost:8000".to_string())
}
