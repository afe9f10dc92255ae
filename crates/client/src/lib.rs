//! NovaShop client library.
//!
//! Glue between the NovaShop REST backend and whatever front end drives
//! it: a typed API client plus the two client-side state containers
//! (cart and session) and the view-local catalog filter.
//!
//! # Architecture
//!
//! - The backend owns all persistent commerce data; this crate only holds
//!   per-session state (cart contents, signed-in identity) and a durable
//!   credential file.
//! - Network calls are fire-and-forget: no retry, no deduplication, no
//!   cancellation. A failed call surfaces once and leaves state unchanged.
//!
//! # Modules
//!
//! - [`api`] - Typed REST client (products, orders, auth)
//! - [`cart`] - In-memory shopping cart store
//! - [`catalog`] - Product filtering and pagination
//! - [`checkout`] - Order submission and gateway hand-off
//! - [`config`] - Environment configuration
//! - [`error`] - Error taxonomy
//! - [`session`] - Authenticated identity and durable credential storage
//! - [`validate`] - Client-side form validation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod session;
pub mod validate;
