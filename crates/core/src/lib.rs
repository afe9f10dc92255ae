//! NovaShop Core - Shared types library.
//!
//! This crate provides the common types used across all NovaShop client
//! components:
//! - `client` - Storefront client library (API access, cart, session)
//! - `cli` - Terminal storefront driving the client library
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, phone
//!   numbers, and roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
