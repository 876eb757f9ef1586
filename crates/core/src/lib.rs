//! Sellerdesk Core - Shared types library.
//!
//! This crate provides common types used across all Sellerdesk components:
//! - `panel` - Seller-facing admin panel service
//! - `cli` - Command-line tools for operators
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no async.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money amounts, emails,
//!   and the status enumerations with lenient normalization

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
