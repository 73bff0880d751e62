//! Hexcart Core - Shared types library.
//!
//! This crate provides the domain types used across all Hexcart components:
//! - `storefront` - Cart controller, renderer and the page host server
//! - `cli` - Terminal front end for the same controller
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O and no HTTP clients. The types
//! mirror the JSON the remote cart service speaks, so they double as the wire
//! format.
//!
//! # Modules
//!
//! - [`types`] - Products, cart snapshots, order payloads, ids and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
