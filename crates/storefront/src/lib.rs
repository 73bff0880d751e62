//! Hexcart storefront library.
//!
//! The single-page shop: a typed client for the remote cart service, the page
//! controller that drives it, markup rendering and the HTTP host that serves
//! the page. Exposed as a library so the CLI and tests can reuse it.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod middleware;
pub mod notify;
pub mod routes;
pub mod state;
pub mod view;

#[cfg(test)]
mod testing;
