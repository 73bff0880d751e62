//! Core types for Hexcart.
//!
//! This module provides type-safe wrappers for the cart service's domain.

pub mod cart;
pub mod id;
pub mod order;
pub mod price;
pub mod product;

pub use cart::{CartItem, CartSnapshot};
pub use id::*;
pub use order::{OrderConfirmation, OrderUser};
pub use price::Price;
pub use product::{Product, ProductList};
