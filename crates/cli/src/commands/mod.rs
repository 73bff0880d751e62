//! Shop commands run against the remote cart service.

pub mod shop;
pub mod terminal;
