//! Client-side commerce ledger: cart, checkout, orders and simulated
//! delivery tracking for a single storefront client.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
