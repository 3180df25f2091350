use super::product::Product;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One cart entry: a product snapshot plus the quantity selected.
///
/// Invariant: the quantity is always at least 1. A quantity of zero means
/// the line is removed, never stored.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Line total: unit price times quantity.
    pub fn total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// The mutable pre-purchase collection for one client.
///
/// Lines keep insertion order. At most one line exists per product id;
/// adding the same product again merges into the existing line.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Clone)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Adds `quantity` units of `product`, merging into an existing line
    /// for the same product id. A zero quantity is ignored.
    pub fn add(&mut self, product: &Product, quantity: u32, now: DateTime<Utc>) {
        if quantity == 0 {
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            line.quantity += quantity;
        } else {
            self.lines.push(CartLine {
                product: product.clone(),
                quantity,
                added_at: now,
            });
        }
    }

    /// Sets (not increments) the quantity of the line for `product_id`.
    /// Zero removes the line; an unknown id is a no-op.
    pub fn set_quantity(&mut self, product_id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product_id) {
            line.quantity = quantity;
        }
    }

    /// Removes the line for `product_id`. Idempotent.
    pub fn remove(&mut self, product_id: &str) {
        self.lines.retain(|l| l.product.id != product_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of unit price times quantity over all lines.
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::total).sum()
    }

    /// Sum of quantities over all lines.
    pub fn count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}
