use crate::error::LedgerError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog item as handed to the ledger by the storefront.
///
/// Products are read-only inputs: the ledger snapshots them into cart lines
/// and orders but never mutates them. The constructor enforces the two
/// invariants the rest of the crate relies on: a non-empty identifier and a
/// strictly positive unit price.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Product {
    /// Unique identifier within the catalog.
    pub id: String,
    pub title: String,
    pub author: String,
    /// Unit price in currency units.
    pub price: Decimal,
    /// Shipping weight in kilograms. Missing weights fall back to a nominal
    /// value during shipping calculation.
    pub weight: Option<Decimal>,
    pub category: Option<String>,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        price: Decimal,
    ) -> Result<Self, LedgerError> {
        let id = id.into();
        if id.is_empty() {
            return Err(LedgerError::Validation(
                "Product id must not be empty".to_string(),
            ));
        }
        if price <= Decimal::ZERO {
            return Err(LedgerError::Validation(
                "Product price must be positive".to_string(),
            ));
        }
        Ok(Self {
            id,
            title: title.into(),
            author: author.into(),
            price,
            weight: None,
            category: None,
        })
    }

    pub fn with_weight(mut self, weight: Decimal) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}
