use super::cart::CartLine;
use super::payment::MaskedCard;
use super::profile::Address;
use super::shipping::ShippingMethod;
use crate::error::LedgerError;
use chrono::{DateTime, Utc};
use rand::Rng;
use rand::distributions::Alphanumeric;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Prefix shared by order and tracking identifiers.
const ID_PREFIX: &str = "DV";
/// Length of the random part of a tracking identifier.
const TRACKING_ID_LEN: usize = 9;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// The explicit transition table. Orders move forward through
    /// Confirmed -> Processing -> Shipped -> Delivered; cancellation is
    /// only possible before shipping. Delivered and Cancelled are
    /// terminal. Every other pair is rejected.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Confirmed, Processing)
                | (Processing, Shipped)
                | (Shipped, Delivered)
                | (Confirmed, Cancelled)
                | (Processing, Cancelled)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Confirmed => "confirmed",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Everything the checkout flow hands to the ledger to turn the cart into
/// an order. The totals are the ones shown to the customer — the ledger
/// captures them verbatim and never recomputes.
#[derive(Debug, Clone)]
pub struct CheckoutData {
    pub shipping_address: Address,
    /// Full card number as entered. Masked before it touches the order.
    pub card_number: String,
    pub shipping_method: ShippingMethod,
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    /// Transaction id of the already-authorized payment.
    pub transaction_id: String,
}

/// An immutable record of one completed checkout.
///
/// Only `status` and `updated_at` ever change after creation, and only
/// through [`Order::transition`].
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Order {
    pub id: String,
    pub items: Vec<CartLine>,
    pub shipping_address: Address,
    pub payment_card: MaskedCard,
    pub shipping_method: ShippingMethod,
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub transaction_id: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub tracking_id: String,
    pub estimated_delivery: DateTime<Utc>,
}

impl Order {
    /// Builds a confirmed order from checkout data and a cart snapshot.
    ///
    /// The order id embeds the creation instant at microsecond resolution,
    /// which is unique for any realistic single-client session.
    pub fn create(data: CheckoutData, items: Vec<CartLine>, now: DateTime<Utc>) -> Self {
        Self {
            id: format!("{ID_PREFIX}{}", now.timestamp_micros()),
            items,
            shipping_address: data.shipping_address,
            payment_card: MaskedCard::from_full(&data.card_number),
            shipping_method: data.shipping_method,
            subtotal: data.subtotal,
            shipping: data.shipping,
            tax: data.tax,
            total: data.total,
            transaction_id: data.transaction_id,
            status: OrderStatus::Confirmed,
            created_at: now,
            updated_at: None,
            tracking_id: generate_tracking_id(),
            estimated_delivery: now + data.shipping_method.delivery_window(),
        }
    }

    /// Moves the order to `next`, rejecting anything outside the
    /// transition table.
    pub fn transition(&mut self, next: OrderStatus, now: DateTime<Utc>) -> Result<(), LedgerError> {
        if !self.status.can_transition_to(next) {
            return Err(LedgerError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        self.updated_at = Some(now);
        Ok(())
    }
}

/// An opaque tracking identifier: the shared prefix plus nine random
/// uppercase alphanumerics. It has no external meaning.
pub fn generate_tracking_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TRACKING_ID_LEN)
        .map(|b| char::from(b).to_ascii_uppercase())
        .collect();
    format!("{ID_PREFIX}{suffix}")
}
