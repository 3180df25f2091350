use super::cart::CartLine;
use super::profile::Address;
use chrono::Duration;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Orders at or above this subtotal ship for free, regardless of method or
/// weight.
pub const FREE_SHIPPING_THRESHOLD: Decimal = dec!(1500);

/// Nominal weight (kg) assumed for products that do not declare one.
pub const DEFAULT_ITEM_WEIGHT: Decimal = dec!(0.5);

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShippingMethod {
    #[default]
    Standard,
    Express,
    Overnight,
}

/// Fee schedule for one shipping method.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct ShippingRate {
    pub base: Decimal,
    pub per_kg: Decimal,
    pub days: i64,
}

impl ShippingMethod {
    pub fn rate(&self) -> ShippingRate {
        match self {
            Self::Standard => ShippingRate {
                base: dec!(99),
                per_kg: dec!(40),
                days: 7,
            },
            Self::Express => ShippingRate {
                base: dec!(199),
                per_kg: dec!(60),
                days: 3,
            },
            Self::Overnight => ShippingRate {
                base: dec!(399),
                per_kg: dec!(120),
                days: 1,
            },
        }
    }

    /// The promised delivery window.
    pub fn delivery_window(&self) -> Duration {
        Duration::days(self.rate().days)
    }
}

impl std::fmt::Display for ShippingMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Express => write!(f, "express"),
            Self::Overnight => write!(f, "overnight"),
        }
    }
}

/// Computes the shipping fee for a set of cart lines.
///
/// The free-shipping override is checked against the subtotal before any
/// weight arithmetic: at or above the threshold the fee is zero, full stop.
/// Below it the fee is `base + per_kg * total_weight`, with missing product
/// weights defaulting to [`DEFAULT_ITEM_WEIGHT`].
///
/// The address is accepted for signature stability but does not influence
/// the fee; there is no regional pricing.
pub fn calculate_shipping(
    lines: &[CartLine],
    method: ShippingMethod,
    _address: Option<&Address>,
) -> Decimal {
    let subtotal: Decimal = lines.iter().map(CartLine::total).sum();
    if subtotal >= FREE_SHIPPING_THRESHOLD {
        return Decimal::ZERO;
    }

    let weight: Decimal = lines
        .iter()
        .map(|l| l.product.weight.unwrap_or(DEFAULT_ITEM_WEIGHT) * Decimal::from(l.quantity))
        .sum();
    let rate = method.rate();
    rate.base + rate.per_kg * weight
}
