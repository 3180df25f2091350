use super::ledger::CommerceLedger;
use crate::domain::cart::CartLine;
use crate::domain::order::{CheckoutData, Order};
use crate::domain::ports::PaymentGateway;
use crate::domain::profile::Address;
use crate::domain::shipping::{ShippingMethod, calculate_shipping};
use crate::error::{LedgerError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::info;

/// Flat tax applied to the cart subtotal.
pub const TAX_RATE: Decimal = dec!(0.08);

/// The totals shown to the customer before payment. These exact values are
/// captured into the order; nothing is recomputed after the charge.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct CheckoutTotals {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// Prices a set of cart lines for a shipping method.
pub fn quote(
    lines: &[CartLine],
    method: ShippingMethod,
    address: Option<&Address>,
) -> CheckoutTotals {
    let subtotal: Decimal = lines.iter().map(CartLine::total).sum();
    let shipping = calculate_shipping(lines, method, address);
    let tax = subtotal * TAX_RATE;
    CheckoutTotals {
        subtotal,
        shipping,
        tax,
        total: subtotal + shipping + tax,
    }
}

/// Runs the full checkout: quote the cart, charge the gateway, then record
/// the order with the receipt's transaction id.
///
/// Payment is authorized before `create_order` is ever called; a declined
/// charge leaves the cart and order history untouched. The ledger never
/// re-verifies the payment.
pub async fn checkout(
    ledger: &mut CommerceLedger,
    gateway: &dyn PaymentGateway,
    shipping_address: Address,
    card_number: &str,
    method: ShippingMethod,
) -> Result<Order> {
    if ledger.cart().is_empty() {
        return Err(LedgerError::EmptyCart);
    }

    let totals = quote(ledger.cart(), method, Some(&shipping_address));
    let receipt = gateway.charge(totals.total, card_number).await?;
    info!(
        amount = %totals.total,
        transaction_id = %receipt.transaction_id,
        "payment authorized"
    );

    ledger
        .create_order(CheckoutData {
            shipping_address,
            card_number: card_number.to_string(),
            shipping_method: method,
            subtotal: totals.subtotal,
            shipping: totals.shipping,
            tax: totals.tax,
            total: totals.total,
            transaction_id: receipt.transaction_id,
        })
        .await
}
