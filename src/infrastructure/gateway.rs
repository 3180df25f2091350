use crate::domain::payment::PaymentReceipt;
use crate::domain::ports::PaymentGateway;
use crate::error::Result;
use async_trait::async_trait;
use rand::Rng;
use rand::distributions::Alphanumeric;
use rust_decimal::Decimal;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// A stand-in for a real payment processor.
///
/// Approves every charge after a configurable delay and hands back a
/// `txn_`-prefixed transaction id. The latency is there so callers handle
/// the gateway as the asynchronous collaborator it really is.
pub struct SimulatedGateway {
    latency: Duration,
}

impl SimulatedGateway {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(Duration::from_millis(2000))
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn charge(&self, amount: Decimal, _card_number: &str) -> Result<PaymentReceipt> {
        sleep(self.latency).await;
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(9)
            .map(|b| char::from(b).to_ascii_lowercase())
            .collect();
        let receipt = PaymentReceipt {
            transaction_id: format!("txn_{suffix}"),
        };
        debug!(amount = %amount, transaction_id = %receipt.transaction_id, "charge approved");
        Ok(receipt)
    }
}
