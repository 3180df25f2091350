use super::payment::PaymentReceipt;
use crate::error::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::io;

/// Durable string store scoped to one client. The only encoding
/// requirement is round-trip fidelity.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> io::Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> io::Result<()>;
    async fn remove(&self, key: &str) -> io::Result<()>;
}

pub type KvStoreBox = Box<dyn KvStore>;

/// External payment collaborator. Authorization happens here, before the
/// ledger ever sees the checkout; the ledger only records the resulting
/// transaction id.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(&self, amount: Decimal, card_number: &str) -> Result<PaymentReceipt>;
}
