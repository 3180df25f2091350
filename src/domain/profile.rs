use super::payment::MaskedCard;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shipping destination.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Address {
    pub full_name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub phone: Option<String>,
}

/// An address-book entry saved for reuse across checkouts.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct SavedAddress {
    pub id: String,
    pub address: Address,
    pub created_at: DateTime<Utc>,
}

/// A saved payment method. Holds only the masked card, so the store can
/// never contain a full card number.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct SavedPaymentMethod {
    pub id: String,
    pub label: String,
    pub card: MaskedCard,
    pub created_at: DateTime<Utc>,
}
