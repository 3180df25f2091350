use serde::{Deserialize, Serialize};

/// A payment card descriptor reduced to its displayable form.
///
/// Only the last four characters of the original number survive
/// construction; the full number is never held by this type and therefore
/// never reaches the store.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(transparent)]
pub struct MaskedCard(String);

impl MaskedCard {
    pub fn from_full(card_number: &str) -> Self {
        let digits: Vec<char> = card_number.chars().filter(|c| !c.is_whitespace()).collect();
        let suffix: String = digits[digits.len().saturating_sub(4)..].iter().collect();
        Self(format!("**** **** **** {suffix}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MaskedCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Successful response from the payment gateway.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct PaymentReceipt {
    pub transaction_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masking_keeps_last_four() {
        let card = MaskedCard::from_full("4111111111111234");
        assert_eq!(card.as_str(), "**** **** **** 1234");
    }

    #[test]
    fn test_masking_strips_spaces() {
        let card = MaskedCard::from_full("4111 1111 1111 1234");
        assert_eq!(card.as_str(), "**** **** **** 1234");
    }

    #[test]
    fn test_masking_short_input() {
        let card = MaskedCard::from_full("42");
        assert_eq!(card.as_str(), "**** **** **** 42");
    }

    #[test]
    fn test_full_number_not_recoverable_from_json() {
        let card = MaskedCard::from_full("4111111111111234");
        let json = serde_json::to_string(&card).unwrap();
        assert!(!json.contains("4111111111111234"));
        assert!(json.contains("1234"));
    }
}
