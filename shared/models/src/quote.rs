//! Price quote models.
//!
//! Quotes are transient: produced by the lookup client, persisted as
//! `NewPriceResult` records and then dropped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Currency attached to every quote. The lookup service's own currency is
/// not inspected.
pub const QUOTE_CURRENCY: &str = "EUR";

/// Shop name used when the service returns neither a brand nor a title.
pub const UNKNOWN_SHOP: &str = "unknown";

/// One external price result for a part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub shop: String,
    pub price: Option<f64>,
    pub currency: String,
}

impl Quote {
    pub fn new(shop: impl Into<String>, price: Option<f64>) -> Self {
        Self {
            shop: shop.into(),
            price,
            currency: QUOTE_CURRENCY.to_string(),
        }
    }
}

/// Record appended to the result store, one per quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPriceResult {
    pub user_id: String,
    pub manufacturer: String,
    pub part_number: String,
    pub shop: String,
    pub price: Option<f64>,
    pub currency: String,
}

impl NewPriceResult {
    pub fn from_quote(
        user_id: &str,
        manufacturer: &str,
        part_number: &str,
        quote: &Quote,
    ) -> Self {
        Self {
            user_id: user_id.to_string(),
            manufacturer: manufacturer.to_string(),
            part_number: part_number.to_string(),
            shop: quote.shop.clone(),
            price: quote.price,
            currency: quote.currency.clone(),
        }
    }
}

/// Stored price result as returned by the result store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PriceResult {
    pub id: Uuid,
    pub user_id: String,
    pub manufacturer: String,
    pub part_number: String,
    pub shop: String,
    pub price: Option<f64>,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

impl PriceResult {
    pub fn from_new(record: NewPriceResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: record.user_id,
            manufacturer: record.manufacturer,
            part_number: record.part_number,
            shop: record.shop,
            price: record.price,
            currency: record.currency,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_currency_is_fixed() {
        let quote = Quote::new("X", Some(9.99));
        assert_eq!(quote.currency, "EUR");
    }

    #[test]
    fn test_record_from_quote() {
        let quote = Quote::new("Shop", None);
        let record = NewPriceResult::from_quote("user-1", "Acme", "123", &quote);

        assert_eq!(record.user_id, "user-1");
        assert_eq!(record.part_number, "123");
        assert_eq!(record.shop, "Shop");
        assert_eq!(record.price, None);
        assert_eq!(record.currency, QUOTE_CURRENCY);
    }
}
