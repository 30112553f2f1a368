//! Domain model for one search run: stores and the discounted products
//! they currently list.
//!
//! Entities are rebuilt from the API response on every run and dropped after
//! the report is rendered. Freshness of the listings (last update within two
//! days) is guaranteed by the upstream API and not re-checked here.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// A store returned by a search, with its products in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct Store {
    pub id: String,
    pub name: String,
    /// Chain name as reported by the API (e.g. `"netto"`, `"foetex"`).
    pub brand: Option<String>,
    pub address: Address,
    pub location: Option<GeoPoint>,
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub street: String,
    pub zip: String,
    pub city: String,
}

impl Address {
    /// Formats the address as `"street, zip city"`, skipping blank parts.
    #[must_use]
    pub fn one_line(&self) -> String {
        let locality = [self.zip.trim(), self.city.trim()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        [self.street.trim(), locality.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Unit the stock indicator is counted in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockUnit {
    Each,
    Kilogram,
    Gram,
    Other(String),
}

impl StockUnit {
    /// Maps the API's `stockUnit` string. Unknown units are kept verbatim.
    #[must_use]
    pub fn from_api(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "each" => Self::Each,
            "kg" => Self::Kilogram,
            "g" => Self::Gram,
            _ => Self::Other(raw.trim().to_string()),
        }
    }

    /// Danish display label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Each => "stk.",
            Self::Kilogram => "kg",
            Self::Gram => "g",
            Self::Other(s) => s,
        }
    }
}

/// A discounted product offered by a store.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub ean: Option<String>,
    pub description: String,
    pub original_price: Decimal,
    pub new_price: Decimal,
    pub currency: String,
    /// Stock indicator. Advisory only: the API does not guarantee it is
    /// real-time.
    pub stock: Decimal,
    pub stock_unit: StockUnit,
    pub start_time: Option<DateTime<Utc>>,
    /// When the offer expires.
    pub end_time: Option<DateTime<Utc>>,
    pub last_update: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
}

impl Product {
    /// Discount as a fraction of the original price, `(original - new) / original`.
    ///
    /// Returns zero when the original price is not positive.
    #[must_use]
    pub fn discount_fraction(&self) -> Decimal {
        if self.original_price <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        (self.original_price - self.new_price) / self.original_price
    }

    /// Discount in whole percent, rounded half away from zero.
    ///
    /// Never negative: an offer priced above its original price shows 0.
    #[must_use]
    pub fn discount_percent(&self) -> i64 {
        (self.discount_fraction() * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .unwrap_or(0)
            .max(0)
    }

    /// Stock normalised for ordering: kilograms count as 1000 units so a
    /// 2 kg offer outranks 30 pieces.
    #[must_use]
    pub fn stock_sort_key(&self) -> Decimal {
        match self.stock_unit {
            StockUnit::Kilogram => self.stock * Decimal::ONE_THOUSAND,
            _ => self.stock,
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub(crate) fn product(description: &str, stock: i64) -> Product {
        Product {
            ean: None,
            description: description.to_string(),
            original_price: Decimal::new(2000, 2),
            new_price: Decimal::new(1000, 2),
            currency: "DKK".to_string(),
            stock: Decimal::from(stock),
            stock_unit: StockUnit::Each,
            start_time: None,
            end_time: None,
            last_update: None,
            image_url: None,
        }
    }

    pub(crate) fn store(products: Vec<Product>) -> Store {
        Store {
            id: "store-1".to_string(),
            name: "Netto Aarhus C".to_string(),
            brand: Some("netto".to_string()),
            address: Address {
                street: "Banegårdspladsen 1".to_string(),
                zip: "8000".to_string(),
                city: "Aarhus C".to_string(),
            },
            location: Some(GeoPoint {
                lat: 56.15,
                lon: 10.2,
            }),
            products,
        }
    }
}
