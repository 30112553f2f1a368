//! Food-waste API response types.
//!
//! ## Observed shape
//!
//! The ZIP and coordinate searches return a JSON array (at most 20 entries);
//! the store lookup returns a single entry object. Each entry is
//! `{ "store": {...}, "clearances": [...] }`.
//!
//! ### `store.coordinates`
//! GeoJSON order: `[longitude, latitude]`, next to `"type": "Point"`.
//!
//! ### `offer`
//! Prices are JSON numbers in the offer's `currency` (normally `"DKK"`).
//! `stock` is a number whose meaning depends on `stockUnit` (`"each"`,
//! `"kg"`). Timestamps are UTC ISO-8601 strings with milliseconds, e.g.
//! `"2024-03-01T21:59:00.000Z"`.
//!
//! ### `product.image`
//! May be `null`, absent, or an empty string.
//!
//! Entries are deserialized one at a time from `serde_json::Value` so a
//! single malformed store or clearance does not fail the whole payload.

use rust_decimal::Decimal;
use serde::Deserialize;

/// One store and its clearances.
#[derive(Debug, Deserialize)]
pub struct RawStoreEntry {
    pub store: RawStore,
    /// Kept as raw values and parsed individually during normalization.
    #[serde(default)]
    pub clearances: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct RawStore {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub address: RawAddress,
    /// `[longitude, latitude]`.
    #[serde(default)]
    pub coordinates: Option<Vec<f64>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawAddress {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub city: String,
}

/// A single discounted product: the offer terms plus the product itself.
#[derive(Debug, Deserialize)]
pub struct RawClearance {
    pub offer: RawOffer,
    pub product: RawProduct,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOffer {
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub ean: Option<String>,
    pub original_price: Decimal,
    pub new_price: Decimal,
    #[serde(default)]
    pub stock: Option<Decimal>,
    #[serde(default)]
    pub stock_unit: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub last_update: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawProduct {
    pub description: String,
    #[serde(default)]
    pub ean: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}
