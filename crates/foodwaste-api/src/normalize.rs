//! Normalization from raw API payloads to [`foodwaste_core::Store`] values.
//!
//! Malformed stores and clearances are dropped with a warning; only a payload
//! that is neither a store entry nor a list of them is an error.

use chrono::{DateTime, Utc};
use foodwaste_core::{Address, GeoPoint, Product, StockUnit, Store};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::error::ApiError;
use crate::types::{RawClearance, RawStoreEntry};

const CDN_HOST: &str = "digitalassets.sallinggroup.com";
const LEGACY_DAM_HOST: &str = "dam.dsg.dk";
const CDN_IMAGE_PREFIX: &str = "https://digitalassets.sallinggroup.com/image/upload/e_trim/c_limit,e_sharpen:80,f_auto,q_auto,w_400,h_400/";

/// Normalizes a parsed response body into stores, in API order.
///
/// Accepts both the array returned by ZIP/coordinate searches and the single
/// object returned by the store lookup.
///
/// # Errors
///
/// Returns [`ApiError::Payload`] if the body is neither an object nor an array.
pub fn normalize_payload(payload: Value) -> Result<Vec<Store>, ApiError> {
    let entries = match payload {
        Value::Array(entries) => entries,
        Value::Object(_) => vec![payload],
        other => {
            return Err(ApiError::Payload(format!(
                "expected an array of stores or a store object, got {}",
                json_kind(&other)
            )))
        }
    };

    let stores: Vec<Store> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| normalize_entry(index, entry))
        .collect();

    tracing::debug!(
        stores = stores.len(),
        products = stores.iter().map(|s| s.products.len()).sum::<usize>(),
        "normalized food-waste payload"
    );
    Ok(stores)
}

fn normalize_entry(index: usize, entry: Value) -> Option<Store> {
    let raw = match serde_json::from_value::<RawStoreEntry>(entry) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(index, error = %e, "dropping malformed store entry");
            return None;
        }
    };

    let store_id = raw.store.id;
    let products = raw
        .clearances
        .into_iter()
        .filter_map(|clearance| normalize_clearance(&store_id, clearance))
        .collect();

    // GeoJSON order is [lon, lat].
    let location = match raw.store.coordinates.as_deref() {
        Some([lon, lat, ..]) => Some(GeoPoint {
            lat: *lat,
            lon: *lon,
        }),
        _ => None,
    };

    Some(Store {
        id: store_id,
        name: raw.store.name,
        brand: raw.store.brand.filter(|s| !s.is_empty()),
        address: Address {
            street: raw.store.address.street,
            zip: raw.store.address.zip,
            city: raw.store.address.city,
        },
        location,
        products,
    })
}

fn normalize_clearance(store_id: &str, clearance: Value) -> Option<Product> {
    let raw = match serde_json::from_value::<RawClearance>(clearance) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(store_id, error = %e, "dropping malformed product");
            return None;
        }
    };

    let description = raw.product.description.trim().to_string();
    if description.is_empty() {
        tracing::warn!(store_id, "dropping product with empty description");
        return None;
    }

    let ean = raw
        .product
        .ean
        .or(raw.offer.ean)
        .filter(|s| !s.trim().is_empty());

    Some(Product {
        ean,
        description,
        original_price: raw.offer.original_price,
        new_price: raw.offer.new_price,
        currency: raw
            .offer
            .currency
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| "DKK".to_string()),
        stock: raw.offer.stock.unwrap_or(Decimal::ZERO),
        stock_unit: StockUnit::from_api(raw.offer.stock_unit.as_deref().unwrap_or("each")),
        start_time: raw.offer.start_time.as_deref().and_then(parse_timestamp),
        end_time: raw.offer.end_time.as_deref().and_then(parse_timestamp),
        last_update: raw.offer.last_update.as_deref().and_then(parse_timestamp),
        image_url: raw.product.image.as_deref().and_then(optimize_image_url),
    })
}

/// Parses an ISO-8601 / RFC 3339 timestamp such as `"2024-03-01T21:59:00.000Z"`.
///
/// Returns `None` if the string does not parse.
#[must_use]
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Rewrites a product image URL to the resized CDN form.
///
/// Legacy `dam.dsg.dk/.../id/<asset>/...` URLs are rebuilt from their asset
/// ID; CDN URLs and anything unrecognised pass through unchanged. Blank
/// input yields `None` so the renderer can skip the image entirely.
#[must_use]
pub fn optimize_image_url(raw: &str) -> Option<String> {
    let url = raw.trim();
    if url.is_empty() {
        return None;
    }
    if url.contains(CDN_HOST) || !url.contains(LEGACY_DAM_HOST) {
        return Some(url.to_string());
    }

    let asset_id = url
        .split_once("/id/")
        .map(|(_, rest)| rest.split('/').next().unwrap_or_default())
        .filter(|id| !id.is_empty());

    match asset_id {
        Some(id) => Some(format!("{CDN_IMAGE_PREFIX}{id}")),
        None => Some(url.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
