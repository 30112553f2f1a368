//! Search requests and the query shapes they translate to.
//!
//! A [`SearchRequest`] is only constructed from validated parameters, so an
//! invalid ZIP, coordinate, radius or store ID is rejected here, before any
//! network call is attempted.

use std::fmt;

use crate::ValidationError;

/// Radius used for coordinate searches when none is given.
pub const DEFAULT_RADIUS_KM: f64 = 5.0;

/// One of the three supported search modes.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchRequest {
    Zip(String),
    Coordinates { lat: f64, lon: f64, radius_km: f64 },
    StoreId(String),
}

/// Endpoint shape for a request: an optional path segment below the base
/// URL plus query parameters in the order they are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub path_segment: Option<String>,
    pub params: Vec<(&'static str, String)>,
}

impl SearchQuery {
    /// Renders the parameters as `key=value` pairs joined by `&`, unencoded.
    #[must_use]
    pub fn query_string(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl SearchRequest {
    /// Builds a ZIP search. Only non-emptiness is checked; the API decides
    /// which codes it knows.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyZip`] for a blank code.
    pub fn zip(code: &str) -> Result<Self, ValidationError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(ValidationError::EmptyZip);
        }
        Ok(Self::Zip(code.to_string()))
    }

    /// Builds a coordinate search from already-parsed numbers.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when latitude or longitude is out of
    /// range or the radius is not a finite positive number.
    pub fn coordinates(
        lat: f64,
        lon: f64,
        radius_km: Option<f64>,
    ) -> Result<Self, ValidationError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(ValidationError::InvalidLatitude(lat.to_string()));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(ValidationError::InvalidLongitude(lon.to_string()));
        }
        let radius_km = radius_km.unwrap_or(DEFAULT_RADIUS_KM);
        if !radius_km.is_finite() || radius_km <= 0.0 {
            return Err(ValidationError::InvalidRadius(radius_km.to_string()));
        }
        Ok(Self::Coordinates {
            lat,
            lon,
            radius_km,
        })
    }

    /// Builds a coordinate search from raw user input. A missing or blank
    /// radius falls back to [`DEFAULT_RADIUS_KM`]. A decimal comma is
    /// accepted in place of a point.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when any value does not parse or is out
    /// of range.
    pub fn parse_coordinates(
        lat: &str,
        lon: &str,
        radius_km: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let lat_value = parse_decimal(lat)
            .ok_or_else(|| ValidationError::InvalidLatitude(lat.trim().to_string()))?;
        let lon_value = parse_decimal(lon)
            .ok_or_else(|| ValidationError::InvalidLongitude(lon.trim().to_string()))?;
        let radius_value = match radius_km.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(
                parse_decimal(raw)
                    .ok_or_else(|| ValidationError::InvalidRadius(raw.to_string()))?,
            ),
            None => None,
        };
        Self::coordinates(lat_value, lon_value, radius_value)
    }

    /// Builds a single-store lookup. The ID is embedded in the URL path, so
    /// path and query delimiters are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyStoreId`] or
    /// [`ValidationError::InvalidStoreId`].
    pub fn store_id(id: &str) -> Result<Self, ValidationError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ValidationError::EmptyStoreId);
        }
        if id
            .chars()
            .any(|c| matches!(c, '/' | '?' | '#') || c.is_whitespace())
        {
            return Err(ValidationError::InvalidStoreId(id.to_string()));
        }
        Ok(Self::StoreId(id.to_string()))
    }

    /// Translates the request into its endpoint shape:
    ///
    /// - ZIP: `zip={code}`
    /// - coordinates: `geo={lat},{lon}&radius={radius_km}`
    /// - store ID: path segment `{id}`, no query string
    #[must_use]
    pub fn to_query(&self) -> SearchQuery {
        match self {
            Self::Zip(code) => SearchQuery {
                path_segment: None,
                params: vec![("zip", code.clone())],
            },
            Self::Coordinates {
                lat,
                lon,
                radius_km,
            } => SearchQuery {
                path_segment: None,
                params: vec![("geo", format!("{lat},{lon}")), ("radius", radius_km.to_string())],
            },
            Self::StoreId(id) => SearchQuery {
                path_segment: Some(id.clone()),
                params: Vec::new(),
            },
        }
    }

    /// Short mode name for logs.
    #[must_use]
    pub fn mode(&self) -> &'static str {
        match self {
            Self::Zip(_) => "zip",
            Self::Coordinates { .. } => "coordinates",
            Self::StoreId(_) => "store",
        }
    }
}

impl fmt::Display for SearchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zip(code) => write!(f, "postnummer {code}"),
            Self::Coordinates {
                lat,
                lon,
                radius_km,
            } => write!(f, "{radius_km} km omkring {lat},{lon}"),
            Self::StoreId(id) => write!(f, "butik {id}"),
        }
    }
}

fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim().replace(',', ".").parse::<f64>().ok()
}
