pub mod app_config;
pub mod config;
pub mod error;
pub mod model;
pub mod search;
pub mod sort;

pub use app_config::AppConfig;
pub use config::{build_app_config, DEFAULT_API_BASE_URL, DEFAULT_FONT_FAMILY};
pub use error::{ConfigError, ValidationError};
pub use model::{Address, GeoPoint, Product, StockUnit, Store};
pub use search::{SearchQuery, SearchRequest, DEFAULT_RADIUS_KM};
pub use sort::{sort_by_stock, sort_stores};
