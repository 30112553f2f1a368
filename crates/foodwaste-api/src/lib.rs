pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::FoodWasteClient;
pub use error::ApiError;
pub use normalize::{normalize_payload, optimize_image_url, parse_timestamp};
