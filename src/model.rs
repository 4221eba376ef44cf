// Core structs: RawListing, AnalyticsRow, PriceHistogram and error types
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Price as the marketplace sends it: minor units plus a divisor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPrice {
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub divisor: Option<i64>,
}

/// One listing exactly as returned by the catalog endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListing {
    #[serde(default)]
    pub listing_id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<RawPrice>,
    #[serde(default)]
    pub num_favorers: Option<i64>,
    #[serde(default)]
    pub views: Option<i64>,
    #[serde(default)]
    pub review_count: Option<i64>,
    #[serde(default)]
    pub original_creation_timestamp: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Shop {
    pub shop_id: u64,
    #[serde(default)]
    pub shop_name: Option<String>,
    #[serde(default)]
    pub create_date: Option<i64>,
    /// Lifetime sales as reported by the marketplace (real, not estimated).
    #[serde(default)]
    pub transaction_sold_count: Option<u64>,
    #[serde(default)]
    pub review_count: Option<u64>,
    #[serde(default)]
    pub num_favorers: Option<u64>,
    #[serde(default)]
    pub listing_active_count: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingImage {
    #[serde(default)]
    pub url_75x75: Option<String>,
    #[serde(default)]
    pub url_170x135: Option<String>,
    #[serde(default)]
    pub url_fullxfull: Option<String>,
}

impl ListingImage {
    /// Smallest available rendition.
    pub fn thumbnail(&self) -> Option<&str> {
        self.url_75x75
            .as_deref()
            .or(self.url_170x135.as_deref())
            .or(self.url_fullxfull.as_deref())
    }
}

/// Envelope used by every list endpoint of the API.
#[derive(Debug, Deserialize)]
pub struct ApiPage<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Trend {
    Up,
    Flat,
    Down,
}

impl Trend {
    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Flat => "→",
            Trend::Down => "↓",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsRow {
    pub listing_id: Option<u64>,
    pub title: String,
    pub price: Option<f64>,
    pub favorites: i64,
    pub views: i64,
    pub reviews: i64,
    pub age_days: i64,
    pub age_label: String,
    pub thumbnail: String,
    pub sales: u64,
    pub revenue: f64,
    pub trend: Trend,
    pub growth_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBin {
    pub lower_bound: i64,
    pub upper_bound: i64,
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceHistogram {
    pub avg: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub bins: Vec<PriceBin>,
    pub max_bin_count: u64,
}

impl PriceHistogram {
    pub fn empty() -> Self {
        Self {
            avg: None,
            min: None,
            max: None,
            bins: Vec::new(),
            max_bin_count: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FilterThresholds {
    #[serde(default = "default_min_favorites")]
    pub min_favorites: i64,
    #[serde(default = "default_max_age_days")]
    pub max_age_days: i64,
    #[serde(default = "default_min_views")]
    pub min_views: i64,
}

fn default_min_favorites() -> i64 {
    5
}

fn default_max_age_days() -> i64 {
    30
}

fn default_min_views() -> i64 {
    50
}

impl Default for FilterThresholds {
    fn default() -> Self {
        Self {
            min_favorites: default_min_favorites(),
            max_age_days: default_max_age_days(),
            min_views: default_min_views(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API responded with status {0}")]
    Status(u16),
    #[error("shop '{0}' not found")]
    ShopNotFound(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Please enter API key and store name.")]
    MissingCredentials,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Shop not found or API key is invalid ({0})")]
    ShopUnavailable(#[source] ApiError),
    #[error("API client error: {0}")]
    Api(#[from] ApiError),
    #[error("Report rendering error: {0}")]
    Render(#[from] serde_json::Error),
}
