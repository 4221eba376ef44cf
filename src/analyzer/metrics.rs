//! Heuristic listing metrics derived from public engagement signals.
//!
//! None of these numbers are real sales data. Every function is total:
//! out-of-range inputs are clamped instead of rejected.

use crate::model::Trend;

/// Views that roughly correspond to one sale.
pub const VIEWS_PER_SALE: f64 = 140.0;
/// Favorites that roughly correspond to one sale.
pub const FAVORITES_PER_SALE: f64 = 4.0;
pub const SALES_BASE_MULTIPLIER: f64 = 0.9;
pub const RECENCY_WEIGHT: f64 = 1.25;
/// Days over which the recency bonus halves.
pub const RECENCY_HALF_LIFE_DAYS: f64 = 120.0;

pub const TREND_AGE_HALF_LIFE_DAYS: f64 = 180.0;
pub const TREND_AGE_WEIGHT: f64 = 8.0;
pub const TREND_UP_THRESHOLD: f64 = 4.0;
pub const TREND_FLAT_THRESHOLD: f64 = 2.0;

pub const GROWTH_VIEWS_WEIGHT: f64 = 1.4;
pub const GROWTH_FAVORITES_WEIGHT: f64 = 18.0;
pub const GROWTH_CAP: f64 = 250.0;

/// Estimated number of units sold.
pub fn estimate_sales(views: i64, favorites: i64, age_days: i64) -> u64 {
    let views = views.max(0) as f64;
    let favorites = favorites.max(0) as f64;
    let age_days = age_days.max(1) as f64;

    let base = views / VIEWS_PER_SALE + favorites / FAVORITES_PER_SALE;
    let recent_factor = RECENCY_WEIGHT / (1.0 + age_days / RECENCY_HALF_LIFE_DAYS);
    let sales = (base * (SALES_BASE_MULTIPLIER + recent_factor)).round();

    sales.max(0.0) as u64
}

/// Estimated revenue in currency units, rounded to cents. Unknown price counts as 0.
pub fn estimate_revenue(sales: u64, price: Option<f64>) -> f64 {
    let revenue = sales as f64 * price.unwrap_or(0.0);
    ((revenue * 100.0).round() / 100.0).max(0.0)
}

/// Raw trend score; higher means more engagement per view and a younger listing.
pub fn trend_score(views: i64, favorites: i64, age_days: i64) -> f64 {
    let views = views.max(1) as f64;
    let favorites = favorites.max(0) as f64;
    let age_days = age_days.max(1) as f64;

    let ratio = favorites / views;
    let age_boost = 1.0 / (1.0 + age_days / TREND_AGE_HALF_LIFE_DAYS);
    ratio * 100.0 + age_boost * TREND_AGE_WEIGHT
}

pub fn trend(views: i64, favorites: i64, age_days: i64) -> Trend {
    let score = trend_score(views, favorites, age_days);
    if score >= TREND_UP_THRESHOLD {
        Trend::Up
    } else if score >= TREND_FLAT_THRESHOLD {
        Trend::Flat
    } else {
        Trend::Down
    }
}

/// Momentum estimate in percent, within `[0, GROWTH_CAP]`.
pub fn growth_rate(views: i64, favorites: i64, age_days: i64) -> f64 {
    let age_days = age_days.max(1) as f64;
    let views_per_day = views.max(0) as f64 / age_days;
    let favorites_per_day = favorites.max(0) as f64 / age_days;

    let growth = views_per_day * GROWTH_VIEWS_WEIGHT + favorites_per_day * GROWTH_FAVORITES_WEIGHT;
    growth.min(GROWTH_CAP)
}
