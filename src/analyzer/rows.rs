use crate::analyzer::metrics::{estimate_revenue, estimate_sales, growth_rate, trend};
use crate::model::{AnalyticsRow, RawListing};
use crate::normalizer::money_from_price;
use crate::utils::{days_since, months_label};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::debug;

/// Age used for listings without a creation timestamp, so they read as very old.
pub const UNKNOWN_AGE_DAYS: i64 = 9999;

/// Builds one analytics row from a raw listing.
pub fn build_row(
    listing: &RawListing,
    thumbnails: &HashMap<u64, String>,
    now: DateTime<Utc>,
) -> AnalyticsRow {
    let title = match &listing.title {
        Some(t) => t.clone(),
        None => format!(
            "Listing #{}",
            listing.listing_id.map(|id| id.to_string()).unwrap_or_default()
        ),
    };

    let price = money_from_price(listing.price.as_ref());
    let favorites = listing.num_favorers.unwrap_or(0).max(0);
    let views = listing.views.unwrap_or(0).max(0);
    let reviews = listing.review_count.unwrap_or(0).max(0);

    let known_age = days_since(listing.original_creation_timestamp, now);
    let age_days = known_age.unwrap_or(UNKNOWN_AGE_DAYS);

    let sales = estimate_sales(views, favorites, age_days);
    let thumbnail = listing
        .listing_id
        .and_then(|id| thumbnails.get(&id))
        .cloned()
        .unwrap_or_default();

    AnalyticsRow {
        listing_id: listing.listing_id,
        title,
        price,
        favorites,
        views,
        reviews,
        age_days,
        age_label: months_label(known_age),
        thumbnail,
        sales,
        revenue: estimate_revenue(sales, price),
        trend: trend(views, favorites, age_days),
        growth_rate: growth_rate(views, favorites, age_days),
    }
}

/// Builds rows for every listing, preserving source order.
pub fn build_rows(
    listings: &[RawListing],
    thumbnails: &HashMap<u64, String>,
    now: DateTime<Utc>,
) -> Vec<AnalyticsRow> {
    let rows: Vec<AnalyticsRow> = listings
        .iter()
        .map(|l| build_row(l, thumbnails, now))
        .collect();
    debug!("Built {} analytics rows", rows.len());
    rows
}
