// Utility functions: listing and shop age, storefront links
use chrono::{DateTime, Utc};
use reqwest::Url;

pub const SECONDS_PER_DAY: i64 = 86_400;
pub const DAYS_PER_MONTH: i64 = 30;

/// Placeholder label for a listing whose creation time is unknown.
pub const UNKNOWN_AGE_LABEL: &str = "—";

/// Public storefront the listings and shops link to.
pub const MARKETPLACE_WEB_URL: &str = "https://www.etsy.com";

/// Whole days elapsed between a Unix timestamp (seconds) and `now`.
///
/// A missing or zero timestamp means "unknown" and yields `None`.
/// Timestamps in the future count as 0 days old.
pub fn days_since(timestamp: Option<i64>, now: DateTime<Utc>) -> Option<i64> {
    let ts = timestamp.filter(|&t| t != 0)?;
    let elapsed = now.timestamp().saturating_sub(ts);
    Some(elapsed.div_euclid(SECONDS_PER_DAY).max(0))
}

/// Coarse age label such as `"3 Mo."`.
pub fn months_label(age_days: Option<i64>) -> String {
    match age_days {
        Some(days) => format!("{} Mo.", days.max(0) / DAYS_PER_MONTH),
        None => UNKNOWN_AGE_LABEL.to_string(),
    }
}

/// Month and year of a Unix timestamp, e.g. `"March 2019"`; `"—"` when unknown.
pub fn month_year_label(timestamp: Option<i64>) -> String {
    timestamp
        .filter(|&t| t != 0)
        .and_then(|t| DateTime::from_timestamp(t, 0))
        .map(|dt| dt.format("%B %Y").to_string())
        .unwrap_or_else(|| UNKNOWN_AGE_LABEL.to_string())
}

fn marketplace_url(segments: &[&str]) -> Option<String> {
    let mut url = Url::parse(MARKETPLACE_WEB_URL).ok()?;
    url.path_segments_mut().ok()?.pop_if_empty().extend(segments);
    Some(url.to_string())
}

/// Public page of a shop; the name is percent-encoded.
pub fn shop_url(shop_name: &str) -> Option<String> {
    marketplace_url(&["shop", shop_name])
}

pub fn listing_url(listing_id: u64) -> Option<String> {
    marketplace_url(&["listing", &listing_id.to_string()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn floors_partial_days() {
        let ts = now().timestamp() - 3 * SECONDS_PER_DAY - 3600;
        assert_eq!(days_since(Some(ts), now()), Some(3));

        let ts = now().timestamp() - 10;
        assert_eq!(days_since(Some(ts), now()), Some(0));
    }

    #[test]
    fn missing_timestamp_is_unknown() {
        assert_eq!(days_since(None, now()), None);
        assert_eq!(days_since(Some(0), now()), None);
    }

    #[test]
    fn future_timestamp_is_zero_days() {
        let ts = now().timestamp() + 5 * SECONDS_PER_DAY;
        assert_eq!(days_since(Some(ts), now()), Some(0));
        assert_eq!(days_since(Some(i64::MAX), now()), Some(0));
    }

    #[test]
    fn ancient_timestamp_saturates() {
        let days = days_since(Some(i64::MIN), now()).unwrap();
        assert_eq!(days, i64::MAX / SECONDS_PER_DAY);
    }

    #[test]
    fn labels_months() {
        assert_eq!(months_label(Some(0)), "0 Mo.");
        assert_eq!(months_label(Some(29)), "0 Mo.");
        assert_eq!(months_label(Some(95)), "3 Mo.");
        assert_eq!(months_label(Some(-4)), "0 Mo.");
        assert_eq!(months_label(None), "—");
    }

    #[test]
    fn labels_month_and_year() {
        let ts = Utc.with_ymd_and_hms(2019, 3, 14, 9, 0, 0).unwrap().timestamp();
        assert_eq!(month_year_label(Some(ts)), "March 2019");
        assert_eq!(month_year_label(Some(0)), "—");
        assert_eq!(month_year_label(None), "—");
        assert_eq!(month_year_label(Some(i64::MAX)), "—");
    }

    #[test]
    fn builds_storefront_links() {
        assert_eq!(
            shop_url("RominaCast").as_deref(),
            Some("https://www.etsy.com/shop/RominaCast")
        );
        assert_eq!(
            shop_url("Two Words").as_deref(),
            Some("https://www.etsy.com/shop/Two%20Words")
        );
        assert_eq!(
            listing_url(1001).as_deref(),
            Some("https://www.etsy.com/listing/1001")
        );
    }
}
