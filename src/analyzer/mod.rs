// Analyzer module: turns raw listings into analytics rows, filtered views and a price histogram.

pub mod filter;
pub mod metrics;
pub mod price_breakdown;
pub mod rows;

use crate::model::{AnalyticsRow, FilterThresholds, PriceHistogram, RawListing, Shop};
use crate::utils::days_since;
use chrono::{DateTime, Utc};
use filter::{apply_filters, paginate};
use price_breakdown::compute_price_breakdown;
use rows::build_rows;
use serde::Serialize;
use std::collections::HashMap;
use tracing::info;

/// Everything a single analysis depends on besides the catalog itself.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisRequest {
    pub thresholds: FilterThresholds,
    pub show_all: bool,
    pub now: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Every listing, in catalog order.
    pub rows: Vec<AnalyticsRow>,
    /// Rows that passed the filters (or all rows after a fallback).
    pub analyzed: Vec<AnalyticsRow>,
    pub fallback_applied: bool,
    pub show_all: bool,
    pub histogram: PriceHistogram,
    /// Mean estimated sales per listing over the whole catalog.
    pub avg_sales: Option<u64>,
}

impl AnalysisReport {
    pub fn analyzed_count(&self) -> usize {
        self.analyzed.len()
    }

    pub fn displayed(&self) -> &[AnalyticsRow] {
        paginate(&self.analyzed, self.show_all)
    }

    pub fn displayed_count(&self) -> usize {
        self.displayed().len()
    }

    /// Active listings as reported by the shop, or the catalog size when the shop omits it.
    pub fn active_listing_count(&self, shop: &Shop) -> u64 {
        shop.listing_active_count.unwrap_or(self.rows.len() as u64)
    }
}

/// Rounded mean of estimated sales, `None` for an empty catalog.
pub fn average_sales(rows: &[AnalyticsRow]) -> Option<u64> {
    if rows.is_empty() {
        return None;
    }
    let total: f64 = rows.iter().map(|r| r.sales as f64).sum();
    Some((total / rows.len() as f64).round() as u64)
}

/// Trait defining the interface for a catalog analyzer.
pub trait Analyzer {
    fn analyze(
        &self,
        listings: &[RawListing],
        thumbnails: &HashMap<u64, String>,
        request: &AnalysisRequest,
    ) -> AnalysisReport;
}

pub struct AnalyzerImpl;

impl AnalyzerImpl {
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for AnalyzerImpl {
    fn analyze(
        &self,
        listings: &[RawListing],
        thumbnails: &HashMap<u64, String>,
        request: &AnalysisRequest,
    ) -> AnalysisReport {
        let rows = build_rows(listings, thumbnails, request.now);
        let outcome = apply_filters(&rows, &request.thresholds);
        // histogram always reflects the full catalog, not the filtered view
        let histogram = compute_price_breakdown(&rows);
        let avg_sales = average_sales(&rows);

        let report = AnalysisReport {
            rows,
            analyzed: outcome.rows,
            fallback_applied: outcome.fallback_applied,
            show_all: request.show_all,
            histogram,
            avg_sales,
        };
        info!(
            "Analyzed {} of {} listings, displaying {}",
            report.analyzed_count(),
            report.rows.len(),
            report.displayed_count()
        );
        report
    }
}

/// Days since the shop was opened, if the API reported it.
pub fn shop_age_days(shop: &Shop, now: DateTime<Utc>) -> Option<i64> {
    days_since(shop.create_date, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawPrice;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn request(show_all: bool) -> AnalysisRequest {
        AnalysisRequest {
            thresholds: FilterThresholds::default(),
            show_all,
            now: now(),
        }
    }

    fn listing(id: u64, favorites: i64, views: i64, age_days: i64, cents: Option<i64>) -> RawListing {
        RawListing {
            listing_id: Some(id),
            title: Some(format!("Print {id}")),
            price: cents.map(|amount| RawPrice {
                amount: Some(amount),
                divisor: Some(100),
            }),
            num_favorers: Some(favorites),
            views: Some(views),
            review_count: None,
            original_creation_timestamp: Some(now().timestamp() - age_days * 86_400),
        }
    }

    #[test]
    fn empty_catalog() {
        let report = AnalyzerImpl::new().analyze(&[], &HashMap::new(), &request(false));
        assert!(report.rows.is_empty());
        assert_eq!(report.analyzed_count(), 0);
        assert_eq!(report.displayed_count(), 0);
        assert_eq!(report.histogram, PriceHistogram::empty());
        assert!(!report.fallback_applied);
        assert_eq!(report.avg_sales, None);
        assert_eq!(report.active_listing_count(&Shop::default()), 0);
    }

    #[test]
    fn average_sales_covers_whole_catalog() {
        let listings = vec![
            listing(1, 20, 280, 30, Some(2400)), // 13 sales, passes filters
            listing(2, 0, 0, 400, None),         // 0 sales, filtered out
        ];
        let report = AnalyzerImpl::new().analyze(&listings, &HashMap::new(), &request(false));
        assert_eq!(report.analyzed_count(), 1);
        assert_eq!(report.rows[0].sales, 13);
        // (13 + 0) / 2 = 6.5 rounds up
        assert_eq!(report.avg_sales, Some(7));
    }

    #[test]
    fn active_listings_fall_back_to_catalog_size() {
        let listings: Vec<_> = (0..4).map(|i| listing(i, 10, 100, 5, None)).collect();
        let report = AnalyzerImpl::new().analyze(&listings, &HashMap::new(), &request(false));

        assert_eq!(report.active_listing_count(&Shop::default()), 4);
        let shop = Shop {
            listing_active_count: Some(120),
            ..Default::default()
        };
        assert_eq!(report.active_listing_count(&shop), 120);
    }

    #[test]
    fn histogram_covers_rows_excluded_by_filters() {
        let listings = vec![
            listing(1, 20, 280, 10, Some(2400)),
            listing(2, 0, 0, 400, Some(9900)),
            listing(3, 0, 0, 400, None),
        ];
        let report = AnalyzerImpl::new().analyze(&listings, &HashMap::new(), &request(false));
        assert_eq!(report.analyzed_count(), 1);
        assert!(!report.fallback_applied);
        let binned: u64 = report.histogram.bins.iter().map(|b| b.count).sum();
        assert_eq!(binned, 2);
    }

    #[test]
    fn over_strict_filters_fall_back_to_full_catalog() {
        let listings: Vec<_> = (0..3).map(|i| listing(i, 0, 1, 365, Some(500))).collect();
        let report = AnalyzerImpl::new().analyze(&listings, &HashMap::new(), &request(false));
        assert!(report.fallback_applied);
        assert_eq!(report.analyzed, report.rows);
    }

    #[test]
    fn show_all_controls_display() {
        let listings: Vec<_> = (0..30).map(|i| listing(i, 10, 100, 5, Some(1500))).collect();

        let paged = AnalyzerImpl::new().analyze(&listings, &HashMap::new(), &request(false));
        assert_eq!(paged.analyzed_count(), 30);
        assert_eq!(paged.displayed_count(), filter::PER_PAGE);
        assert_eq!(paged.displayed()[0].listing_id, Some(0));

        let all = AnalyzerImpl::new().analyze(&listings, &HashMap::new(), &request(true));
        assert_eq!(all.displayed_count(), 30);
    }

    #[test]
    fn shop_age() {
        let shop = Shop {
            shop_id: 1,
            shop_name: Some("RominaCast".into()),
            create_date: Some(now().timestamp() - 400 * 86_400),
            ..Default::default()
        };
        assert_eq!(shop_age_days(&shop, now()), Some(400));

        let unknown = Shop {
            create_date: None,
            ..shop
        };
        assert_eq!(shop_age_days(&unknown, now()), None);
    }
}
