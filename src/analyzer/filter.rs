use crate::model::{AnalyticsRow, FilterThresholds};
use tracing::{debug, info};

/// Rows shown when the user has not asked for the full list.
pub const PER_PAGE: usize = 20;

#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub rows: Vec<AnalyticsRow>,
    /// True when no row passed and the full set was returned instead.
    pub fallback_applied: bool,
}

fn passes(row: &AnalyticsRow, thresholds: &FilterThresholds) -> bool {
    row.favorites >= thresholds.min_favorites
        && row.views >= thresholds.min_views
        && row.age_days <= thresholds.max_age_days
}

/// Keeps rows that meet every threshold. An over-strict filter on non-empty
/// data never empties the result: the unfiltered rows come back instead.
pub fn apply_filters(rows: &[AnalyticsRow], thresholds: &FilterThresholds) -> FilterOutcome {
    let filtered: Vec<AnalyticsRow> = rows
        .iter()
        .filter(|r| passes(r, thresholds))
        .cloned()
        .collect();

    if filtered.is_empty() && !rows.is_empty() {
        info!(
            "No listing matched filters (favorites >= {}, views >= {}, age <= {}d); showing all {}",
            thresholds.min_favorites,
            thresholds.min_views,
            thresholds.max_age_days,
            rows.len()
        );
        return FilterOutcome {
            rows: rows.to_vec(),
            fallback_applied: true,
        };
    }

    debug!("{} of {} rows passed filters", filtered.len(), rows.len());
    FilterOutcome {
        rows: filtered,
        fallback_applied: false,
    }
}

/// First page of rows, or all of them when `show_all` is set.
pub fn paginate(rows: &[AnalyticsRow], show_all: bool) -> &[AnalyticsRow] {
    if show_all {
        rows
    } else {
        &rows[..rows.len().min(PER_PAGE)]
    }
}
