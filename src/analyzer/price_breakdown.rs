use crate::model::{AnalyticsRow, PriceBin, PriceHistogram};

pub const BIN_COUNT: usize = 9;
/// Lower bound of the first bin.
pub const BIN_START: i64 = 1;
/// The last bin always reaches at least this price.
pub const MIN_RANGE_END: i64 = 12;
/// Narrowest allowed bin, keeps labels readable for cheap catalogs.
pub const MIN_BIN_STEP: i64 = 11;

/// Width of each bin for a catalog whose most expensive item costs `max_price`.
pub fn bin_step(max_price: f64) -> i64 {
    let end = (max_price.ceil() as i64).max(MIN_RANGE_END);
    let range = (end - BIN_START).max(1);
    let bins = BIN_COUNT as i64;
    // ceiling division without `range + bins - 1`, which overflows near i64::MAX
    let step = range / bins + i64::from(range % bins != 0);
    step.max(MIN_BIN_STEP)
}

fn bin_index(price: f64, step: i64) -> usize {
    let idx = ((price - BIN_START as f64) / step as f64).floor() as i64;
    idx.clamp(0, BIN_COUNT as i64 - 1) as usize
}

/// Price distribution over every row with a known price.
/// Prices outside the covered range land in the first or last bin.
pub fn compute_price_breakdown(rows: &[AnalyticsRow]) -> PriceHistogram {
    let prices: Vec<f64> = rows.iter().filter_map(|r| r.price).collect();
    if prices.is_empty() {
        return PriceHistogram::empty();
    }

    let count = prices.len() as f64;
    let avg = prices.iter().sum::<f64>() / count;
    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let step = bin_step(max);
    let mut bins: Vec<PriceBin> = (0..BIN_COUNT as i64)
        .map(|i| {
            let lower = BIN_START.saturating_add(i.saturating_mul(step));
            let upper = lower.saturating_add(step);
            PriceBin {
                lower_bound: lower,
                upper_bound: upper,
                label: format!("${} - {}", lower, upper),
                count: 0,
            }
        })
        .collect();

    for price in &prices {
        bins[bin_index(*price, step)].count += 1;
    }

    let max_bin_count = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1);

    PriceHistogram {
        avg: Some(avg),
        min: Some(min),
        max: Some(max),
        bins,
        max_bin_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Trend;

    fn priced(prices: &[Option<f64>]) -> Vec<AnalyticsRow> {
        prices
            .iter()
            .enumerate()
            .map(|(i, p)| AnalyticsRow {
                listing_id: Some(i as u64),
                title: String::new(),
                price: *p,
                favorites: 0,
                views: 0,
                reviews: 0,
                age_days: 0,
                age_label: String::new(),
                thumbnail: String::new(),
                sales: 0,
                revenue: 0.0,
                trend: Trend::Down,
                growth_rate: 0.0,
            })
            .collect()
    }

    fn assert_contiguous(h: &PriceHistogram, step: i64) {
        assert_eq!(h.bins.len(), BIN_COUNT);
        assert_eq!(h.bins[0].lower_bound, BIN_START);
        for pair in h.bins.windows(2) {
            assert_eq!(pair[0].upper_bound, pair[1].lower_bound);
        }
        for bin in &h.bins {
            assert_eq!(bin.upper_bound, bin.lower_bound + step);
        }
    }

    #[test]
    fn empty_catalog_has_no_bins() {
        let h = compute_price_breakdown(&priced(&[None, None]));
        assert_eq!(h, PriceHistogram::empty());
        assert_eq!(compute_price_breakdown(&[]).max_bin_count, 0);
    }

    #[test]
    fn cheap_catalog_uses_minimum_step() {
        let h = compute_price_breakdown(&priced(&[Some(3.5), None]));
        assert_eq!(bin_step(3.5), MIN_BIN_STEP);
        assert_contiguous(&h, MIN_BIN_STEP);
        assert_eq!(h.bins[0].label, "$1 - 12");
        assert_eq!(h.bins[1].label, "$12 - 23");
        assert_eq!(h.bins[0].count, 1);
        assert_eq!(h.max_bin_count, 1);
        assert_eq!(h.avg, Some(3.5));
    }

    #[test]
    fn buckets_wider_catalog() {
        let h = compute_price_breakdown(&priced(&[Some(5.0), Some(12.0), Some(23.0), Some(100.5)]));
        assert_contiguous(&h, 12);
        let counts: Vec<u64> = h.bins.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![2, 1, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(h.max_bin_count, 2);
        assert_eq!(h.min, Some(5.0));
        assert_eq!(h.max, Some(100.5));
        assert!((h.avg.unwrap() - 35.125).abs() < 1e-9);
        assert_eq!(h.bins[8].label, "$97 - 109");
    }

    #[test]
    fn extreme_prices_are_never_dropped() {
        let prices = [Some(0.2), Some(-4.0), Some(10_000.0), Some(9_999.99), None, Some(50.0)];
        let h = compute_price_breakdown(&priced(&prices));
        let total: u64 = h.bins.iter().map(|b| b.count).sum();
        assert_eq!(total, 5);
        // 0.2, -4.0 and 50.0 all fall below the first upper bound of 1112
        assert_eq!(h.bins[0].count, 3);
        assert_eq!(h.bins[8].count, 2);
    }

    #[test]
    fn huge_price_keeps_every_row() {
        let huge = crate::normalizer::money_from_price(Some(&crate::model::RawPrice {
            amount: Some(i64::MAX),
            divisor: Some(1),
        }));
        let h = compute_price_breakdown(&priced(&[huge, Some(9.5), Some(f64::MAX)]));

        let total: u64 = h.bins.iter().map(|b| b.count).sum();
        assert_eq!(total, 3);
        assert_eq!(h.bins[0].count, 1);
        assert_eq!(h.bins[8].count, 2);
        for pair in h.bins.windows(2) {
            assert!(pair[0].lower_bound < pair[1].lower_bound);
            assert_eq!(pair[0].upper_bound, pair[1].lower_bound);
        }
    }
}
