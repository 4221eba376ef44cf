// notifier/console.rs

use crate::analyzer::AnalysisReport;
use crate::model::{AnalyticsRow, PriceHistogram, Shop};
use crate::utils::{listing_url, month_year_label, shop_url};
use serde::Serialize;

/// Width of the longest histogram bar, in characters.
pub const BAR_WIDTH: u64 = 30;
const TITLE_WIDTH: usize = 32;

/// Formats a currency value, or a dash when the price is unknown.
pub fn format_money(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("${:.2}", v),
        None => "—".to_string(),
    }
}

fn format_count(value: Option<u64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "—".to_string())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

/// Bar length for a bin, relative to the fullest bin.
pub fn bar_length(count: u64, max_bin_count: u64) -> u64 {
    count * BAR_WIDTH / max_bin_count.max(1)
}

fn shop_section(shop: &Shop, shop_age_days: Option<i64>, report: &AnalysisReport) -> String {
    let name = shop.shop_name.as_deref().unwrap_or("unknown");
    let mut out = format!("📦 Shop: {} (id {})", name, shop.shop_id);
    if let Some(days) = shop_age_days {
        out.push_str(&format!(" | open {} days", days));
    }
    out.push('\n');

    if let Some(url) = shop.shop_name.as_deref().and_then(shop_url) {
        out.push_str(&format!("🔗 {}\n", url));
    }
    out.push_str(&format!(
        "🛒 {} sales | ⭐ {} reviews | ❤️ {} favorites | 📋 {} active listings\n",
        format_count(shop.transaction_sold_count),
        format_count(shop.review_count),
        format_count(shop.num_favorers),
        report.active_listing_count(shop),
    ));
    out.push_str(&format!("📅 On Etsy since {}\n", month_year_label(shop.create_date)));
    out.push_str(&format!(
        "📈 Avg. est. sales per listing: {}\n",
        format_count(report.avg_sales)
    ));
    out
}

fn header_line() -> String {
    format!(
        "{:<w$}  {:>9}  {:>6}  {:>7}  {:>7}  {:>7}  {:>5}  {:>11}  {:^5}  {:>7}  Link\n",
        "Title", "Price", "Favs", "Views", "Reviews", "Age", "Sales", "Revenue", "Trend", "Growth",
        w = TITLE_WIDTH,
    )
}

fn row_line(row: &AnalyticsRow) -> String {
    let link = row.listing_id.and_then(listing_url).unwrap_or_default();
    format!(
        "{:<w$}  {:>9}  {:>6}  {:>7}  {:>7}  {:>7}  {:>5}  {:>11}  {:^5}  {:>6.1}%  {}\n",
        truncate(&row.title, TITLE_WIDTH),
        format_money(row.price),
        row.favorites,
        row.views,
        row.reviews,
        row.age_label,
        row.sales,
        format_money(Some(row.revenue)),
        row.trend.arrow(),
        row.growth_rate,
        link,
        w = TITLE_WIDTH,
    )
}

fn histogram_section(histogram: &PriceHistogram) -> String {
    if histogram.bins.is_empty() {
        return "💰 No priced listings.\n".to_string();
    }
    let mut out = format!(
        "💰 Price breakdown: avg {} | min {} | max {}\n",
        format_money(histogram.avg),
        format_money(histogram.min),
        format_money(histogram.max)
    );
    for bin in &histogram.bins {
        let bar = "█".repeat(bar_length(bin.count, histogram.max_bin_count) as usize);
        out.push_str(&format!("{:<14} {} {}\n", bin.label, bar, bin.count));
    }
    out
}

/// Plain-text report for a terminal.
pub fn render_text(shop: &Shop, shop_age_days: Option<i64>, report: &AnalysisReport) -> String {
    let mut out = shop_section(shop, shop_age_days, report);
    out.push('\n');

    out.push_str(&format!(
        "Showing {} of {} analyzed listings ({} in catalog)\n",
        report.displayed_count(),
        report.analyzed_count(),
        report.rows.len()
    ));
    if report.fallback_applied {
        out.push_str("⚠️ No listing matched the filters, showing the full catalog.\n");
    }
    out.push('\n');

    out.push_str(&header_line());
    for row in report.displayed() {
        out.push_str(&row_line(row));
    }
    out.push('\n');

    out.push_str(&histogram_section(&report.histogram));
    out
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonShop<'a> {
    shop_id: u64,
    shop_name: Option<&'a str>,
    shop_url: Option<String>,
    shop_age_days: Option<i64>,
    on_etsy_since: String,
    transaction_sold_count: Option<u64>,
    review_count: Option<u64>,
    num_favorers: Option<u64>,
    active_listing_count: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonRow<'a> {
    #[serde(flatten)]
    row: &'a AnalyticsRow,
    listing_url: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    shop: JsonShop<'a>,
    analyzed_count: usize,
    displayed_count: usize,
    fallback_applied: bool,
    avg_sales: Option<u64>,
    displayed: Vec<JsonRow<'a>>,
    price_breakdown: &'a PriceHistogram,
}

/// Machine-readable report with the shop summary, displayed rows and the price histogram.
pub fn render_json(
    shop: &Shop,
    shop_age_days: Option<i64>,
    report: &AnalysisReport,
) -> Result<String, serde_json::Error> {
    let json = JsonReport {
        shop: JsonShop {
            shop_id: shop.shop_id,
            shop_name: shop.shop_name.as_deref(),
            shop_url: shop.shop_name.as_deref().and_then(shop_url),
            shop_age_days,
            on_etsy_since: month_year_label(shop.create_date),
            transaction_sold_count: shop.transaction_sold_count,
            review_count: shop.review_count,
            num_favorers: shop.num_favorers,
            active_listing_count: report.active_listing_count(shop),
        },
        analyzed_count: report.analyzed_count(),
        displayed_count: report.displayed_count(),
        fallback_applied: report.fallback_applied,
        avg_sales: report.avg_sales,
        displayed: report
            .displayed()
            .iter()
            .map(|row| JsonRow {
                row,
                listing_url: row.listing_id.and_then(listing_url),
            })
            .collect(),
        price_breakdown: &report.histogram,
    };
    serde_json::to_string_pretty(&json)
}
