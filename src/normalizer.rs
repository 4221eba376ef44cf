use crate::model::RawPrice;

/// Divisor assumed when the marketplace omits one or sends a nonsensical value.
pub const DEFAULT_DIVISOR: i64 = 100;

/// Converts a minor-unit price into a currency value.
/// Returns `None` when no amount is present; an unknown price is never coerced to 0.
pub fn money_from_price(price: Option<&RawPrice>) -> Option<f64> {
    let price = price?;
    let amount = price.amount? as f64;

    let divisor = match price.divisor {
        Some(d) if d > 0 => d,
        _ => DEFAULT_DIVISOR,
    };

    Some(amount / divisor as f64)
}
