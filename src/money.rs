//! Fixed-point currency helpers shared by the composer and the renderer.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round to two fraction digits, half away from zero.
pub fn round(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Format with exactly two fraction digits, without a currency sign.
pub fn format(amount: Decimal) -> String {
    round(amount).to_string()
}
