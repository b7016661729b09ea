//! Currency display helpers.
//!
//! Prices are `rust_decimal::Decimal` end to end; rounding happens only at
//! the display boundary, to the standard 2-decimal currency form.

use rust_decimal::Decimal;

/// Format an amount for display with exactly two decimal places.
pub fn format_amount(amount: &Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

/// Format an amount with the platform's currency symbol (EUR).
pub fn format_eur(amount: &Decimal) -> String {
    format!("\u{20ac}{}", format_amount(amount))
}
