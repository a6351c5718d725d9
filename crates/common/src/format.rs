//! Display-string formatters shared by row models and the CLI renderer.
//!
//! All functions are pure; money and mass stay `Decimal` until the very
//! last step.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// "Rs. 5,000.00". Two decimal places, thousands grouping, sign in front of
/// the prefix ("-Rs. 12.50").
pub fn format_currency(value: Decimal) -> String {
    let plain = format_currency_plain(value);
    match plain.strip_prefix('-') {
        Some(rest) => format!("-Rs. {rest}"),
        None => format!("Rs. {plain}"),
    }
}

/// "5,000.00" without the currency prefix.
pub fn format_currency_plain(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), format!("{f:0<2}")),
        None => (text, "00".to_string()),
    };
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{}.{frac_part}", group_thousands(&int_part))
}

/// "Jan 5, 2026, 3:04 PM".
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%b %-d, %Y, %-I:%M %p").to_string()
}

/// Month-and-day prefix, "Jan 5" — used by "last activity" lines.
pub fn format_day(date: DateTime<Utc>) -> String {
    date.format("%b %-d").to_string()
}

/// "12.5g" — coarse mass display for progress and challenge text.
pub fn format_grams(value: Decimal) -> String {
    format!("{}g", fixed_dp(value, 1))
}

/// "12.500g" — fine mass display for balances and rows.
pub fn format_grams_fine(value: Decimal) -> String {
    format!("{}g", fixed_dp(value, 3))
}

/// Render with exactly `dp` decimal places (Decimal drops trailing zeros on
/// round, displays them only if present in the scale).
pub fn fixed_dp(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp(dp);
    let text = rounded.to_string();
    match text.split_once('.') {
        Some((i, f)) => format!("{i}.{f:0<width$}", width = dp as usize),
        None if dp == 0 => text,
        None => format!("{text}.{:0<width$}", "", width = dp as usize),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && i % 3 == offset % 3 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_format_currency_grouping() {
        assert_eq!(format_currency(d("0")), "Rs. 0.00");
        assert_eq!(format_currency(d("5000")), "Rs. 5,000.00");
        assert_eq!(format_currency(d("1234567.5")), "Rs. 1,234,567.50");
        assert_eq!(format_currency(d("999")), "Rs. 999.00");
        assert_eq!(format_currency_plain(d("5000")), "5,000.00");
    }

    #[test]
    fn test_format_currency_negative_and_rounding() {
        assert_eq!(format_currency(d("-12.5")), "-Rs. 12.50");
        assert_eq!(format_currency(d("2.005")), "Rs. 2.00");
        assert_eq!(format_currency(d("2.015")), "Rs. 2.02");
    }

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2026, 1, 5, 15, 4, 0).unwrap();
        assert_eq!(format_date(date), "Jan 5, 2026, 3:04 PM");
        assert_eq!(format_day(date), "Jan 5");
        let morning = Utc.with_ymd_and_hms(2026, 11, 23, 9, 30, 0).unwrap();
        assert_eq!(format_date(morning), "Nov 23, 2026, 9:30 AM");
    }

    #[test]
    fn test_format_grams() {
        assert_eq!(format_grams(d("12.5")), "12.5g");
        assert_eq!(format_grams(d("12.55")), "12.6g");
        assert_eq!(format_grams(d("0")), "0.0g");
        assert_eq!(format_grams(d("2")), "2.0g");
        assert_eq!(format_grams_fine(d("12.5")), "12.500g");
        assert_eq!(format_grams_fine(d("2")), "2.000g");
    }

    #[test]
    fn test_fixed_dp() {
        assert_eq!(fixed_dp(d("1.2"), 3), "1.200");
        assert_eq!(fixed_dp(d("1"), 2), "1.00");
        assert_eq!(fixed_dp(d("1.23456"), 3), "1.235");
        assert_eq!(fixed_dp(d("7"), 0), "7");
    }
}
