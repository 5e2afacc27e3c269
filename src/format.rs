//! `en-IN` number rendering: the last three integer digits form one group,
//! every group before that has two (`12,34,567.891`).

use crate::config::CURRENCY_SYMBOL;

/// Most fraction digits kept by the locale's default number format.
const MAX_FRACTION_DIGITS: usize = 3;

/// Insert `en-IN` grouping separators into a run of ASCII digits.
fn group_integer_digits(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);

    let mut groups = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (front, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = front;
    }
    if !rest.is_empty() {
        groups.push(rest);
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Format a number with `en-IN` grouping and at most three fraction digits,
/// trailing zeros dropped.
pub fn format_en_in(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!(
        "{:.*}",
        MAX_FRACTION_DIGITS,
        round_to(value.abs(), MAX_FRACTION_DIGITS)
    );
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + 8);
    if value < 0.0 && (!int_part.trim_start_matches('0').is_empty() || !frac_part.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_integer_digits(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Round to `digits` fraction digits with ties away from zero, as the
/// browser's `toFixed` and locale formatting do. `format!` alone would round
/// ties to even.
fn round_to(value: f64, digits: usize) -> f64 {
    let scale = 10f64.powi(digits as i32);
    let scaled = (value * scale).round() / scale;
    if scaled.is_finite() {
        scaled
    } else {
        value
    }
}

/// Round half away from zero for positives, matching the browser's `Math.round`.
#[inline]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Whole-rupee label, e.g. `₹12,345`.
pub fn format_rupees(value: f64) -> String {
    format!("{}{}", CURRENCY_SYMBOL, format_en_in(round_half_up(value)))
}

/// Two-decimal rendering used for rates.
pub fn format_rate(value: f64) -> String {
    format!("{:.2}", round_to(value, 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_lakhs_and_crores() {
        assert_eq!(format_en_in(999.0), "999");
        assert_eq!(format_en_in(1000.0), "1,000");
        assert_eq!(format_en_in(100_000.0), "1,00,000");
        assert_eq!(format_en_in(1_234_567.0), "12,34,567");
        assert_eq!(format_en_in(10_000_000.0), "1,00,00,000");
    }

    #[test]
    fn keeps_at_most_three_fraction_digits() {
        assert_eq!(format_en_in(1_234_567.891), "12,34,567.891");
        assert_eq!(format_en_in(12_345.6789), "12,345.679");
        assert_eq!(format_en_in(150_000.5), "1,50,000.5");
        assert_eq!(format_en_in(0.5), "0.5");
    }

    #[test]
    fn fraction_ties_round_up() {
        assert_eq!(format_en_in(1.0625), "1.063");
        assert_eq!(format_en_in(2_50_000.0625), "2,50,000.063");
        assert_eq!(format_en_in(-1.0625), "-1.063");
    }

    #[test]
    fn negative_values_keep_sign() {
        assert_eq!(format_en_in(-1_500_000.0), "-15,00,000");
        assert_eq!(format_en_in(-0.0001), "0");
    }

    #[test]
    fn rupee_labels_round_like_math_round() {
        assert_eq!(format_rupees(8678.23), "₹8,678");
        assert_eq!(format_rupees(12_344.5), "₹12,345");
        assert_eq!(format_rupees(34_712.93), "₹34,713");
    }

    #[test]
    fn rates_have_two_decimals() {
        assert_eq!(format_rate(8.5), "8.50");
        assert_eq!(format_rate(12.0), "12.00");
        assert_eq!(format_rate(7.456), "7.46");
    }

    #[test]
    fn eighth_percent_rates_round_up() {
        assert_eq!(format_rate(8.125), "8.13");
        assert_eq!(format_rate(0.125), "0.13");
        assert_eq!(format_rate(9.375), "9.38");
    }
}
