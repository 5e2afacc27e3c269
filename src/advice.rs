//! Helper text shown under the rate and term fields.

use crate::normalize::parse_leading_float;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advice {
    pub text: &'static str,
    /// CSS colour for the helper text.
    pub color: &'static str,
}

const GREEN: &str = "#10b981";
const BLUE: &str = "#3b82f6";
const AMBER: &str = "#f59e0b";
const RED: &str = "#ef4444";

pub fn rate_advice(raw: &str) -> Option<Advice> {
    let rate = parse_leading_float(raw)?;
    let advice = if rate < 7.0 {
        Advice {
            text: "💡 Excellent rate! This is below market average.",
            color: GREEN,
        }
    } else if rate <= 9.0 {
        Advice {
            text: "💡 Good rate within normal range.",
            color: BLUE,
        }
    } else if rate <= 12.0 {
        Advice {
            text: "💡 Consider negotiating for a better rate.",
            color: AMBER,
        }
    } else {
        Advice {
            text: "⚠️ This rate seems high. Shop around for better offers.",
            color: RED,
        }
    };
    Some(advice)
}

pub fn term_advice(raw: &str) -> Option<Advice> {
    let years = parse_leading_float(raw)?.trunc();
    let advice = if years <= 15.0 {
        Advice {
            text: "💡 Shorter term = Higher EMI but less total interest.",
            color: GREEN,
        }
    } else if years <= 25.0 {
        Advice {
            text: "💡 Balanced choice between EMI and total interest.",
            color: BLUE,
        }
    } else {
        Advice {
            text: "💡 Longer term = Lower EMI but more total interest.",
            color: AMBER,
        }
    };
    Some(advice)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_tiers() {
        assert_eq!(rate_advice("6.99").unwrap().color, GREEN);
        assert_eq!(rate_advice("7").unwrap().color, BLUE);
        assert_eq!(rate_advice("9.00").unwrap().color, BLUE);
        assert_eq!(rate_advice("12").unwrap().color, AMBER);
        assert_eq!(rate_advice("12.01").unwrap().color, RED);
        assert_eq!(rate_advice(""), None);
    }

    #[test]
    fn term_tiers() {
        assert_eq!(term_advice("15").unwrap().color, GREEN);
        assert_eq!(term_advice("25.9").unwrap().color, BLUE);
        assert_eq!(term_advice("26").unwrap().color, AMBER);
        assert_eq!(term_advice("years"), None);
    }
}
