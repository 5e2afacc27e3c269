//! Input normalization for the loan form's text fields.
//!
//! Typed text is sanitized keystroke by keystroke, parsed with the browser's
//! `parseFloat` rules when a number is needed, and re-rendered on blur.

use crate::format::{format_en_in, format_rate};
use once_cell::sync::Lazy;
use regex::Regex;

/// Grouping separator accepted (and stripped) in amount-like fields.
pub const GROUPING_SEPARATOR: char = ',';

// Longest numeric prefix, as accepted by `parseFloat`
static LEADING_FLOAT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").unwrap()
});

/// How a field's text is parsed and re-rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Loan amount and down payment: grouped digits, formatted on blur.
    Amount,
    /// Annual interest rate in percent, shown with two decimals on blur.
    Rate,
    /// Loan term in years.
    Term,
}

impl FieldKind {
    pub fn strips_grouping(self) -> bool {
        matches!(self, FieldKind::Amount)
    }
}

/// Sanitized text plus the caret position mapped into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitized {
    pub value: String,
    /// Caret offset in UTF-16 code units, as the DOM reports selections.
    pub cursor: u32,
}

/// Keep ASCII digits and the first decimal point; drop everything else.
///
/// ```
/// use loan_calculator::normalize::sanitize_numeric;
/// assert_eq!(sanitize_numeric("12,3a4.5.6"), "1234.56");
/// ```
pub fn sanitize_numeric(raw: &str) -> String {
    sanitize_numeric_at(raw, 0).value
}

/// Like [`sanitize_numeric`], also moving a caret at `cursor` (UTF-16 units
/// into `raw`) to the same logical spot in the sanitized text.
pub fn sanitize_numeric_at(raw: &str, cursor: u32) -> Sanitized {
    let mut value = String::with_capacity(raw.len());
    let mut seen_dot = false;
    let mut offset = 0u32;
    let mut new_cursor = 0u32;

    for ch in raw.chars() {
        let keep = ch.is_ascii_digit() || (ch == '.' && !seen_dot);
        if ch == '.' {
            seen_dot = true;
        }
        if keep {
            value.push(ch);
            if offset < cursor {
                new_cursor += 1;
            }
        }
        offset += ch.len_utf16() as u32;
    }

    Sanitized {
        value,
        cursor: new_cursor,
    }
}

/// Parse the longest numeric prefix of `text` after leading whitespace.
/// Returns `None` where `parseFloat` would yield `NaN`.
pub fn parse_leading_float(text: &str) -> Option<f64> {
    let m = LEADING_FLOAT_REGEX.find(text.trim_start())?;
    m.as_str().parse::<f64>().ok()
}

/// Parse a field into a finite, non-negative number, or `None` for "no value".
pub fn normalize_field(kind: FieldKind, raw: &str) -> Option<f64> {
    let parsed = if kind.strips_grouping() {
        parse_leading_float(&raw.replace(GROUPING_SEPARATOR, ""))
    } else {
        parse_leading_float(raw)
    };
    parsed.filter(|v| v.is_finite() && *v >= 0.0)
}

/// The text a field should show after losing focus, or `None` to leave it.
pub fn format_on_blur(kind: FieldKind, raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match kind {
        FieldKind::Amount => parse_leading_float(&trimmed.replace(GROUPING_SEPARATOR, ""))
            .filter(|v| v.is_finite())
            .map(format_en_in),
        FieldKind::Rate => trimmed
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(format_rate),
        FieldKind::Term => None,
    }
}
