//! Submission gate for the loan form.
//!
//! Every field is checked on every call so that all messages can be shown at
//! once; the form may be submitted only when [`ValidationOutcome::is_valid`].

use crate::config::{
    CalculatorSettings, MAX_RATE_PCT, MAX_TERM_YEARS, MIN_LOAN_AMOUNT, MIN_RATE_PCT,
    MIN_TERM_YEARS, PREFILL_DOWN_PAYMENT_FRACTION, PREFILL_RATE_PCT, PREFILL_TERM_YEARS,
};
use crate::format::{format_en_in, format_rate};
use crate::normalize::{parse_leading_float, GROUPING_SEPARATOR};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The four text fields of the calculator form, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawLoanForm {
    pub amount: String,
    pub rate: String,
    pub term: String,
    pub down_payment: String,
}

impl RawLoanForm {
    /// Form pre-populated for a property listing priced at `property_amount`.
    pub fn prefill_for_property(property_amount: f64) -> Self {
        Self {
            amount: format_en_in(property_amount),
            rate: format_rate(PREFILL_RATE_PCT),
            term: PREFILL_TERM_YEARS.to_string(),
            down_payment: format_en_in(property_amount * PREFILL_DOWN_PAYMENT_FRACTION),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    LoanAmount,
    InterestRate,
    LoanTerm,
    DownPayment,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::LoanAmount,
        Field::InterestRate,
        Field::LoanTerm,
        Field::DownPayment,
    ];
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::LoanAmount => "loan amount",
            Field::InterestRate => "interest rate",
            Field::LoanTerm => "loan term",
            Field::DownPayment => "down payment",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("Please enter a valid loan amount (minimum ₹{})", grouped(.min))]
    LoanAmountBelowMinimum { min: f64 },
    #[error("Please enter a valid interest rate between {min}% and {max}%")]
    RateOutOfRange { min: f64, max: f64 },
    #[error("Please enter a valid loan term between {min} and {max} years")]
    TermOutOfRange { min: u32, max: u32 },
    #[error("Please enter a valid down payment amount")]
    DownPaymentInvalid,
    #[error("Down payment cannot be greater than or equal to the loan amount")]
    DownPaymentTooLarge,
}

fn grouped(value: &f64) -> String {
    format_en_in(*value)
}

/// Bounds applied by [`validate_form`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationLimits {
    pub min_loan_amount: f64,
    pub min_rate_pct: f64,
    pub max_rate_pct: f64,
    pub min_term_years: u32,
    pub max_term_years: u32,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            min_loan_amount: MIN_LOAN_AMOUNT,
            min_rate_pct: MIN_RATE_PCT,
            max_rate_pct: MAX_RATE_PCT,
            min_term_years: MIN_TERM_YEARS,
            max_term_years: MAX_TERM_YEARS,
        }
    }
}

impl From<&CalculatorSettings> for ValidationLimits {
    fn from(s: &CalculatorSettings) -> Self {
        Self {
            min_loan_amount: s.min_loan_amount,
            min_rate_pct: s.min_rate_pct,
            max_rate_pct: s.max_rate_pct,
            min_term_years: s.min_term_years,
            max_term_years: s.max_term_years,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldOutcome {
    pub field: Field,
    pub error: Option<FieldError>,
}

impl FieldOutcome {
    pub fn valid(&self) -> bool {
        self.error.is_none()
    }

    pub fn message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}

/// Per-field results of one validation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    outcomes: Vec<FieldOutcome>,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.outcomes.iter().all(FieldOutcome::valid)
    }

    pub fn get(&self, field: Field) -> Option<&FieldOutcome> {
        self.outcomes.iter().find(|o| o.field == field)
    }

    pub fn error_for(&self, field: Field) -> Option<&FieldError> {
        self.get(field).and_then(|o| o.error.as_ref())
    }

    pub fn errors(&self) -> impl Iterator<Item = (Field, &FieldError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.error.as_ref().map(|e| (o.field, e)))
    }
}

fn parse_amount(raw: &str) -> Option<f64> {
    parse_leading_float(&raw.replace(GROUPING_SEPARATOR, "")).filter(|v| v.is_finite())
}

/// Whole years only; `"12"` and `"12.0"` pass, `"12.5"` does not.
pub(crate) fn parse_whole_years(raw: &str) -> Option<u32> {
    let value = parse_leading_float(raw)?;
    if value.fract() != 0.0 || value < 0.0 || value > u32::MAX as f64 {
        return None;
    }
    Some(value as u32)
}

fn check_amount(raw: &str, limits: &ValidationLimits) -> Option<FieldError> {
    match parse_amount(raw) {
        Some(amount) if amount >= limits.min_loan_amount => None,
        _ => Some(FieldError::LoanAmountBelowMinimum {
            min: limits.min_loan_amount,
        }),
    }
}

fn check_rate(raw: &str, limits: &ValidationLimits) -> Option<FieldError> {
    match parse_leading_float(raw) {
        Some(rate) if (limits.min_rate_pct..=limits.max_rate_pct).contains(&rate) => None,
        _ => Some(FieldError::RateOutOfRange {
            min: limits.min_rate_pct,
            max: limits.max_rate_pct,
        }),
    }
}

fn check_term(raw: &str, limits: &ValidationLimits) -> Option<FieldError> {
    match parse_whole_years(raw) {
        Some(term) if (limits.min_term_years..=limits.max_term_years).contains(&term) => None,
        _ => Some(FieldError::TermOutOfRange {
            min: limits.min_term_years,
            max: limits.max_term_years,
        }),
    }
}

/// Blank means "no down payment". The upper bound is only enforced when the
/// loan amount itself parses.
fn check_down_payment(raw: &str, amount_raw: &str) -> Option<FieldError> {
    if raw.trim().is_empty() {
        return None;
    }
    let payment = match parse_amount(raw) {
        Some(p) if p >= 0.0 => p,
        _ => return Some(FieldError::DownPaymentInvalid),
    };
    match parse_amount(amount_raw) {
        Some(amount) if payment >= amount => Some(FieldError::DownPaymentTooLarge),
        _ => None,
    }
}

/// Check every field of `form` against `limits`.
pub fn validate_form(form: &RawLoanForm, limits: &ValidationLimits) -> ValidationOutcome {
    let outcomes: Vec<FieldOutcome> = Field::ALL
        .iter()
        .map(|&field| {
            let error = match field {
                Field::LoanAmount => check_amount(&form.amount, limits),
                Field::InterestRate => check_rate(&form.rate, limits),
                Field::LoanTerm => check_term(&form.term, limits),
                Field::DownPayment => check_down_payment(&form.down_payment, &form.amount),
            };
            FieldOutcome { field, error }
        })
        .collect();

    let outcome = ValidationOutcome { outcomes };
    if !outcome.is_valid() {
        for (field, err) in outcome.errors() {
            log::debug!("Validation failed for {}: {}", field, err);
        }
    }
    outcome
}
