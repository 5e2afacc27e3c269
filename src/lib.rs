//! Loan calculator core: input normalization, the EMI engine, the form
//! validation gate and the debounced preview cycle used by the web front end.
//!
//! Everything here is plain Rust and runs natively; the Yew app in `main.rs`
//! only renders what these modules return.

use serde::Serialize;
use std::rc::Rc;
use thiserror::Error;
use wasm_bindgen::prelude::*;

pub mod advice;
pub mod breakdown;
pub mod cache;
pub mod config;
pub mod emi;
pub mod format;
pub mod normalize;
pub mod preview;
pub mod scheduler;
pub mod validation;

pub use breakdown::{AmortizationYear, ChartData, LoanBreakdown};
pub use emi::{emi, EmiResult, EmiUnavailable};
pub use normalize::FieldKind;
pub use preview::{compute_preview, LoanInput, PreviewLabel};
pub use scheduler::{Debouncer, Timer};
pub use validation::{validate_form, Field, RawLoanForm, ValidationLimits, ValidationOutcome};

/// Why a submitted form produced no breakdown.
#[derive(Debug, Error)]
pub enum CalculationError {
    #[error("{} field(s) failed validation", .0.errors().count())]
    Invalid(ValidationOutcome),
    #[error(transparent)]
    Unavailable(#[from] EmiUnavailable),
}

/// Validate a submitted form and compute (or reuse) its breakdown.
pub fn calculate_submission(
    form: &RawLoanForm,
    limits: &ValidationLimits,
) -> Result<Rc<LoanBreakdown>, CalculationError> {
    let outcome = validate_form(form, limits);
    if !outcome.is_valid() {
        return Err(CalculationError::Invalid(outcome));
    }

    let amount = normalize::normalize_field(FieldKind::Amount, &form.amount).unwrap_or(0.0);
    let rate = normalize::normalize_field(FieldKind::Rate, &form.rate).unwrap_or(0.0);
    let term = validation::parse_whole_years(&form.term).unwrap_or(0);
    let down_payment =
        normalize::normalize_field(FieldKind::Amount, &form.down_payment).unwrap_or(0.0);

    log::info!(
        "Calculating loan: amount={} rate={} term={} down_payment={}",
        amount,
        rate,
        term,
        down_payment
    );
    Ok(cache::cached_breakdown(amount, rate, term, down_payment)?)
}

#[derive(Serialize)]
struct FieldMessage {
    field: String,
    message: String,
}

#[derive(Serialize)]
#[serde(untagged)]
enum BreakdownResponse {
    Ok(LoanBreakdown),
    Errors { errors: Vec<FieldMessage> },
}

/// Preview label for the given raw field values, callable from JavaScript.
#[wasm_bindgen]
pub fn preview_label(amount: &str, rate: &str, term: &str, down_payment: &str) -> String {
    let form = RawLoanForm {
        amount: amount.to_string(),
        rate: rate.to_string(),
        term: term.to_string(),
        down_payment: down_payment.to_string(),
    };
    PreviewLabel::from_form(&form).to_string()
}

/// Breakdown for a `{ amount, rate, term, down_payment }` object, or
/// `{ errors: [{ field, message }] }` when the form is rejected.
///
/// # Returns
/// Serialized breakdown or error list; `null` only if serialization fails.
#[wasm_bindgen]
pub fn loan_breakdown(form_js: JsValue) -> JsValue {
    let form: RawLoanForm = match serde_wasm_bindgen::from_value(form_js) {
        Ok(f) => f,
        Err(e) => {
            return serde_wasm_bindgen::to_value(&format!("Failed to deserialize form: {}", e))
                .unwrap_or(JsValue::NULL);
        }
    };

    let response = match calculate_submission(&form, &ValidationLimits::default()) {
        Ok(breakdown) => BreakdownResponse::Ok((*breakdown).clone()),
        Err(CalculationError::Invalid(outcome)) => BreakdownResponse::Errors {
            errors: outcome
                .errors()
                .map(|(field, err)| FieldMessage {
                    field: field.to_string(),
                    message: err.to_string(),
                })
                .collect(),
        },
        Err(CalculationError::Unavailable(e)) => BreakdownResponse::Errors {
            errors: vec![FieldMessage {
                field: "form".to_string(),
                message: e.to_string(),
            }],
        },
    };
    serde_wasm_bindgen::to_value(&response).unwrap_or(JsValue::NULL)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(amount: &str, rate: &str, term: &str, down: &str) -> RawLoanForm {
        RawLoanForm {
            amount: amount.into(),
            rate: rate.into(),
            term: term.into(),
            down_payment: down.into(),
        }
    }

    #[test]
    fn valid_submission_yields_breakdown() {
        let b = calculate_submission(
            &form("50,00,000", "8.50", "20", "10,00,000"),
            &ValidationLimits::default(),
        )
        .unwrap();
        assert_eq!(b.principal, 4_000_000.0);
        assert_eq!(b.term_years, 20);
    }

    #[test]
    fn invalid_submission_carries_the_outcome() {
        let err = calculate_submission(&form("50000", "8", "20", ""), &ValidationLimits::default())
            .unwrap_err();
        match err {
            CalculationError::Invalid(outcome) => {
                assert!(outcome.error_for(Field::LoanAmount).is_some());
                assert_eq!(outcome.errors().count(), 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn absurdly_large_amount_is_unavailable_not_infinite() {
        let amount = format!("1{}", "0".repeat(308));
        let err = calculate_submission(&form(&amount, "8.5", "20", ""), &ValidationLimits::default())
            .unwrap_err();
        assert!(matches!(
            err,
            CalculationError::Unavailable(EmiUnavailable::NonFinite)
        ));
    }

    #[test]
    fn preview_label_export_matches_preview() {
        assert_eq!(
            preview_label("10,00,000", "8.5", "20", ""),
            "Calculate EMI (~₹8,678)"
        );
        assert_eq!(preview_label("", "8.5", "20", ""), "Calculate EMI");
    }
}
