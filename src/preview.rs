//! The live EMI preview: one recompute step from the form's current text to
//! the label shown on the submit button.

use crate::emi::{emi, EmiResult, EmiUnavailable};
use crate::format::format_rupees;
use crate::normalize::{normalize_field, FieldKind};
use crate::validation::RawLoanForm;
use std::fmt;
use thiserror::Error;

const BUTTON_LABEL: &str = "Calculate EMI";

/// Normalized numeric view of the form. Fields without a value read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoanInput {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub term_years: f64,
    pub down_payment: f64,
}

impl LoanInput {
    pub fn from_form(form: &RawLoanForm) -> Self {
        Self {
            principal: normalize_field(FieldKind::Amount, &form.amount).unwrap_or(0.0),
            annual_rate_percent: normalize_field(FieldKind::Rate, &form.rate).unwrap_or(0.0),
            term_years: normalize_field(FieldKind::Term, &form.term).unwrap_or(0.0),
            down_payment: normalize_field(FieldKind::Amount, &form.down_payment)
                .unwrap_or(0.0),
        }
    }

    /// Amount actually borrowed, when the down payment leaves something to finance.
    pub fn financed(&self) -> Option<f64> {
        (self.principal > self.down_payment).then(|| self.principal - self.down_payment)
    }
}

/// Why the preview shows the placeholder instead of an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PreviewUnavailable {
    #[error("{0} has no value")]
    Missing(&'static str),
    #[error("down payment leaves nothing to finance")]
    NothingFinanced,
    #[error(transparent)]
    Engine(#[from] EmiUnavailable),
}

/// Run the EMI engine for a preview, if every field needed is present.
pub fn compute_preview(input: &LoanInput) -> Result<EmiResult, PreviewUnavailable> {
    if input.principal == 0.0 {
        return Err(PreviewUnavailable::Missing("loan amount"));
    }
    if input.annual_rate_percent == 0.0 {
        return Err(PreviewUnavailable::Missing("interest rate"));
    }
    if input.term_years == 0.0 {
        return Err(PreviewUnavailable::Missing("loan term"));
    }
    let financed = input.financed().ok_or(PreviewUnavailable::NothingFinanced)?;
    Ok(emi(financed, input.annual_rate_percent, input.term_years)?)
}

/// Text for the preview sink.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PreviewLabel {
    Estimate {
        monthly_payment: f64,
    },
    #[default]
    Placeholder,
}

impl PreviewLabel {
    pub fn from_form(form: &RawLoanForm) -> Self {
        let input = LoanInput::from_form(form);
        match compute_preview(&input) {
            Ok(result) => {
                log::debug!("Preview EMI {:.2} for {:?}", result.monthly_payment, input);
                PreviewLabel::Estimate {
                    monthly_payment: result.monthly_payment,
                }
            }
            Err(reason) => {
                log::debug!("Preview unavailable: {}", reason);
                PreviewLabel::Placeholder
            }
        }
    }

    pub fn is_estimate(&self) -> bool {
        matches!(self, PreviewLabel::Estimate { .. })
    }
}

impl fmt::Display for PreviewLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreviewLabel::Estimate { monthly_payment } => {
                write!(f, "{} (~{})", BUTTON_LABEL, format_rupees(*monthly_payment))
            }
            PreviewLabel::Placeholder => f.write_str(BUTTON_LABEL),
        }
    }
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
    fn grouped_amounts_are_normalized() {
        let input = LoanInput::from_form(&form("15,00,000", "8.50", "20", "5,00,000"));
        assert_eq!(input.principal, 1_500_000.0);
        assert_eq!(input.down_payment, 500_000.0);
        assert_eq!(input.financed(), Some(1_000_000.0));
    }

    #[test]
    fn estimate_label_rounds_and_groups() {
        let label = PreviewLabel::from_form(&form("15,00,000", "8.5", "20", "5,00,000"));
        assert!(label.is_estimate());
        assert_eq!(label.to_string(), "Calculate EMI (~₹8,678)");
    }

    #[test]
    fn missing_fields_show_the_placeholder() {
        for f in [
            form("", "8.5", "20", ""),
            form("1000000", "", "20", ""),
            form("1000000", "8.5", "", ""),
            form("1000000", "0", "20", ""),
        ] {
            let label = PreviewLabel::from_form(&f);
            assert_eq!(label, PreviewLabel::Placeholder);
            assert_eq!(label.to_string(), "Calculate EMI");
        }
    }

    #[test]
    fn down_payment_at_or_above_amount_suppresses_preview() {
        let input = LoanInput::from_form(&form("500000", "9", "10", "500000"));
        assert_eq!(
            compute_preview(&input),
            Err(PreviewUnavailable::NothingFinanced)
        );
        let input = LoanInput::from_form(&form("500000", "9", "10", "499999"));
        assert!(compute_preview(&input).is_ok());
    }

    #[test]
    fn unparseable_text_reads_as_no_value() {
        let input = LoanInput::from_form(&form("abc", ".", "x", ""));
        assert_eq!(input, LoanInput::default());
        assert_eq!(
            compute_preview(&input),
            Err(PreviewUnavailable::Missing("loan amount"))
        );
    }

    #[test]
    fn engine_failures_never_render_nan() {
        let label = PreviewLabel::from_form(&form("1000000", "1000000", "1000000", ""));
        assert_eq!(label, PreviewLabel::Placeholder);
        assert!(!label.to_string().contains("NaN"));
    }
}
