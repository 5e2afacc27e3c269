//! Equated monthly installment (EMI) engine.
//!
//! ```text
//! r   = annual_rate_percent / (12 * 100)
//! n   = term_years * 12
//! emi = P * r * (1 + r)^n / ((1 + r)^n - 1)
//! ```
//!
//! A zero rate amortizes in a straight line (`P / n`). Inputs outside the
//! domain produce an [`EmiUnavailable`] rather than `NaN`.

use serde::Serialize;
use thiserror::Error;

pub const MONTHS_PER_YEAR: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmiResult {
    pub monthly_payment: f64,
}

/// Why no installment could be computed.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum EmiUnavailable {
    #[error("principal must be positive, got {0}")]
    NonPositivePrincipal(f64),
    #[error("interest rate cannot be negative, got {0}%")]
    NegativeRate(f64),
    #[error("loan term must be positive, got {0} years")]
    NonPositiveTerm(f64),
    #[error("inputs must be finite numbers")]
    NonFiniteInput,
    #[error("installment is not a finite positive amount")]
    NonFinite,
}

/// Monthly rate as a fraction, from an annual percentage.
#[inline]
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / (MONTHS_PER_YEAR * 100.0)
}

/// Number of monthly installments in `term_years`.
#[inline]
pub fn payment_count(term_years: f64) -> f64 {
    term_years * MONTHS_PER_YEAR
}

/// Compute the monthly installment for a loan.
pub fn emi(
    principal: f64,
    annual_rate_percent: f64,
    term_years: f64,
) -> Result<EmiResult, EmiUnavailable> {
    if !(principal.is_finite() && annual_rate_percent.is_finite() && term_years.is_finite()) {
        return Err(EmiUnavailable::NonFiniteInput);
    }
    if principal <= 0.0 {
        return Err(EmiUnavailable::NonPositivePrincipal(principal));
    }
    if annual_rate_percent < 0.0 {
        return Err(EmiUnavailable::NegativeRate(annual_rate_percent));
    }
    if term_years <= 0.0 {
        return Err(EmiUnavailable::NonPositiveTerm(term_years));
    }

    let r = monthly_rate(annual_rate_percent);
    let n = payment_count(term_years);
    let growth = (1.0 + r).powf(n);

    let monthly_payment = if r == 0.0 || growth == 1.0 {
        principal / n
    } else {
        principal * r * growth / (growth - 1.0)
    };

    if !monthly_payment.is_finite() || monthly_payment <= 0.0 {
        log::warn!(
            "EMI for principal={} rate={} term={} is not finite",
            principal,
            annual_rate_percent,
            term_years
        );
        return Err(EmiUnavailable::NonFinite);
    }

    Ok(EmiResult { monthly_payment })
}
