//! Full loan breakdown shown after a successful submission: totals, the
//! principal/interest split and a yearly amortization schedule.

use crate::emi::{emi, monthly_rate, EmiUnavailable, MONTHS_PER_YEAR};
use serde::Serialize;

/// Principal and interest paid during one loan year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmortizationYear {
    pub year: u32,
    pub principal_paid: f64,
    pub interest_paid: f64,
    pub total_payment: f64,
    /// Outstanding balance at year end, never negative.
    pub balance: f64,
}

/// The two values handed to the doughnut chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartData {
    pub principal: f64,
    pub interest: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanBreakdown {
    pub loan_amount: f64,
    pub down_payment: f64,
    /// Financed amount: `loan_amount - down_payment`.
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub term_years: u32,
    pub emi: f64,
    pub total_payment: f64,
    pub total_interest: f64,
    pub interest_percent: f64,
    pub principal_percent: f64,
    pub schedule: Vec<AmortizationYear>,
}

/// Round to one decimal place.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl LoanBreakdown {
    /// Compute the breakdown for already validated inputs.
    pub fn calculate(
        loan_amount: f64,
        annual_rate_percent: f64,
        term_years: u32,
        down_payment: f64,
    ) -> Result<Self, EmiUnavailable> {
        let principal = loan_amount - down_payment;
        let installment = emi(principal, annual_rate_percent, term_years as f64)?.monthly_payment;

        let months = term_years as f64 * MONTHS_PER_YEAR;
        let total_payment = installment * months;
        let total_interest = total_payment - principal;
        let interest_percent = round1(total_interest / total_payment * 100.0);
        let principal_percent = round1(principal / total_payment * 100.0);

        if ![total_payment, total_interest, interest_percent, principal_percent]
            .iter()
            .all(|v| v.is_finite())
        {
            log::warn!(
                "Breakdown totals overflow for principal={} emi={}",
                principal,
                installment
            );
            return Err(EmiUnavailable::NonFinite);
        }

        let schedule = amortization_schedule(principal, annual_rate_percent, term_years, installment);

        log::debug!(
            "Breakdown: principal={} emi={:.2} total_interest={:.2}",
            principal,
            installment,
            total_interest
        );

        Ok(Self {
            loan_amount,
            down_payment,
            principal,
            annual_rate_percent,
            term_years,
            emi: installment,
            total_payment,
            total_interest,
            interest_percent,
            principal_percent,
            schedule,
        })
    }

    pub fn chart_data(&self) -> ChartData {
        ChartData {
            principal: self.principal,
            interest: self.total_interest.max(0.0),
        }
    }
}

/// Year-by-year amortization, stepping through each month's interest and
/// principal split.
pub fn amortization_schedule(
    principal: f64,
    annual_rate_percent: f64,
    term_years: u32,
    installment: f64,
) -> Vec<AmortizationYear> {
    let r = monthly_rate(annual_rate_percent);
    let mut balance = principal;
    let mut schedule = Vec::with_capacity(term_years as usize);

    for year in 1..=term_years {
        let mut interest_paid = 0.0;
        let mut principal_paid = 0.0;

        for _ in 0..MONTHS_PER_YEAR as u32 {
            if balance <= 0.0 {
                break;
            }
            let interest = balance * r;
            let principal_part = installment - interest;
            interest_paid += interest;
            principal_paid += principal_part;
            balance -= principal_part;
        }

        balance = balance.max(0.0);
        schedule.push(AmortizationYear {
            year,
            principal_paid,
            interest_paid,
            total_payment: principal_paid + interest_paid,
            balance,
        });
    }
    schedule
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_and_split_for_a_typical_home_loan() {
        // 50 lakh property, 10 lakh down, 8.5% over 20 years
        let b = LoanBreakdown::calculate(5_000_000.0, 8.5, 20, 1_000_000.0).unwrap();
        assert_eq!(b.principal, 4_000_000.0);
        assert!((b.emi - 34_712.93).abs() < 0.01, "EMI was {}", b.emi);
        assert!((b.total_interest - 4_331_103.04).abs() < 0.5);
        assert_eq!(b.interest_percent, 52.0);
        assert_eq!(b.principal_percent, 48.0);
        assert_eq!(b.schedule.len(), 20);
    }

    #[test]
    fn schedule_pays_off_the_principal() {
        let b = LoanBreakdown::calculate(1_200_000.0, 9.0, 15, 200_000.0).unwrap();
        let repaid: f64 = b.schedule.iter().map(|y| y.principal_paid).sum();
        let interest: f64 = b.schedule.iter().map(|y| y.interest_paid).sum();

        assert!((repaid - b.principal).abs() < 1.0, "repaid {}", repaid);
        assert!((interest - b.total_interest).abs() < 1.0, "interest {}", interest);
        assert!(b.schedule.last().unwrap().balance < 1.0);

        // balances only go down and interest shrinks as the loan ages
        for pair in b.schedule.windows(2) {
            assert!(pair[1].balance <= pair[0].balance);
            assert!(pair[1].interest_paid < pair[0].interest_paid);
        }
    }

    #[test]
    fn zero_rate_has_no_interest() {
        let b = LoanBreakdown::calculate(120_000.0, 0.0, 10, 0.0).unwrap();
        assert_eq!(b.emi, 1000.0);
        assert_eq!(b.total_interest, 0.0);
        assert_eq!(b.principal_percent, 100.0);
        assert!(b.schedule.iter().all(|y| y.interest_paid == 0.0));
        assert_eq!(b.chart_data(), ChartData { principal: 120_000.0, interest: 0.0 });
    }

    #[test]
    fn overflowing_totals_are_unavailable() {
        assert_eq!(
            LoanBreakdown::calculate(1e308, 8.5, 20, 0.0).unwrap_err(),
            EmiUnavailable::NonFinite
        );
    }

    #[test]
    fn down_payment_covering_the_loan_is_unavailable() {
        assert!(matches!(
            LoanBreakdown::calculate(100_000.0, 8.0, 10, 100_000.0),
            Err(EmiUnavailable::NonPositivePrincipal(_))
        ));
    }
}
