//! Thread-local cache of computed loan breakdowns.
//!
//! Resubmitting the same figures (or toggling back to them) reuses the
//! earlier amortization schedule instead of stepping through every month
//! again.
//!
//! # Cache Key Structure
//! Bit patterns of `(loan_amount, rate, term_years, down_payment)`; `f64` is
//! not `Hash`, and identical inputs always produce identical bits.

use crate::breakdown::LoanBreakdown;
use crate::config::CACHE_CAPACITY;
use crate::emi::EmiUnavailable;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub type CacheKey = (u64, u64, u32, u64);

thread_local! {
    pub static BREAKDOWN_CACHE: RefCell<HashMap<CacheKey, Rc<LoanBreakdown>>> =
        RefCell::new(HashMap::with_capacity(CACHE_CAPACITY));
}

fn cache_key(loan_amount: f64, rate: f64, term_years: u32, down_payment: f64) -> CacheKey {
    (
        loan_amount.to_bits(),
        rate.to_bits(),
        term_years,
        down_payment.to_bits(),
    )
}

/// Look up or compute the breakdown for these inputs.
pub fn cached_breakdown(
    loan_amount: f64,
    rate: f64,
    term_years: u32,
    down_payment: f64,
) -> Result<Rc<LoanBreakdown>, EmiUnavailable> {
    let key = cache_key(loan_amount, rate, term_years, down_payment);

    if let Some(hit) = BREAKDOWN_CACHE.with(|c| c.borrow().get(&key).cloned()) {
        log::debug!("Breakdown cache hit");
        return Ok(hit);
    }

    let breakdown = Rc::new(LoanBreakdown::calculate(
        loan_amount,
        rate,
        term_years,
        down_payment,
    )?);

    BREAKDOWN_CACHE.with(|c| {
        let mut map = c.borrow_mut();
        if map.len() >= CACHE_CAPACITY {
            map.clear();
        }
        map.insert(key, Rc::clone(&breakdown));
    });
    Ok(breakdown)
}

pub fn cached_count() -> usize {
    BREAKDOWN_CACHE.with(|c| c.borrow().len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_inputs_share_one_breakdown() {
        let a = cached_breakdown(2_000_000.0, 8.5, 20, 400_000.0).unwrap();
        let b = cached_breakdown(2_000_000.0, 8.5, 20, 400_000.0).unwrap();
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(cached_count(), 1);
    }

    #[test]
    fn failures_are_not_cached() {
        assert!(cached_breakdown(100_000.0, 8.5, 20, 100_000.0).is_err());
        assert_eq!(cached_count(), 0);
    }

    #[test]
    fn cache_is_bounded() {
        for i in 0..(CACHE_CAPACITY as u32 + 5) {
            cached_breakdown(1_000_000.0 + i as f64, 9.0, 10, 0.0).unwrap();
        }
        assert!(cached_count() <= CACHE_CAPACITY);
    }
}
