//! FHA mortgage insurance premiums (upfront and annual)

use crate::rates::RateTables;

/// Terms longer than this use the long-term annual MIP schedule
pub const LONG_TERM_THRESHOLD_YEARS: u32 = 15;

/// Upfront MIP on the loan amount. Financed into the loan by the aggregator.
pub fn upfront_mip(rates: &RateTables, loan_amount: f64) -> f64 {
    rates.fha_upfront_mip_rate * loan_amount
}

/// Annual MIP rate for a loan.
///
/// `loan_amount` is the financed amount (upfront MIP included) and
/// `down_payment_percent` a plain percent (3.5 for 3.5%). The term is checked
/// first, then the conforming limit, then the down-payment band. A down
/// payment exactly on a break (5, 10, 22) takes the higher band.
pub fn annual_mip_rate(
    rates: &RateTables,
    loan_amount: f64,
    down_payment_percent: f64,
    term_years: u32,
) -> f64 {
    let schedule = &rates.fha_annual_mip;
    let above_limit = loan_amount > rates.loan_limit;

    let rate = if term_years > LONG_TERM_THRESHOLD_YEARS {
        let (low_down, high_down) = if above_limit {
            schedule.long_term_above_limit
        } else {
            schedule.long_term_at_or_below_limit
        };
        if down_payment_percent < 5.0 { low_down } else { high_down }
    } else if above_limit {
        let (low_down, mid_down, high_down) = schedule.short_term_above_limit;
        if down_payment_percent < 10.0 {
            low_down
        } else if down_payment_percent < 22.0 {
            mid_down
        } else {
            high_down
        }
    } else {
        let (low_down, high_down) = schedule.short_term_at_or_below_limit;
        if down_payment_percent < 10.0 { low_down } else { high_down }
    };

    log::trace!(
        "FHA annual MIP: term={} above_limit={} dp={}% -> {}",
        term_years, above_limit, down_payment_percent, rate
    );
    rate
}

/// Monthly equivalent of the annual MIP: `annual_rate × loan_amount / 12`
pub fn annual_mip(
    rates: &RateTables,
    loan_amount: f64,
    down_payment_percent: f64,
    term_years: u32,
) -> f64 {
    annual_mip_rate(rates, loan_amount, down_payment_percent, term_years) * loan_amount / 12.0
}
