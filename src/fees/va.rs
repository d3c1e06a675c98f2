//! VA funding fee

use crate::rates::{RateTables, VaDownPaymentBand};

/// VA funding fee on the base loan amount. Financed into the loan by the aggregator.
///
/// `down_payment_percent` must be a plain percent (7.0 for 7%). The band is
/// selected on `down_payment_percent / 100` against 0.05 and 0.10, so passing
/// a fraction such as 0.07 always lands in the lowest band.
pub fn va_funding_fee(
    rates: &RateTables,
    loan_amount: f64,
    down_payment_percent: f64,
    is_first_time_use: bool,
) -> f64 {
    let band = VaDownPaymentBand::from_percent(down_payment_percent);
    let rate = rates.va_funding_fee.rate(is_first_time_use, band);
    log::trace!(
        "VA funding fee: first_use={} band={} -> {}",
        is_first_time_use,
        band.as_str(),
        rate
    );
    loan_amount * rate
}
