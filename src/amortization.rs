//! Level-payment amortization (PMT)
//!
//! Only the periodic payment and the first payment's interest/principal split
//! are produced; no schedule is generated.

use serde::{Deserialize, Serialize};

/// Interest and principal portions of a single payment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentSplit {
    pub interest: f64,
    pub principal: f64,
}

/// Level periodic payment for a fixed-rate loan.
///
/// # Arguments
/// * `periodic_rate` - Rate per period as a decimal (annual rate / 12 for monthly)
/// * `num_payments` - Number of payments (term years × 12)
/// * `principal` - Amount financed
///
/// # Returns
/// `principal × r / (1 − (1 + r)^(−n))`. A zero rate returns the straight-line
/// `principal / n` instead of the 0/0 the formula would give. Zero payments
/// yield a non-finite result.
pub fn level_payment(periodic_rate: f64, num_payments: u32, principal: f64) -> f64 {
    let n = num_payments as f64;

    if periodic_rate == 0.0 {
        return principal / n;
    }

    principal * periodic_rate / (1.0 - (1.0 + periodic_rate).powf(-n))
}

/// Split of the first payment: interest accrues on the full principal
pub fn first_payment_split(periodic_rate: f64, payment: f64, principal: f64) -> PaymentSplit {
    let interest = principal * periodic_rate;
    PaymentSplit {
        interest,
        principal: payment - interest,
    }
}
