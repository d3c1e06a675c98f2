//! Hazard insurance

use crate::rates::RateTables;

/// Monthly hazard insurance. The table rate is already monthly; it is not divided by 12.
pub fn hazard_insurance(rates: &RateTables, purchase_price: f64) -> f64 {
    purchase_price * rates.hazard_insurance_rate
}
