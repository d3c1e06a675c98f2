//! Program rate tables: conforming limit, FHA premiums, VA funding fees and hazard insurance

use serde::{Deserialize, Serialize};

use crate::error::{MortgageError, Result};

/// Conforming loan limit separating the two FHA annual MIP tiers
pub const LOAN_LIMIT: f64 = 726_200.0;

/// FHA upfront mortgage insurance premium (flat, financed)
pub const FHA_MIP_RATE: f64 = 0.0175;

/// Hazard insurance rate on purchase price, already monthly
pub const INSURANCE_RATE: f64 = 0.00035;

/// Total monthly payment × 24 gives the qualifying annual income.
///
/// Equivalent to treating the housing payment as half of gross monthly
/// income, annualized. This is a fixed policy constant, not an underwriting
/// debt-to-income rule.
pub const QUALIFYING_INCOME_MULTIPLIER: f64 = 24.0;

/// Tables used when no override is loaded
pub static STANDARD_RATES: RateTables = RateTables::standard();

/// VA down-payment band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VaDownPaymentBand {
    /// [0%, 5%)
    Under5,
    /// [5%, 10%)
    From5To10,
    /// [10%, 100%]
    From10,
}

impl VaDownPaymentBand {
    /// Select the band for a down payment given as a plain percent (7.0 for 7%).
    ///
    /// The percent is converted to a fraction here and compared against 0.05
    /// and 0.10. Passing a fraction (0.07) selects the wrong band.
    pub fn from_percent(down_payment_percent: f64) -> Self {
        let fraction = down_payment_percent / 100.0;
        if fraction < 0.05 {
            VaDownPaymentBand::Under5
        } else if fraction < 0.10 {
            VaDownPaymentBand::From5To10
        } else {
            VaDownPaymentBand::From10
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VaDownPaymentBand::Under5 => "lt5",
            VaDownPaymentBand::From5To10 => "gte5AndLt10",
            VaDownPaymentBand::From10 => "gte10",
        }
    }
}

/// One row of the VA funding fee matrix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VaBandRates {
    pub lt5: f64,
    pub gte5_lt10: f64,
    pub gte10: f64,
}

impl VaBandRates {
    pub fn rate(&self, band: VaDownPaymentBand) -> f64 {
        match band {
            VaDownPaymentBand::Under5 => self.lt5,
            VaDownPaymentBand::From5To10 => self.gte5_lt10,
            VaDownPaymentBand::From10 => self.gte10,
        }
    }
}

/// VA funding fee matrix: first use vs subsequent use
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VaFundingFeeRates {
    pub first_use: VaBandRates,
    pub subsequent_use: VaBandRates,
}

impl VaFundingFeeRates {
    pub fn rate(&self, is_first_time_use: bool, band: VaDownPaymentBand) -> f64 {
        if is_first_time_use {
            self.first_use.rate(band)
        } else {
            self.subsequent_use.rate(band)
        }
    }
}

/// FHA annual MIP rates (annual, applied monthly as rate / 12)
///
/// Each tuple lists rates from the lowest down-payment band upward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FhaAnnualMipRates {
    /// Term > 15 years, loan ≤ limit: (dp < 5, dp ≥ 5)
    pub long_term_at_or_below_limit: (f64, f64),
    /// Term > 15 years, loan > limit: (dp < 5, dp ≥ 5)
    pub long_term_above_limit: (f64, f64),
    /// Term ≤ 15 years, loan ≤ limit: (dp < 10, dp ≥ 10)
    pub short_term_at_or_below_limit: (f64, f64),
    /// Term ≤ 15 years, loan > limit: (dp < 10, 10 ≤ dp < 22, dp ≥ 22)
    pub short_term_above_limit: (f64, f64, f64),
}

/// All rates the cost engine reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTables {
    pub loan_limit: f64,
    pub fha_upfront_mip_rate: f64,
    pub fha_annual_mip: FhaAnnualMipRates,
    pub hazard_insurance_rate: f64,
    pub va_funding_fee: VaFundingFeeRates,
}

impl RateTables {
    pub const fn standard() -> Self {
        Self {
            loan_limit: LOAN_LIMIT,
            fha_upfront_mip_rate: FHA_MIP_RATE,
            fha_annual_mip: FhaAnnualMipRates {
                long_term_at_or_below_limit: (0.0055, 0.005),
                long_term_above_limit: (0.0075, 0.007),
                short_term_at_or_below_limit: (0.004, 0.0015),
                short_term_above_limit: (0.0065, 0.004, 0.0015),
            },
            hazard_insurance_rate: INSURANCE_RATE,
            va_funding_fee: VaFundingFeeRates {
                first_use: VaBandRates {
                    lt5: 0.0215,
                    gte5_lt10: 0.015,
                    gte10: 0.0125,
                },
                subsequent_use: VaBandRates {
                    lt5: 0.033,
                    gte5_lt10: 0.015,
                    gte10: 0.0125,
                },
            },
        }
    }

    /// Every table entry by its file name, in file order
    pub fn entries(&self) -> Vec<(&'static str, f64)> {
        let mip = &self.fha_annual_mip;
        let va = &self.va_funding_fee;
        vec![
            ("loan_limit", self.loan_limit),
            ("fha_upfront_mip_rate", self.fha_upfront_mip_rate),
            ("hazard_insurance_rate", self.hazard_insurance_rate),
            ("fha_mip_long_term_at_or_below_limit_lt5", mip.long_term_at_or_below_limit.0),
            ("fha_mip_long_term_at_or_below_limit_gte5", mip.long_term_at_or_below_limit.1),
            ("fha_mip_long_term_above_limit_lt5", mip.long_term_above_limit.0),
            ("fha_mip_long_term_above_limit_gte5", mip.long_term_above_limit.1),
            ("fha_mip_short_term_at_or_below_limit_lt10", mip.short_term_at_or_below_limit.0),
            ("fha_mip_short_term_at_or_below_limit_gte10", mip.short_term_at_or_below_limit.1),
            ("fha_mip_short_term_above_limit_lt10", mip.short_term_above_limit.0),
            ("fha_mip_short_term_above_limit_gte10_lt22", mip.short_term_above_limit.1),
            ("fha_mip_short_term_above_limit_gte22", mip.short_term_above_limit.2),
            ("va_first_use_lt5", va.first_use.lt5),
            ("va_first_use_gte5_lt10", va.first_use.gte5_lt10),
            ("va_first_use_gte10", va.first_use.gte10),
            ("va_subsequent_use_lt5", va.subsequent_use.lt5),
            ("va_subsequent_use_gte5_lt10", va.subsequent_use.gte5_lt10),
            ("va_subsequent_use_gte10", va.subsequent_use.gte10),
        ]
    }

    /// Mutable slot for a named entry, `None` if the name is not a table entry
    pub(crate) fn slot_mut(&mut self, name: &str) -> Option<&mut f64> {
        let mip = &mut self.fha_annual_mip;
        let va = &mut self.va_funding_fee;
        let slot = match name {
            "loan_limit" => &mut self.loan_limit,
            "fha_upfront_mip_rate" => &mut self.fha_upfront_mip_rate,
            "hazard_insurance_rate" => &mut self.hazard_insurance_rate,
            "fha_mip_long_term_at_or_below_limit_lt5" => &mut mip.long_term_at_or_below_limit.0,
            "fha_mip_long_term_at_or_below_limit_gte5" => &mut mip.long_term_at_or_below_limit.1,
            "fha_mip_long_term_above_limit_lt5" => &mut mip.long_term_above_limit.0,
            "fha_mip_long_term_above_limit_gte5" => &mut mip.long_term_above_limit.1,
            "fha_mip_short_term_at_or_below_limit_lt10" => &mut mip.short_term_at_or_below_limit.0,
            "fha_mip_short_term_at_or_below_limit_gte10" => &mut mip.short_term_at_or_below_limit.1,
            "fha_mip_short_term_above_limit_lt10" => &mut mip.short_term_above_limit.0,
            "fha_mip_short_term_above_limit_gte10_lt22" => &mut mip.short_term_above_limit.1,
            "fha_mip_short_term_above_limit_gte22" => &mut mip.short_term_above_limit.2,
            "va_first_use_lt5" => &mut va.first_use.lt5,
            "va_first_use_gte5_lt10" => &mut va.first_use.gte5_lt10,
            "va_first_use_gte10" => &mut va.first_use.gte10,
            "va_subsequent_use_lt5" => &mut va.subsequent_use.lt5,
            "va_subsequent_use_gte5_lt10" => &mut va.subsequent_use.gte5_lt10,
            "va_subsequent_use_gte10" => &mut va.subsequent_use.gte10,
            _ => return None,
        };
        Some(slot)
    }

    /// Check that every rate is finite and non-negative and the loan limit is positive
    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.entries() {
            if !value.is_finite() || value < 0.0 {
                return Err(MortgageError::InvalidRateTable(format!(
                    "{} must be a finite, non-negative number (got {})",
                    name, value
                )));
            }
        }
        if self.loan_limit <= 0.0 {
            return Err(MortgageError::InvalidRateTable(format!(
                "loan_limit must be positive (got {})",
                self.loan_limit
            )));
        }
        Ok(())
    }
}

impl Default for RateTables {
    fn default() -> Self {
        Self::standard()
    }
}
