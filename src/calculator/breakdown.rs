//! Cost breakdown output structure

use serde::{Deserialize, Serialize};

use crate::amortization::PaymentSplit;
use crate::loan::ProgramType;

/// Monthly costs of one loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Program the breakdown was priced under
    pub program: ProgramType,

    /// Purchase price less the down payment
    pub base_loan_amount: f64,

    /// Base amount plus any financed upfront fee
    pub financed_loan_amount: f64,

    /// Upfront MIP (FHA), funding fee (VA) or zero
    pub program_fee: f64,

    /// Level principal-and-interest payment
    pub monthly_principal_interest: f64,

    /// Interest/principal split of the first payment
    pub first_payment: PaymentSplit,

    pub monthly_tax: f64,
    pub monthly_insurance: f64,

    /// Monthly FHA annual MIP, `None` for other programs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_mip: Option<f64>,

    pub total_monthly_payment: f64,
    pub qualifying_annual_income: f64,
}

impl CostBreakdown {
    /// True if every amount is finite. Callers check this before display;
    /// bad inputs show up here rather than as errors.
    pub fn is_finite(&self) -> bool {
        [
            self.base_loan_amount,
            self.financed_loan_amount,
            self.program_fee,
            self.monthly_principal_interest,
            self.first_payment.interest,
            self.first_payment.principal,
            self.monthly_tax,
            self.monthly_insurance,
            self.monthly_mip.unwrap_or(0.0),
            self.total_monthly_payment,
            self.qualifying_annual_income,
        ]
        .iter()
        .all(|v| v.is_finite())
    }

    /// Monthly MIP, zero when absent
    pub fn monthly_mip_or_zero(&self) -> f64 {
        self.monthly_mip.unwrap_or(0.0)
    }
}
