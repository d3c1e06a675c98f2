//! Loan input structures

use serde::{Deserialize, Serialize};

/// Default VA use when the field is not supplied (first use)
fn default_va_first_time_use() -> bool {
    true
}

/// Loan program
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum ProgramType {
    /// Conventional loan, no financed program fee
    #[default]
    #[serde(rename = "CONV")]
    Conventional,
    /// FHA: upfront MIP financed, annual MIP added monthly
    #[serde(rename = "FHA")]
    Fha,
    /// VA: funding fee financed
    #[serde(rename = "VA")]
    Va,
}

impl ProgramType {
    /// Parse a program code (`CONV`, `FHA`, `VA`, case-insensitive).
    ///
    /// Any other code, including an empty one, is treated as Conventional:
    /// no program fee and no monthly MIP.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "CONV" | "CONVENTIONAL" => ProgramType::Conventional,
            "FHA" => ProgramType::Fha,
            "VA" => ProgramType::Va,
            other => {
                log::warn!("Unrecognized loan program {:?}, treating as conventional", other);
                ProgramType::Conventional
            }
        }
    }

    /// Wire code matching the calculator's loan-type values
    pub fn code(&self) -> &'static str {
        match self {
            ProgramType::Conventional => "CONV",
            ProgramType::Fha => "FHA",
            ProgramType::Va => "VA",
        }
    }
}

impl From<String> for ProgramType {
    fn from(code: String) -> Self {
        ProgramType::from_code(&code)
    }
}

/// Null and non-string JSON values fall back to Conventional
impl From<serde_json::Value> for ProgramType {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(code) => ProgramType::from_code(&code),
            other => {
                log::warn!("Non-text loan program {}, treating as conventional", other);
                ProgramType::Conventional
            }
        }
    }
}

impl From<&str> for ProgramType {
    fn from(code: &str) -> Self {
        ProgramType::from_code(code)
    }
}

impl std::fmt::Display for ProgramType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// A single loan to price
///
/// All values are assumed numeric and already coerced by the caller. Nothing
/// here is validated; out-of-range inputs surface as non-finite output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    /// Purchase price in dollars (≥ 0)
    pub purchase_price: f64,

    /// Down payment as a plain percent, 0–100 (3.5 for 3.5%)
    pub down_payment_percent: f64,

    /// Annual interest rate as a plain percent (6.0 for 6%)
    pub interest_rate_percent: f64,

    /// Loan term in years (> 0)
    pub term_years: u32,

    /// Annual property tax rate as a decimal (0.0125 for 1.25%)
    pub state_tax_rate: f64,

    /// Loan program
    #[serde(default)]
    pub program: ProgramType,

    /// VA first use; ignored for other programs
    #[serde(default = "default_va_first_time_use")]
    pub va_first_time_use: bool,
}

impl LoanInput {
    pub fn new(
        purchase_price: f64,
        down_payment_percent: f64,
        interest_rate_percent: f64,
        term_years: u32,
        state_tax_rate: f64,
        program: ProgramType,
    ) -> Self {
        Self {
            purchase_price,
            down_payment_percent,
            interest_rate_percent,
            term_years,
            state_tax_rate,
            program,
            va_first_time_use: default_va_first_time_use(),
        }
    }

    /// Set VA use (first or subsequent)
    pub fn with_va_first_time_use(mut self, is_first_time_use: bool) -> Self {
        self.va_first_time_use = is_first_time_use;
        self
    }

    /// Purchase price less the down payment
    pub fn base_loan_amount(&self) -> f64 {
        self.purchase_price * (1.0 - self.down_payment_percent / 100.0)
    }

    /// Monthly interest rate as a decimal
    pub fn periodic_rate(&self) -> f64 {
        self.interest_rate_percent / 100.0 / 12.0
    }

    /// Number of monthly payments
    pub fn num_payments(&self) -> u32 {
        self.term_years.saturating_mul(12)
    }
}
