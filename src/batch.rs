//! Batch runner for pricing many loans against one set of rate tables
//!
//! Loads the rate tables once, then prices scenarios in parallel and writes
//! one flat CSV row per loan.

use std::io::Write;
use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;

use crate::calculator::{CostBreakdown, CostCalculator};
use crate::error::Result;
use crate::loan::{LoanInput, ProgramType};
use crate::rates::RateTables;

/// Flat output row: the loan's inputs followed by its breakdown
#[derive(Debug, Serialize)]
struct BatchRow {
    #[serde(rename = "PurchasePrice")]
    purchase_price: f64,
    #[serde(rename = "DownPaymentPct")]
    down_payment_pct: f64,
    #[serde(rename = "InterestRatePct")]
    interest_rate_pct: f64,
    #[serde(rename = "TermYears")]
    term_years: u32,
    #[serde(rename = "StateTaxRate")]
    state_tax_rate: f64,
    #[serde(rename = "LoanType")]
    loan_type: &'static str,
    #[serde(rename = "VaUse")]
    va_use: &'static str,
    #[serde(rename = "BaseLoanAmount")]
    base_loan_amount: f64,
    #[serde(rename = "ProgramFee")]
    program_fee: f64,
    #[serde(rename = "FinancedLoanAmount")]
    financed_loan_amount: f64,
    #[serde(rename = "PrincipalInterest")]
    principal_interest: f64,
    #[serde(rename = "FirstInterest")]
    first_interest: f64,
    #[serde(rename = "FirstPrincipal")]
    first_principal: f64,
    #[serde(rename = "Tax")]
    tax: f64,
    #[serde(rename = "Insurance")]
    insurance: f64,
    #[serde(rename = "MIP")]
    mip: Option<f64>,
    #[serde(rename = "MonthlyPayment")]
    monthly_payment: f64,
    #[serde(rename = "Income")]
    income: f64,
}

impl BatchRow {
    fn new(input: &LoanInput, b: &CostBreakdown) -> Self {
        Self {
            purchase_price: input.purchase_price,
            down_payment_pct: input.down_payment_percent,
            interest_rate_pct: input.interest_rate_percent,
            term_years: input.term_years,
            state_tax_rate: input.state_tax_rate,
            loan_type: b.program.code(),
            va_use: match (b.program, input.va_first_time_use) {
                (ProgramType::Va, true) => "first",
                (ProgramType::Va, false) => "subsequent",
                _ => "",
            },
            base_loan_amount: b.base_loan_amount,
            program_fee: b.program_fee,
            financed_loan_amount: b.financed_loan_amount,
            principal_interest: b.monthly_principal_interest,
            first_interest: b.first_payment.interest,
            first_principal: b.first_payment.principal,
            tax: b.monthly_tax,
            insurance: b.monthly_insurance,
            mip: b.monthly_mip,
            monthly_payment: b.total_monthly_payment,
            income: b.qualifying_annual_income,
        }
    }
}

/// Pre-loaded batch runner
///
/// # Example
/// ```ignore
/// let runner = BatchRunner::from_csv_path(Path::new("data/rates"))?;
/// let loans = load_loans("data/sample_loans.csv")?;
/// let results = runner.run_batch(&loans);
/// ```
#[derive(Debug, Clone)]
pub struct BatchRunner {
    rates: RateTables,
}

impl BatchRunner {
    /// Runner over the standard tables
    pub fn new() -> Self {
        Self {
            rates: RateTables::standard(),
        }
    }

    /// Runner with tables loaded from a rates directory
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        Ok(Self {
            rates: RateTables::from_csv_path(path)?,
        })
    }

    pub fn with_rates(rates: RateTables) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &RateTables {
        &self.rates
    }

    pub fn calculator(&self) -> CostCalculator<'_> {
        CostCalculator::new(&self.rates)
    }

    /// Price a single loan
    pub fn run(&self, input: &LoanInput) -> CostBreakdown {
        self.calculator().calculate(input)
    }

    /// Price every loan in parallel; results keep input order
    pub fn run_batch(&self, inputs: &[LoanInput]) -> Vec<CostBreakdown> {
        let start = Instant::now();
        let calculator = self.calculator();

        let results: Vec<CostBreakdown> = inputs
            .par_iter()
            .map(|input| calculator.calculate(input))
            .collect();

        let non_finite = results.iter().filter(|b| !b.is_finite()).count();
        if non_finite > 0 {
            log::warn!("{} of {} loans produced non-finite amounts", non_finite, results.len());
        }
        log::info!("Priced {} loans in {:?}", results.len(), start.elapsed());

        results
    }

    /// Write inputs and their breakdowns as CSV
    pub fn write_csv<W: Write>(
        &self,
        inputs: &[LoanInput],
        results: &[CostBreakdown],
        writer: W,
    ) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for (input, breakdown) in inputs.iter().zip(results) {
            csv_writer.serialize(BatchRow::new(input, breakdown))?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

impl Default for BatchRunner {
    fn default() -> Self {
        Self::new()
    }
}
