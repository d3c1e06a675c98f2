//! Load loan scenarios from CSV

use super::{LoanInput, ProgramType};
use crate::error::{MortgageError, Result};
use csv::Reader;
use std::path::Path;

/// Raw CSV row matching the calculator's form fields
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
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
    #[serde(rename = "LoanType", default)]
    loan_type: String,
    #[serde(rename = "VaUse", default)]
    va_use: String,
}

impl CsvRow {
    fn into_loan(self, row: usize) -> Result<LoanInput> {
        let va_first_time_use = match self.va_use.trim().to_ascii_lowercase().as_str() {
            "" | "first" => true,
            "subsequent" => false,
            other => {
                return Err(MortgageError::InvalidScenario {
                    row,
                    reason: format!("Unknown VaUse: {}", other),
                })
            }
        };

        Ok(LoanInput::new(
            self.purchase_price,
            self.down_payment_pct,
            self.interest_rate_pct,
            self.term_years,
            self.state_tax_rate,
            ProgramType::from_code(&self.loan_type),
        )
        .with_va_first_time_use(va_first_time_use))
    }
}

/// Load all loan scenarios from a CSV file
pub fn load_loans<P: AsRef<Path>>(path: P) -> Result<Vec<LoanInput>> {
    let reader = Reader::from_path(path)?;
    collect_loans(reader)
}

/// Load loan scenarios from any reader (e.g., string buffer, request body)
pub fn load_loans_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<LoanInput>> {
    collect_loans(Reader::from_reader(reader))
}

fn collect_loans<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<LoanInput>> {
    let mut loans = Vec::new();

    // Row numbers are 1-based data rows, header excluded
    for (idx, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        loans.push(row.into_loan(idx + 1)?);
    }

    Ok(loans)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "PurchasePrice,DownPaymentPct,InterestRatePct,TermYears,StateTaxRate,LoanType,VaUse\n";

    #[test]
    fn test_load_sample_loans() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/sample_loans.csv");
        let loans = load_loans(path).expect("Failed to load sample loans");
        assert_eq!(loans.len(), 6);

        assert_eq!(loans[0].program, ProgramType::Fha);
        assert_eq!(loans[0].down_payment_percent, 3.5);
        assert_eq!(loans[1].program, ProgramType::Conventional);
        assert_eq!(loans[2].program, ProgramType::Va);
        assert!(loans[2].va_first_time_use);
        assert!(!loans[3].va_first_time_use);
        assert_eq!(loans[3].term_years, 15);
    }

    #[test]
    fn test_unknown_loan_type_is_conventional() {
        let csv = format!("{}200000,10,6,30,0.01,USDA,\n", HEADER);
        let loans = load_loans_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(loans[0].program, ProgramType::Conventional);
    }

    #[test]
    fn test_bad_va_use_reports_row() {
        let csv = format!(
            "{}200000,10,6,30,0.01,VA,first\n200000,10,6,30,0.01,VA,second\n",
            HEADER
        );
        let err = load_loans_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, MortgageError::InvalidScenario { row: 2, .. }));
    }

    #[test]
    fn test_non_numeric_field_is_csv_error() {
        let csv = format!("{}abc,10,6,30,0.01,FHA,\n", HEADER);
        let err = load_loans_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, MortgageError::Csv(_)));
    }
}
