//! AWS Lambda handler for pricing a single loan
//!
//! Accepts a JSON `LoanInput` through a Lambda Function URL and returns the
//! cost breakdown. Lambda infers the HTTP response from the returned JSON.
//!
//! Set `MORTGAGE_RATES_PATH` to a directory containing `rates.csv` to price
//! against override tables; they are loaded once at cold start.

use std::path::Path;
use std::sync::OnceLock;

use aws_lambda_events::event::lambda_function_urls::LambdaFunctionUrlRequest;
use chrono::{DateTime, Utc};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use mortgage_cost::{CostBreakdown, CostCalculator, LoanInput, RateTables};
use serde::Serialize;

/// Environment variable naming a rates directory
const RATES_PATH_VAR: &str = "MORTGAGE_RATES_PATH";

static RATES: OnceLock<RateTables> = OnceLock::new();

/// Response body
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CalculationResponse {
    Ok {
        breakdown: CostBreakdown,
        /// Amounts are not all finite; the inputs need checking before display
        #[serde(skip_serializing_if = "std::ops::Not::not")]
        non_finite: bool,
        calculated_at: DateTime<Utc>,
    },
    Failed {
        error: String,
    },
}

fn load_rates() -> Result<RateTables, Error> {
    match std::env::var(RATES_PATH_VAR) {
        Ok(dir) => {
            log::info!("Loading rate overrides from {}", dir);
            Ok(RateTables::from_csv_path(Path::new(&dir))?)
        }
        Err(_) => Ok(RateTables::standard()),
    }
}

fn install_rates(cell: &OnceLock<RateTables>, rates: RateTables) -> Result<(), Error> {
    cell.set(rates)
        .map_err(|_| "rate tables already initialized")?;
    Ok(())
}

fn price(rates: &RateTables, body: &str) -> CalculationResponse {
    let input: LoanInput = match serde_json::from_str(body) {
        Ok(input) => input,
        Err(e) => {
            return CalculationResponse::Failed {
                error: format!("Invalid JSON: {}", e),
            }
        }
    };

    let breakdown = CostCalculator::new(rates).calculate(&input);
    CalculationResponse::Ok {
        non_finite: !breakdown.is_finite(),
        breakdown,
        calculated_at: Utc::now(),
    }
}

/// Lambda handler function
async fn handler(event: LambdaEvent<LambdaFunctionUrlRequest>) -> Result<CalculationResponse, Error> {
    let rates = RATES.get().ok_or("rate tables not initialized")?;
    let request = event.payload;

    if request.is_base64_encoded {
        return Ok(CalculationResponse::Failed {
            error: "Binary request bodies are not supported".to_string(),
        });
    }

    let body = request.body.unwrap_or_default();
    Ok(price(rates, &body))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let rates = load_rates()?;
    rates.validate()?;
    install_rates(&RATES, rates)?;

    run(service_fn(handler)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "purchase_price": 300000,
        "down_payment_percent": 3.5,
        "interest_rate_percent": 6,
        "term_years": 30,
        "state_tax_rate": 0.0125,
        "program": "FHA"
    }"#;

    #[test]
    fn test_price_valid_body() {
        match price(&RateTables::standard(), BODY) {
            CalculationResponse::Ok { breakdown, non_finite, .. } => {
                assert!(!non_finite);
                assert!(breakdown.monthly_mip.is_some());
                assert!((breakdown.financed_loan_amount - 294_566.25).abs() < 1e-6);
            }
            CalculationResponse::Failed { error } => panic!("unexpected error: {}", error),
        }
    }

    #[test]
    fn test_price_invalid_body() {
        let response = price(&RateTables::standard(), "{\"purchase_price\": \"lots\"}");
        assert!(matches!(response, CalculationResponse::Failed { .. }));

        let json = serde_json::to_value(&response).unwrap();
        assert!(json["error"].as_str().unwrap().starts_with("Invalid JSON"));
    }

    #[test]
    fn test_price_null_program_as_conventional() {
        let body = BODY.replace("\"FHA\"", "null");
        match price(&RateTables::standard(), &body) {
            CalculationResponse::Ok { breakdown, .. } => {
                assert_eq!(breakdown.program, mortgage_cost::ProgramType::Conventional);
                assert!(breakdown.monthly_mip.is_none());
                assert_eq!(breakdown.program_fee, 0.0);
            }
            CalculationResponse::Failed { error } => panic!("unexpected error: {}", error),
        }
    }

    #[test]
    fn test_rates_install_once() {
        let cell = OnceLock::new();
        assert!(install_rates(&cell, RateTables::standard()).is_ok());

        let err = install_rates(&cell, RateTables::standard()).unwrap_err();
        assert_eq!(err.to_string(), "rate tables already initialized");
    }

    #[test]
    fn test_response_shape() {
        let json = serde_json::to_value(price(&RateTables::standard(), BODY)).unwrap();
        assert!(json["breakdown"]["total_monthly_payment"].is_number());
        assert!(json["calculated_at"].is_string());
        assert!(json.get("non_finite").is_none());
    }
}
