//! Mortgage Cost - Loan cost engine for conventional, FHA and VA mortgages
//!
//! This library provides:
//! - Program rate tables (conforming limit, FHA MIP, VA funding fee, hazard insurance)
//! - Program fee calculators (upfront and annual MIP, VA funding fee)
//! - Level-payment amortization with the first payment's split
//! - A cost aggregator producing the full monthly breakdown and qualifying income
//! - CSV scenario loading and parallel batch pricing

pub mod error;
pub mod rates;
pub mod loan;
pub mod fees;
pub mod amortization;
pub mod calculator;
pub mod batch;
pub mod report;

// Re-export commonly used types
pub use error::{MortgageError, Result};
pub use rates::{RateTables, STANDARD_RATES};
pub use loan::{LoanInput, ProgramType};
pub use calculator::{calculate, CostBreakdown, CostCalculator};
pub use batch::BatchRunner;
