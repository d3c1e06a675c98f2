//! Loan cost calculation

mod engine;
mod breakdown;

pub use engine::{calculate, CostCalculator};
pub use breakdown::CostBreakdown;
