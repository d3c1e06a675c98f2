//! Loan input structures and scenario loading

mod data;
pub mod loader;

pub use data::{LoanInput, ProgramType};
pub use loader::{load_loans, load_loans_from_reader};
