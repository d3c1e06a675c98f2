//! Rate tables read by the fee calculators and the cost aggregator

mod tables;
pub mod loader;

pub use tables::{
    RateTables, FhaAnnualMipRates, VaFundingFeeRates, VaBandRates, VaDownPaymentBand,
    STANDARD_RATES, LOAN_LIMIT, FHA_MIP_RATE, INSURANCE_RATE, QUALIFYING_INCOME_MULTIPLIER,
};
pub use loader::{load_rates, load_rates_from_reader, DEFAULT_RATES_PATH};
