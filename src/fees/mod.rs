//! Program fee calculators: FHA MIP, VA funding fee and hazard insurance

mod fha;
mod va;
mod insurance;

pub use fha::{upfront_mip, annual_mip, annual_mip_rate, LONG_TERM_THRESHOLD_YEARS};
pub use va::va_funding_fee;
pub use insurance::hazard_insurance;
