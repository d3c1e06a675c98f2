//! CSV-based rate table overrides
//!
//! Reads `rates.csv` (`name,value` rows) from a directory. Entries absent
//! from the file keep their standard value.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::tables::RateTables;
use crate::error::{MortgageError, Result};

/// Default path to the rates directory
pub const DEFAULT_RATES_PATH: &str = "data/rates";

/// File name inside the rates directory
pub const RATES_FILE: &str = "rates.csv";

#[derive(Debug, serde::Deserialize)]
struct RateRow {
    name: String,
    value: String,
}

/// Load rate overrides from `<path>/rates.csv`
pub fn load_rates(path: &Path) -> Result<RateTables> {
    let file = File::open(path.join(RATES_FILE))?;
    load_rates_from_reader(file)
}

/// Load rate overrides from any reader
pub fn load_rates_from_reader<R: Read>(reader: R) -> Result<RateTables> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut tables = RateTables::standard();
    let mut overridden = 0usize;

    for result in csv_reader.deserialize() {
        let row: RateRow = result?;
        let value: f64 = row.value.parse().map_err(|_| MortgageError::InvalidRateValue {
            name: row.name.clone(),
            value: row.value.clone(),
        })?;
        let slot = tables
            .slot_mut(&row.name)
            .ok_or_else(|| MortgageError::UnknownRate(row.name.clone()))?;
        *slot = value;
        overridden += 1;
    }

    tables.validate()?;
    log::info!("Loaded {} rate entries", overridden);
    Ok(tables)
}

impl RateTables {
    /// Load tables from the default location (data/rates/)
    pub fn from_csv() -> Result<Self> {
        Self::from_csv_path(Path::new(DEFAULT_RATES_PATH))
    }

    /// Load tables from a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        load_rates(path)
    }
}
