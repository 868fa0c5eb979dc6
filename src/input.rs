//! Common routines for handling input data.
use crate::reference::ReferenceData;
use anyhow::{Context, Result, ensure};
use chrono::NaiveDate;
use serde::de::{Deserialize, DeserializeOwned, Deserializer};
use std::fs;
use std::path::Path;

mod emissions;
use emissions::read_emission_rates;
mod prices;
use prices::{read_electricity_prices, read_petroleum_prices};
mod vehicle;
use vehicle::read_vehicles;

/// Read a series of type `T`s from a CSV file.
///
/// # Arguments
///
/// * `file_path` - Path to the CSV file
///
/// # Returns
///
/// The deserialised rows, or an error if the file could not be read, a row is malformed or the
/// file has no rows.
pub fn read_csv<T: DeserializeOwned>(file_path: &Path) -> Result<Vec<T>> {
    let rows = csv::Reader::from_path(file_path)
        .and_then(|mut reader| reader.deserialize().collect::<Result<Vec<T>, _>>())
        .with_context(|| input_err_msg(file_path))?;
    ensure!(
        !rows.is_empty(),
        "CSV file {} cannot be empty",
        file_path.display()
    );

    Ok(rows)
}

/// Parse a TOML file at the specified path.
///
/// # Arguments
///
/// * `file_path` - Path to the TOML file
///
/// # Returns
///
/// * The deserialised TOML data or an error if the file could not be read or parsed.
pub fn read_toml<T: DeserializeOwned>(file_path: &Path) -> Result<T> {
    let toml_str = fs::read_to_string(file_path).with_context(|| input_err_msg(file_path))?;
    let toml_data = toml::from_str(&toml_str).with_context(|| input_err_msg(file_path))?;
    Ok(toml_data)
}

/// Format an error message to include the file path
pub fn input_err_msg<P: AsRef<Path>>(file_path: P) -> String {
    format!("Error reading {}", file_path.as_ref().display())
}

/// Parse a period given as either `YYYY-MM-DD` or `YYYY-MM` (taken as the first of the month)
fn parse_period(period: &str) -> Option<NaiveDate> {
    let period = period.trim();
    NaiveDate::parse_from_str(period, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{period}-01"), "%Y-%m-%d"))
        .ok()
}

/// Read a period column into a [`NaiveDate`]
pub fn deserialise_period<'de, D>(deserialiser: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let period: String = Deserialize::deserialize(deserialiser)?;
    parse_period(&period).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "Invalid period '{period}': expected YYYY-MM-DD or YYYY-MM"
        ))
    })
}

/// Read all reference data from the specified directory.
///
/// # Arguments
///
/// * `data_dir` - Folder containing the reference data files
///
/// # Returns
///
/// The loaded [`ReferenceData`] or an error.
pub fn load_reference_data(data_dir: &Path) -> Result<ReferenceData> {
    ensure!(
        data_dir.is_dir(),
        "Data directory {} does not exist",
        data_dir.display()
    );

    let vehicles = read_vehicles(data_dir)?;
    let petroleum_prices = read_petroleum_prices(data_dir)?;
    let electricity_prices = read_electricity_prices(data_dir)?;
    let emission_rates = read_emission_rates(data_dir)?;

    Ok(ReferenceData {
        vehicles,
        petroleum_prices,
        electricity_prices,
        emission_rates,
    })
}
