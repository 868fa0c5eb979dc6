//! Code for reading fuel and electricity price CSV files.
use super::*;
use crate::prices::{ElectricityPrices, PetroleumArea, PetroleumPrices, PriceSeries};
use crate::region::{StateName, state_name_from_abbreviation};
use crate::units::{CentsPerKilowattHour, DollarsPerGallon, UnitType};
use crate::vehicle::PetroleumFuel;
use log::debug;
use serde::Deserialize;
use std::collections::HashMap;
use std::hash::Hash;

const PETROLEUM_PRICES_FILE_NAME: &str = "petrol_prices.csv";
const STATE_ELECTRICITY_PRICES_FILE_NAME: &str = "state_electricity.csv";
const US_ELECTRICITY_PRICES_FILE_NAME: &str = "us_electricity.csv";

/// A row of the EIA weekly retail petroleum price table
#[derive(PartialEq, Debug, Deserialize, Clone)]
struct PetroleumPriceRaw {
    #[serde(deserialize_with = "deserialise_period")]
    period: NaiveDate,
    /// e.g. "PADD 1A" or "U.S."
    #[serde(rename = "area-name")]
    area_name: String,
    /// e.g. "Conventional Regular Gasoline"
    #[serde(rename = "product-name")]
    product_name: String,
    /// Price in dollars per gallon
    value: f64,
}

/// A row of the EIA monthly retail electricity price table for states
#[derive(PartialEq, Debug, Deserialize, Clone)]
struct StateElectricityPriceRaw {
    #[serde(deserialize_with = "deserialise_period")]
    period: NaiveDate,
    /// Two-letter state code
    #[serde(rename = "State")]
    state: String,
    /// Price in cents per kWh
    price: f64,
}

/// A row of the EIA monthly retail electricity price table for the US as a whole
#[derive(PartialEq, Debug, Deserialize, Clone)]
struct UsElectricityPriceRaw {
    #[serde(deserialize_with = "deserialise_period")]
    period: NaiveDate,
    /// Price in cents per kWh
    price: f64,
}

/// Check that a price is a finite, non-negative number
fn check_price(price: f64, period: NaiveDate) -> Result<()> {
    ensure!(
        price.is_finite() && price >= 0.0,
        "Invalid price {price} for period {period}: must be a non-negative number"
    );

    Ok(())
}

/// Collect dated prices into a series for each key
fn into_series<K, P>(samples: HashMap<K, Vec<(NaiveDate, P)>>) -> HashMap<K, PriceSeries<P>>
where
    K: Eq + Hash,
    P: UnitType,
{
    samples
        .into_iter()
        .map(|(key, samples)| (key, PriceSeries::new(samples)))
        .collect()
}

/// Read gasoline and diesel prices from the data directory.
///
/// Rows for products or areas which aren't used for estimates are skipped.
///
/// # Arguments
///
/// * `data_dir` - Folder containing the reference data files
///
/// # Returns
///
/// Price series keyed by fuel and area.
pub fn read_petroleum_prices(data_dir: &Path) -> Result<PetroleumPrices> {
    let file_path = data_dir.join(PETROLEUM_PRICES_FILE_NAME);
    let prices_csv = read_csv::<PetroleumPriceRaw>(&file_path)?;
    read_petroleum_prices_from_iter(prices_csv.into_iter())
        .with_context(|| input_err_msg(&file_path))
}

fn read_petroleum_prices_from_iter<I>(iter: I) -> Result<PetroleumPrices>
where
    I: Iterator<Item = PetroleumPriceRaw>,
{
    let mut samples = HashMap::new();
    let mut skipped = 0;
    for row in iter {
        let fuel = PetroleumFuel::from_eia_product_name(&row.product_name);
        let area = PetroleumArea::from_eia_area_name(&row.area_name);
        let (Some(fuel), Some(area)) = (fuel, area) else {
            skipped += 1;
            continue;
        };

        check_price(row.value, row.period)?;
        samples
            .entry((fuel, area))
            .or_insert_with(Vec::new)
            .push((row.period, DollarsPerGallon(row.value)));
    }

    ensure!(!samples.is_empty(), "No usable petroleum prices found");
    if skipped > 0 {
        debug!("Skipped {skipped} petroleum price rows for other products or areas");
    }

    Ok(PetroleumPrices::new(into_series(samples)))
}

/// Read electricity prices for each state and for the US from the data directory.
///
/// Rows whose state code isn't recognised are skipped.
///
/// # Arguments
///
/// * `data_dir` - Folder containing the reference data files
///
/// # Returns
///
/// State and national electricity price series.
pub fn read_electricity_prices(data_dir: &Path) -> Result<ElectricityPrices> {
    let file_path = data_dir.join(STATE_ELECTRICITY_PRICES_FILE_NAME);
    let state_csv = read_csv::<StateElectricityPriceRaw>(&file_path)?;
    let by_state = read_state_electricity_prices_from_iter(state_csv.into_iter())
        .with_context(|| input_err_msg(&file_path))?;

    let file_path = data_dir.join(US_ELECTRICITY_PRICES_FILE_NAME);
    let national = read_csv::<UsElectricityPriceRaw>(&file_path)?
        .into_iter()
        .map(|row| {
            check_price(row.price, row.period)?;
            Ok((row.period, CentsPerKilowattHour(row.price)))
        })
        .collect::<Result<Vec<_>>>()
        .with_context(|| input_err_msg(&file_path))?;

    Ok(ElectricityPrices {
        by_state,
        national: PriceSeries::new(national),
    })
}

fn read_state_electricity_prices_from_iter<I>(
    iter: I,
) -> Result<HashMap<StateName, PriceSeries<CentsPerKilowattHour>>>
where
    I: Iterator<Item = StateElectricityPriceRaw>,
{
    let mut samples = HashMap::new();
    for row in iter {
        let Some(state_name) = state_name_from_abbreviation(&row.state) else {
            debug!("Skipping electricity price for unknown state code '{}'", row.state);
            continue;
        };

        check_price(row.price, row.period)?;
        samples
            .entry(StateName::from(state_name))
            .or_insert_with(Vec::new)
            .push((row.period, CentsPerKilowattHour(row.price)));
    }

    ensure!(!samples.is_empty(), "No usable state electricity prices found");

    Ok(into_series(samples))
}
