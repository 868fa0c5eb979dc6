//! Code for reading the eGRID CO2 emission rates CSV file.
use super::*;
use crate::emissions::EmissionRates;
use crate::region::{StateName, state_name_from_abbreviation};
use crate::units::GramsCO2PerKilowattHour;
use anyhow::bail;
use log::debug;
use serde::Deserialize;
use std::collections::HashMap;

const EMISSION_RATES_FILE_NAME: &str = "egrid_co2_all.csv";

/// The state code used for the national aggregate
const NATIONAL_CODE: &str = "US";

#[derive(PartialEq, Debug, Deserialize, Clone)]
struct EmissionRateRaw {
    /// Two-letter state code, or "US"
    state: String,
    /// Grams of CO2 per kWh generated
    #[serde(rename = "co2_g/kWh")]
    co2_g_per_kwh: f64,
}

/// Read CO2 emission rates for electricity generation from the data directory.
///
/// # Arguments
///
/// * `data_dir` - Folder containing the reference data files
///
/// # Returns
///
/// Emission rates for each state and the US, or an error if the national rate is missing or a
/// state appears more than once.
pub fn read_emission_rates(data_dir: &Path) -> Result<EmissionRates> {
    let file_path = data_dir.join(EMISSION_RATES_FILE_NAME);
    let rates_csv = read_csv::<EmissionRateRaw>(&file_path)?;
    read_emission_rates_from_iter(rates_csv.into_iter())
        .with_context(|| input_err_msg(&file_path))
}

fn read_emission_rates_from_iter<I>(iter: I) -> Result<EmissionRates>
where
    I: Iterator<Item = EmissionRateRaw>,
{
    let mut by_state = HashMap::new();
    let mut national = None;
    for row in iter {
        let code = row.state.trim();
        let rate = row.co2_g_per_kwh;
        ensure!(
            rate.is_finite() && rate >= 0.0,
            "Invalid CO2 emission rate {rate} for {code}: must be a non-negative number"
        );
        let rate = GramsCO2PerKilowattHour(rate);

        if code == NATIONAL_CODE {
            ensure!(
                national.replace(rate).is_none(),
                "National CO2 emission rate given more than once"
            );
            continue;
        }

        let Some(state_name) = state_name_from_abbreviation(code) else {
            debug!("Skipping CO2 emission rate for unknown state code '{code}'");
            continue;
        };
        ensure!(
            by_state.insert(StateName::from(state_name), rate).is_none(),
            "CO2 emission rate for {state_name} given more than once"
        );
    }

    let Some(national) = national else {
        bail!("Missing national CO2 emission rate (state code '{NATIONAL_CODE}')");
    };

    Ok(EmissionRates { by_state, national })
}
