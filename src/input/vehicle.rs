//! Code for reading the EPA vehicle table.
use super::*;
use crate::error::EstimateError;
use crate::id::VehicleID;
use crate::reference::VehicleTable;
use crate::units::{GramsCO2PerMile, KilowattHoursPerMile, Miles, MilesPerGallon};
use crate::vehicle::{CityHighway, PetroleumFuel, Powertrain, VehicleSpec};
use log::{debug, warn};
use serde::Deserialize;
use std::rc::Rc;
use std::str::FromStr;

const VEHICLES_FILE_NAME: &str = "vehicles.csv";

/// The `fuelType1` value for battery-electric vehicles
const ELECTRICITY_FUEL: &str = "Electricity";

/// The `atvType` value for plug-in hybrids
const PLUG_IN_HYBRID_ATV_TYPE: &str = "Plug-in Hybrid";

/// A row of the EPA fueleconomy.gov vehicle table.
///
/// Only the columns used here are listed; any others are ignored. Empty cells are read as `None`.
#[derive(PartialEq, Debug, Deserialize, Clone, Default)]
struct VehicleRaw {
    id: VehicleID,
    year: u32,
    make: String,
    model: String,
    #[serde(rename = "fuelType1")]
    fuel_type: String,
    #[serde(rename = "atvType", default)]
    atv_type: Option<String>,
    /// City fuel economy (MPG)
    #[serde(default)]
    city08: Option<f64>,
    /// Highway fuel economy (MPG)
    #[serde(default)]
    highway08: Option<f64>,
    /// City electricity consumption (kWh/100 miles)
    #[serde(rename = "cityE", default)]
    city_e: Option<f64>,
    /// Highway electricity consumption (kWh/100 miles)
    #[serde(rename = "highwayE", default)]
    highway_e: Option<f64>,
    /// City all-electric range of a plug-in hybrid (miles)
    #[serde(rename = "rangeCityA", default)]
    range_city_a: Option<f64>,
    /// Highway all-electric range of a plug-in hybrid (miles)
    #[serde(rename = "rangeHwyA", default)]
    range_hwy_a: Option<f64>,
    #[serde(rename = "co2TailpipeGpm", default)]
    co2_tailpipe_gpm: Option<f64>,
    #[serde(default)]
    trany: Option<String>,
    /// Engine displacement (litres)
    #[serde(default)]
    displ: Option<f64>,
    #[serde(default)]
    cylinders: Option<u32>,
    #[serde(rename = "startStop", default)]
    start_stop: Option<String>,
    /// City range of a battery-electric vehicle (miles)
    #[serde(rename = "rangeCity", default)]
    range_city: Option<f64>,
    /// Highway range of a battery-electric vehicle (miles)
    #[serde(rename = "rangeHwy", default)]
    range_hwy: Option<f64>,
}

impl VehicleRaw {
    /// Get a field which must be a positive number for the given powertrain
    fn positive(
        &self,
        value: Option<f64>,
        field: &'static str,
        powertrain: &'static str,
    ) -> Result<f64, EstimateError> {
        value
            .filter(|value| value.is_finite() && *value > 0.0)
            .ok_or(EstimateError::IncompleteVehicleRecord {
                id: self.id,
                field,
                powertrain,
            })
    }

    /// Get the city and highway fuel economy
    fn mpg(&self, powertrain: &'static str) -> Result<CityHighway<MilesPerGallon>, EstimateError> {
        Ok(CityHighway {
            city: MilesPerGallon(self.positive(self.city08, "city08", powertrain)?),
            highway: MilesPerGallon(self.positive(self.highway08, "highway08", powertrain)?),
        })
    }

    /// Get the city and highway electricity consumption, converted to kWh per mile
    fn consumption(
        &self,
        powertrain: &'static str,
    ) -> Result<CityHighway<KilowattHoursPerMile>, EstimateError> {
        let per_mile = |value: f64| KilowattHoursPerMile(value / 100.0);
        Ok(CityHighway {
            city: per_mile(self.positive(self.city_e, "cityE", powertrain)?),
            highway: per_mile(self.positive(self.highway_e, "highwayE", powertrain)?),
        })
    }

    /// Get the petroleum fuel burned by this vehicle
    fn petroleum_fuel(&self) -> Result<PetroleumFuel, EstimateError> {
        PetroleumFuel::from_str(self.fuel_type.trim()).map_err(|_| {
            EstimateError::UnsupportedFuelType {
                id: self.id,
                fuel: self.fuel_type.clone(),
            }
        })
    }

    /// Decide which powertrain this vehicle has and gather the figures it needs
    fn powertrain(&self) -> Result<Powertrain, EstimateError> {
        if self.fuel_type.trim() == ELECTRICITY_FUEL {
            let kind = Powertrain::ELECTRIC;
            return Ok(Powertrain::Electric {
                consumption: self.consumption(kind)?,
                range: CityHighway {
                    city: Miles(self.positive(self.range_city, "rangeCity", kind)?),
                    highway: Miles(self.positive(self.range_hwy, "rangeHwy", kind)?),
                },
            });
        }

        let fuel = self.petroleum_fuel()?;
        if self.atv_type.as_deref().map(str::trim) == Some(PLUG_IN_HYBRID_ATV_TYPE) {
            let kind = Powertrain::PLUG_IN_HYBRID;
            return Ok(Powertrain::PlugInHybrid {
                fuel,
                mpg: self.mpg(kind)?,
                consumption: self.consumption(kind)?,
                electric_range: CityHighway {
                    city: Miles(self.positive(self.range_city_a, "rangeCityA", kind)?),
                    highway: Miles(self.positive(self.range_hwy_a, "rangeHwyA", kind)?),
                },
            });
        }

        Ok(Powertrain::Combustion {
            fuel,
            mpg: self.mpg(Powertrain::COMBUSTION)?,
        })
    }

    /// A short description of the options distinguishing this vehicle from others of the same
    /// model, e.g. "Auto (S6) 2.5 L 4 cyl Regular Gas start/stop" or "263/263 mi city/hwy range"
    fn options(&self, powertrain: &Powertrain) -> String {
        if let Powertrain::Electric { range, .. } = powertrain {
            return format!("{}/{} mi city/hwy range", range.city, range.highway);
        }

        let mut parts = Vec::new();
        if let Some(trany) = &self.trany {
            parts.push(trany.replace("Automatic", "Auto").replace("Manual", "Man"));
        }
        if let Some(displ) = self.displ {
            parts.push(format!("{displ:.1} L"));
        }
        if let Some(cylinders) = self.cylinders {
            parts.push(format!("{cylinders} cyl"));
        }
        parts.push(self.fuel_type.replace("Gasoline", "Gas"));
        if self.start_stop.as_deref() == Some("Y") {
            parts.push("start/stop".to_string());
        }

        parts.join(" ")
    }

    /// Convert into a [`VehicleSpec`], if the record is usable
    fn into_vehicle_spec(self) -> Result<VehicleSpec, EstimateError> {
        let powertrain = self.powertrain()?;
        let co2_tailpipe = self
            .co2_tailpipe_gpm
            .filter(|value| value.is_finite() && *value >= 0.0)
            .ok_or(EstimateError::IncompleteVehicleRecord {
                id: self.id,
                field: "co2TailpipeGpm",
                powertrain: powertrain.kind(),
            })?;
        let options = self.options(&powertrain);

        Ok(VehicleSpec {
            id: self.id,
            year: self.year,
            make: self.make,
            model: self.model,
            options,
            co2_tailpipe: GramsCO2PerMile(co2_tailpipe),
            powertrain,
        })
    }
}

/// Read the vehicle table from the data directory.
///
/// Records which can't be used for estimates (e.g. because they run on an unsupported fuel) are
/// not an error; they are kept separately along with the reason they were rejected.
///
/// # Arguments
///
/// * `data_dir` - Folder containing the reference data files
///
/// # Returns
///
/// The usable and rejected vehicles, or an error if the file is malformed.
pub fn read_vehicles(data_dir: &Path) -> Result<VehicleTable> {
    let file_path = data_dir.join(VEHICLES_FILE_NAME);
    let vehicles_csv = read_csv::<VehicleRaw>(&file_path)?;
    read_vehicles_from_iter(vehicles_csv.into_iter()).with_context(|| input_err_msg(&file_path))
}

fn read_vehicles_from_iter<I>(iter: I) -> Result<VehicleTable>
where
    I: Iterator<Item = VehicleRaw>,
{
    let mut table = VehicleTable::default();
    for raw in iter {
        let id = raw.id;
        ensure!(
            !table.vehicles.contains_key(&id) && !table.rejected.contains_key(&id),
            "Duplicate vehicle ID {id}"
        );

        match raw.into_vehicle_spec() {
            Ok(vehicle) => {
                table.vehicles.insert(id, Rc::new(vehicle));
            }
            Err(err) => {
                debug!("Skipping vehicle: {err}");
                table.rejected.insert(id, err);
            }
        }
    }

    ensure!(!table.vehicles.is_empty(), "No usable vehicles found");
    if !table.rejected.is_empty() {
        warn!(
            "{} vehicle records cannot be used for estimates and were skipped",
            table.rejected.len()
        );
    }

    Ok(table)
}
