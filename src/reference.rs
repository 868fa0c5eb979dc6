//! The reference data against which vehicles are compared.
use crate::emissions::EmissionRates;
use crate::error::EstimateError;
use crate::id::VehicleID;
use crate::input::load_reference_data;
use crate::prices::{ElectricityPrices, PetroleumPrices};
use crate::vehicle::{VehicleMap, VehicleSpec};
use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;
use unicase::UniCase;

/// Vehicle specifications, along with the records that could not be used
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VehicleTable {
    /// Vehicles which can be estimated, in file order
    pub vehicles: VehicleMap,
    /// Records which were rejected at load time, with the reason
    pub rejected: HashMap<VehicleID, EstimateError>,
}

impl VehicleTable {
    /// Get a vehicle by ID.
    ///
    /// If the record was rejected when it was loaded, the reason is returned as the error.
    pub fn get(&self, id: VehicleID) -> Result<&Rc<VehicleSpec>, EstimateError> {
        if let Some(vehicle) = self.vehicles.get(&id) {
            return Ok(vehicle);
        }

        Err(self
            .rejected
            .get(&id)
            .cloned()
            .unwrap_or_else(|| EstimateError::UnknownVehicle(id)))
    }

    /// Find vehicles matching the given (case-insensitive) criteria.
    ///
    /// Results are sorted by year (newest first), then make, model and ID.
    pub fn search(
        &self,
        year: Option<u32>,
        make: Option<&str>,
        model: Option<&str>,
    ) -> Vec<&Rc<VehicleSpec>> {
        let matches = |wanted: Option<&str>, value: &str| {
            wanted.is_none_or(|wanted| UniCase::new(wanted.trim()) == UniCase::new(value))
        };

        let mut found: Vec<_> = self
            .vehicles
            .values()
            .filter(|v| year.is_none_or(|year| v.year == year))
            .filter(|v| matches(make, &v.make))
            .filter(|v| matches(model, &v.model))
            .collect();
        found.sort_by(|a, b| {
            b.year
                .cmp(&a.year)
                .then_with(|| a.make.cmp(&b.make))
                .then_with(|| a.model.cmp(&b.model))
                .then_with(|| a.id.cmp(&b.id))
        });

        found
    }
}

/// All the reference tables needed to estimate fuel costs and emissions.
///
/// This is loaded once and is read-only thereafter.
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceData {
    /// Vehicle specifications
    pub vehicles: VehicleTable,
    /// Gasoline and diesel prices
    pub petroleum_prices: PetroleumPrices,
    /// Electricity prices
    pub electricity_prices: ElectricityPrices,
    /// CO2 emission rates for electricity generation
    pub emission_rates: EmissionRates,
}

impl ReferenceData {
    /// Read reference data from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Folder containing the reference data files
    pub fn from_path<P: AsRef<Path>>(data_dir: P) -> Result<ReferenceData> {
        load_reference_data(data_dir.as_ref())
    }
}
