//! The module responsible for writing comparison results to disk.
use crate::estimate::FuelCostEstimate;
use crate::id::VehicleID;
use crate::units::KilogramsCO2;
use anyhow::{Context, Result, ensure};
use serde::Serialize;
use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};

/// The root folder in which comparison-specific output folders will be created
const OUTPUT_DIRECTORY_ROOT: &str = "fuelcompare_results";

/// The output file name for annual fuel costs
const FUEL_COSTS_FILE_NAME: &str = "fuel_costs.csv";

/// The output file name for annual CO2 emissions
const CO2_EMISSIONS_FILE_NAME: &str = "co2_emissions.csv";

/// Get the default output folder for a comparison of two vehicles
pub fn get_output_dir(vehicle_ids: [VehicleID; 2]) -> PathBuf {
    let [first, second] = vehicle_ids;
    [OUTPUT_DIRECTORY_ROOT, &format!("{first}_vs_{second}")]
        .iter()
        .collect()
}

/// Create a new output directory, if it doesn't already exist.
///
/// # Arguments
///
/// * `output_dir` - The folder to create
/// * `allow_overwrite` - Whether to clear out the folder if it exists and isn't empty
///
/// # Returns
///
/// Whether an existing folder was overwritten, or an error if the folder exists and isn't empty
/// and overwriting isn't allowed.
pub fn create_output_directory(output_dir: &Path, allow_overwrite: bool) -> Result<bool> {
    let overwrite = if output_dir.is_dir() {
        let is_empty = output_dir
            .read_dir()
            .context("Could not read output folder")?
            .next()
            .is_none();
        if is_empty {
            return Ok(false);
        }

        ensure!(
            allow_overwrite,
            "Output folder already exists and is not empty. \
            Please delete the folder or pass the --overwrite command-line option."
        );

        fs::remove_dir_all(output_dir).context("Could not delete output folder")?;
        true
    } else {
        false
    };

    fs::create_dir_all(output_dir)?;

    Ok(overwrite)
}

/// Represents a row in the CO2 emissions CSV file
#[derive(Serialize, Debug, PartialEq)]
struct Co2EmissionsRow<'a> {
    name: &'a str,
    area: &'a str,
    co2_tailpipe_kg: KilogramsCO2,
    co2_state_kg: KilogramsCO2,
    co2_national_kg: KilogramsCO2,
}

/// An object for writing fuel cost estimates to file
pub struct DataWriter {
    fuel_costs_writer: csv::Writer<File>,
    co2_writer: csv::Writer<File>,
}

impl DataWriter {
    /// Open CSV files to write output data to
    ///
    /// # Arguments
    ///
    /// * `output_path` - Folder where files will be saved
    pub fn create(output_path: &Path) -> Result<Self> {
        let new_writer = |file_name| {
            let file_path = output_path.join(file_name);
            csv::Writer::from_path(&file_path)
                .with_context(|| format!("Could not create {}", file_path.display()))
        };

        Ok(Self {
            fuel_costs_writer: new_writer(FUEL_COSTS_FILE_NAME)?,
            co2_writer: new_writer(CO2_EMISSIONS_FILE_NAME)?,
        })
    }

    /// Write the cost report and emissions of one vehicle
    pub fn write_estimate(&mut self, estimate: &FuelCostEstimate) -> Result<()> {
        for row in &estimate.report {
            self.fuel_costs_writer.serialize(row)?;
        }

        self.co2_writer.serialize(Co2EmissionsRow {
            name: &estimate.name,
            area: &estimate.state_costs().area,
            co2_tailpipe_kg: estimate.co2.tailpipe,
            co2_state_kg: estimate.co2.state,
            co2_national_kg: estimate.co2.national,
        })?;

        Ok(())
    }

    /// Flush the underlying streams
    pub fn flush(&mut self) -> Result<()> {
        self.fuel_costs_writer.flush()?;
        self.co2_writer.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::{DailyDriving, estimate_fuel_costs};
    use crate::fixture::{assert_error, combustion_vehicle, electric_vehicle, reference_data};
    use crate::reference::ReferenceData;
    use crate::vehicle::VehicleSpec;
    use rstest::rstest;
    use tempfile::tempdir;

    #[test]
    fn test_get_output_dir() {
        assert_eq!(
            get_output_dir([123, 45]),
            Path::new("fuelcompare_results").join("123_vs_45")
        );
    }

    #[test]
    fn test_create_output_directory_new_dir() {
        let temp_dir = tempdir().unwrap();
        let output_dir = temp_dir.path().join("results");
        assert!(!create_output_directory(&output_dir, false).unwrap());
        assert!(output_dir.is_dir());
    }

    #[test]
    fn test_create_output_directory_existing_empty_dir() {
        let temp_dir = tempdir().unwrap();
        assert!(!create_output_directory(temp_dir.path(), false).unwrap());
    }

    #[test]
    fn test_create_output_directory_existing_non_empty_dir() {
        let temp_dir = tempdir().unwrap();
        let output_dir = temp_dir.path().join("results");
        fs::create_dir(&output_dir).unwrap();
        fs::write(output_dir.join(FUEL_COSTS_FILE_NAME), "old").unwrap();

        assert_error!(
            create_output_directory(&output_dir, false),
            "Output folder already exists and is not empty. \
            Please delete the folder or pass the --overwrite command-line option."
        );

        assert!(create_output_directory(&output_dir, true).unwrap());
        assert!(output_dir.is_dir());
        assert!(!output_dir.join(FUEL_COSTS_FILE_NAME).exists());
    }

    #[rstest]
    fn test_write_estimate(
        reference_data: ReferenceData,
        electric_vehicle: VehicleSpec,
        combustion_vehicle: VehicleSpec,
    ) {
        let driving = DailyDriving::new(15.0, 10.0).unwrap();
        let dir = tempdir().unwrap();
        {
            let mut writer = DataWriter::create(dir.path()).unwrap();
            for vehicle in [&electric_vehicle, &combustion_vehicle] {
                let estimate =
                    estimate_fuel_costs(&reference_data, vehicle, "Pennsylvania", &driving)
                        .unwrap();
                writer.write_estimate(&estimate).unwrap();
            }
            writer.flush().unwrap();
        }

        let fuel_costs = fs::read_to_string(dir.path().join(FUEL_COSTS_FILE_NAME)).unwrap();
        assert_eq!(
            fuel_costs,
            "time_period,area,annual_cost,annual_cost_std,name
3year,Pennsylvania,354.78,26.28,2021 Tesla Model 3
3year,US,394.2,0.0,2021 Tesla Model 3
3year,Pennsylvania,821.25,0.0,2020 Honda Civic
3year,US,876.0,0.0,2020 Honda Civic
"
        );

        let co2 = fs::read_to_string(dir.path().join(CO2_EMISSIONS_FILE_NAME)).unwrap();
        assert_eq!(
            co2,
            "name,area,co2_tailpipe_kg,co2_state_kg,co2_national_kg
2021 Tesla Model 3,Pennsylvania,0.0,946.0,1051.0
2020 Honda Civic,Pennsylvania,2920.0,2920.0,2920.0
"
        );
    }
}
