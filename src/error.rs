//! Errors raised while estimating fuel costs and emissions.
use crate::id::VehicleID;
use thiserror::Error;

/// A failure of the fuel-cost estimator.
///
/// These are deterministic failures caused by bad input or incomplete reference data; none of them
/// are worth retrying.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimateError {
    /// The state name is not part of any PADD region
    #[error("Unknown state '{0}': it does not belong to any PADD region")]
    UnknownRegion(String),
    /// A user-supplied value is out of range
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// A vehicle record lacks a field its powertrain needs
    #[error("Vehicle {id} is missing a valid value for '{field}', required for a {powertrain}")]
    IncompleteVehicleRecord {
        /// ID of the offending vehicle
        id: VehicleID,
        /// Name of the missing column
        field: &'static str,
        /// Description of the classified powertrain
        powertrain: &'static str,
    },
    /// A vehicle runs on a fuel for which no prices are tracked
    #[error("Vehicle {id} uses unsupported fuel type '{fuel}'")]
    UnsupportedFuelType {
        /// ID of the offending vehicle
        id: VehicleID,
        /// The value of the `fuelType1` column
        fuel: String,
    },
    /// No vehicle with the given ID exists
    #[error("Unknown vehicle ID {0}")]
    UnknownVehicle(VehicleID),
    /// There are no price samples for a commodity in an area
    #[error("No {commodity} prices available for {area}")]
    MissingPriceData {
        /// Description of the commodity
        commodity: String,
        /// The state, region or "US"
        area: String,
    },
    /// There is no CO2 emission rate for electricity generated in an area
    #[error("No CO2 emission rate available for electricity in {0}")]
    MissingEmissionRate(String),
}
