//! Vehicles and their powertrains.
use crate::id::VehicleID;
use crate::units::{Dimensionless, GramsCO2PerMile, KilowattHoursPerMile, Miles, MilesPerGallon};
use indexmap::IndexMap;
use std::ops::{Add, Mul};
use std::rc::Rc;
use strum::{EnumIter, EnumString, IntoEnumIterator};

/// A map of [`VehicleSpec`]s, keyed by vehicle ID
pub type VehicleMap = IndexMap<VehicleID, Rc<VehicleSpec>>;

/// A petroleum fuel for which the EIA publishes retail prices
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, EnumString, strum::Display)]
pub enum PetroleumFuel {
    /// Regular gasoline
    #[strum(serialize = "Regular Gasoline")]
    RegularGasoline,
    /// Premium gasoline
    #[strum(serialize = "Premium Gasoline")]
    PremiumGasoline,
    /// Midgrade gasoline
    #[strum(serialize = "Midgrade Gasoline")]
    MidgradeGasoline,
    /// Diesel
    #[strum(serialize = "Diesel")]
    Diesel,
}

impl PetroleumFuel {
    /// The name the EIA uses for this product in its price series
    pub fn eia_product_name(self) -> &'static str {
        match self {
            Self::RegularGasoline => "Conventional Regular Gasoline",
            Self::PremiumGasoline => "Conventional Premium Gasoline",
            Self::MidgradeGasoline => "Gasoline Conventional Midgrade",
            Self::Diesel => "No 2 Diesel",
        }
    }

    /// Look up a fuel by its EIA product name
    pub fn from_eia_product_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::iter().find(|fuel| fuel.eia_product_name() == name)
    }
}

/// A pair of values for city and highway driving
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CityHighway<T> {
    /// The value for city driving
    pub city: T,
    /// The value for highway driving
    pub highway: T,
}

impl<T> CityHighway<T>
where
    T: Copy + Add<Output = T> + Mul<Dimensionless, Output = T>,
{
    /// Blend the city and highway values according to the share of city driving
    pub fn blend(&self, city_fraction: Dimensionless) -> T {
        let highway_fraction = Dimensionless(1.0) - city_fraction;
        self.city * city_fraction + self.highway * highway_fraction
    }
}

/// How a vehicle is propelled, along with the efficiency figures relevant to that powertrain
#[derive(Clone, Debug, PartialEq)]
pub enum Powertrain {
    /// An internal-combustion vehicle (including conventional hybrids)
    Combustion {
        /// The fuel burned
        fuel: PetroleumFuel,
        /// Fuel economy
        mpg: CityHighway<MilesPerGallon>,
    },
    /// A plug-in hybrid, which runs on electricity until its battery is drained
    PlugInHybrid {
        /// The fuel burned once the battery is drained
        fuel: PetroleumFuel,
        /// Fuel economy when running on fuel
        mpg: CityHighway<MilesPerGallon>,
        /// Electricity consumption when running on the battery
        consumption: CityHighway<KilowattHoursPerMile>,
        /// All-electric range
        electric_range: CityHighway<Miles>,
    },
    /// A battery-electric vehicle
    Electric {
        /// Electricity consumption
        consumption: CityHighway<KilowattHoursPerMile>,
        /// Range on a full charge
        range: CityHighway<Miles>,
    },
}

impl Powertrain {
    /// Description of a [`Powertrain::Combustion`]
    pub const COMBUSTION: &'static str = "combustion vehicle";
    /// Description of a [`Powertrain::PlugInHybrid`]
    pub const PLUG_IN_HYBRID: &'static str = "plug-in hybrid";
    /// Description of a [`Powertrain::Electric`]
    pub const ELECTRIC: &'static str = "electric vehicle";

    /// A short description of the kind of powertrain
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Combustion { .. } => Self::COMBUSTION,
            Self::PlugInHybrid { .. } => Self::PLUG_IN_HYBRID,
            Self::Electric { .. } => Self::ELECTRIC,
        }
    }
}

/// A vehicle from the fuel economy table
#[derive(Clone, Debug, PartialEq)]
pub struct VehicleSpec {
    /// Unique identifier for the vehicle
    pub id: VehicleID,
    /// Model year
    pub year: u32,
    /// Manufacturer (e.g. "Honda")
    pub make: String,
    /// Model name (e.g. "Civic")
    pub model: String,
    /// Short description of the options distinguishing this vehicle from others of the same model
    pub options: String,
    /// CO2 emitted from the tailpipe per mile driven on fuel
    pub co2_tailpipe: GramsCO2PerMile,
    /// The vehicle's powertrain
    pub powertrain: Powertrain,
}

impl VehicleSpec {
    /// The name shown to users, e.g. "2020 Honda Civic"
    pub fn display_name(&self) -> String {
        format!("{} {} {}", self.year, self.make, self.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{combustion_vehicle, electric_vehicle};
    use float_cmp::assert_approx_eq;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case(0.0, 20.0)]
    #[case(1.0, 40.0)]
    #[case(0.6, 32.0)]
    fn test_blend(#[case] city_fraction: f64, #[case] expected: f64) {
        let range = CityHighway {
            city: Miles(40.0),
            highway: Miles(20.0),
        };
        assert_approx_eq!(
            Miles,
            range.blend(Dimensionless(city_fraction)),
            Miles(expected)
        );
    }

    #[test]
    fn test_fuel_labels() {
        assert_eq!(
            PetroleumFuel::from_str("Premium Gasoline").unwrap(),
            PetroleumFuel::PremiumGasoline
        );
        assert!(PetroleumFuel::from_str("Electricity").is_err());
        assert_eq!(
            PetroleumFuel::from_eia_product_name("No 2 Diesel"),
            Some(PetroleumFuel::Diesel)
        );
        assert_eq!(
            PetroleumFuel::from_eia_product_name("Reformulated Regular Gasoline"),
            None
        );
    }

    #[rstest]
    fn test_display_name(combustion_vehicle: VehicleSpec, electric_vehicle: VehicleSpec) {
        assert_eq!(combustion_vehicle.display_name(), "2020 Honda Civic");
        assert_eq!(electric_vehicle.display_name(), "2021 Tesla Model 3");
    }
}
