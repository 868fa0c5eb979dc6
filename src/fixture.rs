//! Fixtures for tests

use crate::emissions::EmissionRates;
use crate::prices::{ElectricityPrices, PetroleumArea, PetroleumPrices, PriceSeries};
use crate::reference::{ReferenceData, VehicleTable};
use crate::region::PaddRegion;
use crate::units::{
    CentsPerKilowattHour, GramsCO2PerKilowattHour, GramsCO2PerMile, KilowattHoursPerMile, Miles,
    MilesPerGallon, UnitType,
};
use crate::vehicle::{CityHighway, PetroleumFuel, Powertrain, VehicleSpec};
use chrono::NaiveDate;
use indexmap::indexmap;
use map_macro::hash_map;
use rstest::fixture;
use std::rc::Rc;

/// Assert that an error with the given message occurs
macro_rules! assert_error {
    ($result:expr, $msg:expr) => {
        assert_eq!(
            $result.unwrap_err().chain().next().unwrap().to_string(),
            $msg
        );
    };
}
pub(crate) use assert_error;

/// A series of weekly prices, starting at the beginning of 2024
pub fn weekly_prices<P: UnitType>(values: &[f64]) -> PriceSeries<P> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    PriceSeries::new(
        values
            .iter()
            .zip(start.iter_weeks())
            .map(|(value, date)| (date, P::new(*value)))
            .collect(),
    )
}

#[fixture]
pub fn combustion_vehicle() -> VehicleSpec {
    VehicleSpec {
        id: 1,
        year: 2020,
        make: "Honda".into(),
        model: "Civic".into(),
        options: "Auto (AV) 2.0 L 4 cyl Regular Gas".into(),
        co2_tailpipe: GramsCO2PerMile(320.0),
        powertrain: Powertrain::Combustion {
            fuel: PetroleumFuel::RegularGasoline,
            mpg: CityHighway {
                city: MilesPerGallon(30.0),
                highway: MilesPerGallon(40.0),
            },
        },
    }
}

#[fixture]
pub fn electric_vehicle() -> VehicleSpec {
    VehicleSpec {
        id: 2,
        year: 2021,
        make: "Tesla".into(),
        model: "Model 3".into(),
        options: "263/263 mi city/hwy range".into(),
        co2_tailpipe: GramsCO2PerMile(0.0),
        powertrain: Powertrain::Electric {
            consumption: CityHighway {
                city: KilowattHoursPerMile(0.28),
                highway: KilowattHoursPerMile(0.30),
            },
            range: CityHighway {
                city: Miles(263.0),
                highway: Miles(263.0),
            },
        },
    }
}

#[fixture]
pub fn plug_in_hybrid() -> VehicleSpec {
    VehicleSpec {
        id: 3,
        year: 2022,
        make: "Toyota".into(),
        model: "Prius Prime".into(),
        options: "Auto (AV) 1.8 L 4 cyl Regular Gas".into(),
        co2_tailpipe: GramsCO2PerMile(200.0),
        powertrain: Powertrain::PlugInHybrid {
            fuel: PetroleumFuel::RegularGasoline,
            mpg: CityHighway {
                city: MilesPerGallon(50.0),
                highway: MilesPerGallon(50.0),
            },
            consumption: CityHighway {
                city: KilowattHoursPerMile(0.25),
                highway: KilowattHoursPerMile(0.25),
            },
            electric_range: CityHighway {
                city: Miles(40.0),
                highway: Miles(40.0),
            },
        },
    }
}

#[fixture]
pub fn reference_data(
    combustion_vehicle: VehicleSpec,
    electric_vehicle: VehicleSpec,
    plug_in_hybrid: VehicleSpec,
) -> ReferenceData {
    let vehicles = VehicleTable {
        vehicles: indexmap! {
            1 => Rc::new(combustion_vehicle),
            2 => Rc::new(electric_vehicle),
            3 => Rc::new(plug_in_hybrid),
        },
        rejected: Default::default(),
    };

    let regular = PetroleumFuel::RegularGasoline;
    let petroleum_prices = PetroleumPrices::new(hash_map! {
        (regular, PetroleumArea::Region(PaddRegion::CentralAtlantic)) => weekly_prices(&[3.0]),
        (regular, PetroleumArea::Region(PaddRegion::Midwest)) => weekly_prices(&[2.8, 3.0]),
        (regular, PetroleumArea::National) => weekly_prices(&[3.2]),
    });

    let electricity_prices = ElectricityPrices {
        by_state: hash_map! {
            "Pennsylvania".into() => weekly_prices::<CentsPerKilowattHour>(&[12.5, 13.5, 14.5]),
            "Ohio".into() => weekly_prices(&[14.0, 15.0]),
        },
        national: weekly_prices(&[15.0]),
    };

    let emission_rates = EmissionRates {
        by_state: hash_map! {
            "Pennsylvania".into() => GramsCO2PerKilowattHour(360.0),
            "Ohio".into() => GramsCO2PerKilowattHour(550.0),
        },
        national: GramsCO2PerKilowattHour(400.0),
    };

    ReferenceData {
        vehicles,
        petroleum_prices,
        electricity_prices,
        emission_rates,
    }
}
