//! Integration tests for estimates made with the demo data.
use fuelcompare::error::EstimateError;
use fuelcompare::estimate::{DailyDriving, estimate_fuel_costs};
use fuelcompare::reference::ReferenceData;
use fuelcompare::units::UnitType;
use fuelcompare::vehicle::Powertrain;
use rstest::{fixture, rstest};

#[fixture]
fn data() -> ReferenceData {
    ReferenceData::from_path("data/demo").unwrap()
}

#[rstest]
fn test_demo_data_vehicles(data: ReferenceData) {
    assert_eq!(data.vehicles.vehicles.len(), 7);
    assert!(matches!(
        data.vehicles.get(34411),
        Err(EstimateError::UnsupportedFuelType { .. })
    ));
    assert!(matches!(
        data.vehicles.get(36000),
        Err(EstimateError::IncompleteVehicleRecord { .. })
    ));
    assert!(matches!(
        data.vehicles.get(42791).unwrap().powertrain,
        Powertrain::PlugInHybrid { .. }
    ));
}

/// Every usable vehicle can be estimated in every state with data
#[rstest]
fn test_estimate_all_vehicles(
    data: ReferenceData,
    #[values("Pennsylvania", "ohio", "California", "Texas", "Washington")] state: &str,
) {
    let driving = DailyDriving::new(20.0, 30.0).unwrap();
    for vehicle in data.vehicles.vehicles.values() {
        let estimate = estimate_fuel_costs(&data, vehicle, state, &driving).unwrap();
        assert!(estimate.state_costs().annual_cost.value() > 0.0);
        assert!(estimate.national_costs().annual_cost.value() > 0.0);
        assert!(estimate.co2.state.value() >= estimate.co2.tailpipe.value());
    }
}

/// The demo data has no electricity prices for Utah, but gasoline can still be priced there
#[rstest]
fn test_estimate_state_without_electricity_prices(data: ReferenceData) {
    let driving = DailyDriving::new(20.0, 30.0).unwrap();
    let civic = data.vehicles.get(41189).unwrap();
    assert!(estimate_fuel_costs(&data, civic, "Utah", &driving).is_ok());

    let tesla = data.vehicles.get(43395).unwrap();
    assert_eq!(
        estimate_fuel_costs(&data, tesla, "Utah", &driving),
        Err(EstimateError::MissingPriceData {
            commodity: "electricity".into(),
            area: "Utah".into()
        })
    );
}
