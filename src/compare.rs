//! Side-by-side comparison of two vehicles.
use crate::error::EstimateError;
use crate::estimate::{DailyDriving, FuelCostEstimate, estimate_fuel_costs};
use crate::id::VehicleID;
use crate::reference::ReferenceData;
use crate::units::UnitType;
use crate::vehicle::Powertrain;
use float_cmp::approx_eq;

/// Estimates for two vehicles driven the same way in the same state
#[derive(Clone, Debug, PartialEq)]
pub struct Comparison {
    /// The estimates, in the order the vehicles were given
    pub estimates: [FuelCostEstimate; 2],
    /// Whether either vehicle is a plug-in hybrid
    pub includes_plug_in_hybrid: bool,
    /// Whether either vehicle is battery-electric
    pub includes_electric: bool,
}

/// Estimate the fuel costs and emissions of two vehicles.
///
/// # Arguments
///
/// * `data` - Reference prices and emission rates
/// * `vehicle_ids` - The two vehicles to compare
/// * `state_name` - The state in which the driver buys fuel
/// * `driving` - Distances driven each day
pub fn compare_vehicles(
    data: &ReferenceData,
    vehicle_ids: [VehicleID; 2],
    state_name: &str,
    driving: &DailyDriving,
) -> Result<Comparison, EstimateError> {
    let [first, second] = vehicle_ids.map(|id| data.vehicles.get(id));
    let (first, second) = (first?, second?);
    let includes_plug_in_hybrid = [first, second]
        .iter()
        .any(|vehicle| matches!(vehicle.powertrain, Powertrain::PlugInHybrid { .. }));
    let includes_electric = [first, second]
        .iter()
        .any(|vehicle| matches!(vehicle.powertrain, Powertrain::Electric { .. }));

    Ok(Comparison {
        estimates: [
            estimate_fuel_costs(data, first, state_name, driving)?,
            estimate_fuel_costs(data, second, state_name, driving)?,
        ],
        includes_plug_in_hybrid,
        includes_electric,
    })
}

/// How one quantity compares with another
#[derive(Debug, PartialEq)]
enum Relative {
    Same,
    More(String),
    Less(String),
}

/// Describe how `value` compares with `reference`, e.g. "25% more" or "1.5 times more".
///
/// Increases of more than 100% are described as a multiple of the excess.
fn relative(value: f64, reference: f64) -> Relative {
    if approx_eq!(f64, value, reference, ulps = 2) {
        return Relative::Same;
    }
    if reference <= 0.0 {
        return Relative::More(String::new());
    }

    let change = value / reference - 1.0;
    if change < 0.0 {
        Relative::Less(format!("{:.0}% ", -100.0 * change))
    } else if change <= 1.0 {
        Relative::More(format!("{:.0}% ", 100.0 * change))
    } else {
        Relative::More(format!("{change:.1} times "))
    }
}

impl Comparison {
    /// A short plain-text summary, e.g. "A 2020 Honda Civic costs 83% more in fuel than a
    /// 2021 Tesla Model 3."
    ///
    /// The vehicle which is more expensive to run in the chosen state is described first. Costs
    /// are compared to the nearest dollar.
    pub fn summary(&self) -> Vec<String> {
        let cost = |estimate: &FuelCostEstimate| estimate.state_costs().annual_cost.value().round();
        let [first, second] = &self.estimates;
        let (dearer, cheaper) = if cost(first) >= cost(second) {
            (first, second)
        } else {
            (second, first)
        };

        let cost_line = match relative(cost(dearer), cost(cheaper)) {
            Relative::Same => format!(
                "A {} costs the same in fuel as a {}.",
                dearer.name, cheaper.name
            ),
            Relative::More(amount) | Relative::Less(amount) => format!(
                "A {} costs {amount}more in fuel than a {}.",
                dearer.name, cheaper.name
            ),
        };

        let co2_line = match relative(dearer.co2.state.value(), cheaper.co2.state.value()) {
            Relative::Same => format!("It emits as much CO2 as a {}.", cheaper.name),
            Relative::More(amount) => format!("It emits {amount}more CO2 than a {}.", cheaper.name),
            Relative::Less(amount) => format!("It emits {amount}less CO2 than a {}.", cheaper.name),
        };

        let area = &dearer.state_costs().area;
        let mut lines = vec![
            cost_line,
            co2_line,
            format!(
                "Fuel costs are calculated using the average fuel prices over the last 3 years in \
                {area} and the national average."
            ),
        ];
        if self.includes_plug_in_hybrid {
            lines.push(
                "Fuel costs for plug-in hybrids assume that the battery is fully charged each day \
                and fully drained before switching to gas."
                    .to_string(),
            );
            lines.push(format!(
                "Plug-in hybrids have no tailpipe CO2 emissions while running on electricity. \
                Their emissions are the tailpipe CO2 while running on gas plus the electricity \
                used to charge the battery multiplied by the average CO2 emission rate from \
                electricity generation in {area}."
            ));
        }
        if self.includes_electric {
            lines.push(format!(
                "Electric vehicles have no tailpipe CO2 emissions. Their emissions are the \
                electricity used to charge the vehicle multiplied by the average CO2 emission \
                rate from electricity generation in {area}."
            ));
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::reference_data;
    use rstest::rstest;

    #[rstest]
    #[case(100.0, 100.0, Relative::Same)]
    #[case(0.1 + 0.2, 0.3, Relative::Same)]
    #[case(125.0, 100.0, Relative::More("25% ".into()))]
    #[case(200.0, 100.0, Relative::More("100% ".into()))]
    #[case(250.0, 100.0, Relative::More("1.5 times ".into()))]
    #[case(80.0, 100.0, Relative::Less("20% ".into()))]
    #[case(10.0, 0.0, Relative::More(String::new()))]
    fn test_relative(#[case] value: f64, #[case] reference: f64, #[case] expected: Relative) {
        assert_eq!(relative(value, reference), expected);
    }

    #[rstest]
    fn test_compare_vehicles(reference_data: ReferenceData) {
        let driving = DailyDriving::new(15.0, 10.0).unwrap();
        let comparison = compare_vehicles(&reference_data, [2, 1], "Pennsylvania", &driving)
            .unwrap();
        assert!(!comparison.includes_plug_in_hybrid);
        assert!(comparison.includes_electric);
        assert_eq!(comparison.estimates[0].name, "2021 Tesla Model 3");
        assert_eq!(comparison.estimates[1].name, "2020 Honda Civic");

        // $821 vs $355 and 2920 kg vs 946 kg
        assert_eq!(
            comparison.summary()[..2],
            [
                "A 2020 Honda Civic costs 1.3 times more in fuel than a 2021 Tesla Model 3.",
                "It emits 2.1 times more CO2 than a 2021 Tesla Model 3.",
            ]
        );

        let summary = comparison.summary();
        assert_eq!(summary.len(), 4);
        assert!(summary[3].starts_with("Electric vehicles have no tailpipe CO2 emissions."));
        assert!(summary[3].ends_with("electricity generation in Pennsylvania."));
    }

    #[rstest]
    fn test_compare_vehicles_same_vehicle(reference_data: ReferenceData) {
        let driving = DailyDriving::new(15.0, 10.0).unwrap();
        let comparison = compare_vehicles(&reference_data, [1, 1], "Pennsylvania", &driving)
            .unwrap();
        assert!(!comparison.includes_electric);
        assert_eq!(
            comparison.summary(),
            [
                "A 2020 Honda Civic costs the same in fuel as a 2020 Honda Civic.",
                "It emits as much CO2 as a 2020 Honda Civic.",
                "Fuel costs are calculated using the average fuel prices over the last 3 years in \
                Pennsylvania and the national average.",
            ]
        );
    }

    #[rstest]
    fn test_compare_vehicles_plug_in_hybrid(reference_data: ReferenceData) {
        let driving = DailyDriving::new(15.0, 10.0).unwrap();
        let comparison = compare_vehicles(&reference_data, [1, 3], "Pennsylvania", &driving)
            .unwrap();
        assert!(comparison.includes_plug_in_hybrid);
        assert!(!comparison.includes_electric);

        let summary = comparison.summary();
        assert_eq!(summary.len(), 5);
        assert!(summary[3].starts_with("Fuel costs for plug-in hybrids assume"));
        assert!(summary[4].starts_with("Plug-in hybrids have no tailpipe CO2 emissions"));
    }

    #[rstest]
    fn test_compare_vehicles_electric_and_plug_in_hybrid(reference_data: ReferenceData) {
        let driving = DailyDriving::new(15.0, 10.0).unwrap();
        let comparison = compare_vehicles(&reference_data, [2, 3], "Pennsylvania", &driving)
            .unwrap();
        assert!(comparison.includes_plug_in_hybrid);
        assert!(comparison.includes_electric);

        let summary = comparison.summary();
        assert_eq!(summary.len(), 6);
        assert!(summary[3].starts_with("Fuel costs for plug-in hybrids assume"));
        assert!(summary[4].starts_with("Plug-in hybrids have no tailpipe CO2 emissions"));
        assert!(summary[5].starts_with("Electric vehicles have no tailpipe CO2 emissions"));
    }

    #[rstest]
    fn test_compare_vehicles_unknown_vehicle(reference_data: ReferenceData) {
        let driving = DailyDriving::new(15.0, 10.0).unwrap();
        assert_eq!(
            compare_vehicles(&reference_data, [1, 99], "Pennsylvania", &driving),
            Err(EstimateError::UnknownVehicle(99))
        );
    }
}
