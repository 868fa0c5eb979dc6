//! Estimation of the annual fuel costs and CO2 emissions of a vehicle.
//!
//! Costs are based on average prices over the last few years, both in the state where the driver
//! buys fuel (or, for gasoline and diesel, the PADD region containing it) and across the US.
//! Emissions from electricity generation use the average emission rate of the state's grid.
use crate::error::EstimateError;
use crate::prices::{
    AVERAGING_PERIOD_LABEL, PetroleumArea, PriceAverages, PriceSummary, PricedArea,
    price_averages,
};
use crate::reference::ReferenceData;
use crate::region::{canonical_state_name, get_region};
use crate::units::{
    CentsPerKilowattHour, Dimensionless, Dollars, DollarsPerGallon, Gallons, GramsCO2,
    GramsCO2PerKilowattHour, KilogramsCO2, KilowattHours, KilowattHoursPerMile, Miles,
    MilesPerGallon, UnitType, round_to,
};
use crate::vehicle::{CityHighway, PetroleumFuel, Powertrain, VehicleSpec};
use log::debug;
use serde::Serialize;

/// The number of days in a year
const DAYS_PER_YEAR: f64 = 365.0;

/// The number of decimal places to which costs are rounded
const COST_DECIMAL_PLACES: i32 = 2;

/// The label for the national row of a report
pub const NATIONAL_AREA_LABEL: &str = "US";

/// The commodity name used when reporting missing electricity prices
const ELECTRICITY: &str = "electricity";

/// The distances driven each day
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DailyDriving {
    /// Miles driven in the city
    pub city: Miles,
    /// Miles driven on the highway
    pub highway: Miles,
}

impl DailyDriving {
    /// Create a new [`DailyDriving`], checking that both distances are finite and non-negative
    pub fn new(city: f64, highway: f64) -> Result<Self, EstimateError> {
        for (name, miles) in [("city", city), ("highway", highway)] {
            if !miles.is_finite() || miles < 0.0 {
                return Err(EstimateError::InvalidInput(format!(
                    "daily {name} miles must be a non-negative number (got {miles})"
                )));
            }
        }

        Ok(Self {
            city: Miles(city),
            highway: Miles(highway),
        })
    }

    /// Total miles driven per day
    pub fn total(&self) -> Miles {
        self.city + self.highway
    }

    /// The fraction of the daily distance driven in the city
    fn city_fraction(&self) -> Result<Dimensionless, EstimateError> {
        let total = self.total();
        if total <= Miles(0.0) {
            return Err(EstimateError::InvalidInput(
                "total daily miles must be greater than zero for a plug-in hybrid".to_string(),
            ));
        }

        Ok(self.city / total)
    }
}

/// One row of a fuel cost report
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FuelCostReportRow {
    /// The period over which prices were averaged
    pub time_period: &'static str,
    /// The area whose prices were used (a state, or "US")
    pub area: String,
    /// Mean annual cost
    pub annual_cost: Dollars,
    /// Standard deviation of the annual cost
    pub annual_cost_std: Dollars,
    /// Display name of the vehicle
    pub name: String,
}

/// Annual CO2 emissions of a vehicle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Co2Emissions {
    /// Emitted from the tailpipe
    pub tailpipe: KilogramsCO2,
    /// Tailpipe plus emissions from generating the electricity used, at the state's rate
    pub state: KilogramsCO2,
    /// Tailpipe plus emissions from generating the electricity used, at the national rate
    pub national: KilogramsCO2,
}

/// The estimated annual fuel costs and emissions of a vehicle
#[derive(Clone, Debug, PartialEq)]
pub struct FuelCostEstimate {
    /// Costs at state (or regional) prices followed by costs at national prices
    pub report: [FuelCostReportRow; 2],
    /// Annual CO2 emissions
    pub co2: Co2Emissions,
    /// Display name of the vehicle
    pub name: String,
}

impl FuelCostEstimate {
    /// The report row for the state (or region)
    pub fn state_costs(&self) -> &FuelCostReportRow {
        &self.report[0]
    }

    /// The report row for the US
    pub fn national_costs(&self) -> &FuelCostReportRow {
        &self.report[1]
    }
}

/// Mean and standard deviation of an annual cost
#[derive(Clone, Copy, Debug, PartialEq)]
struct AnnualCost {
    mean: Dollars,
    std: Dollars,
}

/// What a powertrain branch produces before it is assembled into a [`FuelCostEstimate`]
struct BranchResult {
    state_cost: AnnualCost,
    national_cost: AnnualCost,
    co2: Co2Emissions,
}

/// Scale a daily quantity up to a year
fn annualise<T: UnitType>(daily: T) -> T {
    T::new(daily.value() * DAYS_PER_YEAR)
}

/// Convert daily grams of CO2 to annual kilograms, rounded to the nearest kilogram
fn annual_co2(daily: GramsCO2) -> KilogramsCO2 {
    round_to(annualise(daily.to_kilograms()), 0)
}

/// Annual cost of charging with the given daily electricity use.
///
/// The daily spend is computed first, then scaled up to a year.
fn electricity_cost(daily_energy: KilowattHours, price: CentsPerKilowattHour) -> Dollars {
    annualise(daily_energy * price.to_dollars())
}

/// Annual cost of the given daily fuel use.
///
/// The fuel is scaled up to a year before it is priced.
fn fuel_cost(daily_fuel: Gallons, price: DollarsPerGallon) -> Dollars {
    annualise(daily_fuel) * price
}

/// Annual cost of a plug-in hybrid's daily electricity and fuel use.
///
/// The electricity is priced in cents and converted to dollars before the fuel spend is added.
/// The daily total is then scaled up to a year.
fn plug_in_hybrid_cost(
    daily_energy: KilowattHours,
    electricity_price: CentsPerKilowattHour,
    daily_fuel: Gallons,
    fuel_price: DollarsPerGallon,
) -> Dollars {
    annualise((daily_energy * electricity_price).to_dollars() + daily_fuel * fuel_price)
}

/// Apply an annual cost function to both the mean and standard deviation of the price(s)
fn annual_cost<F>(cost_at: F) -> AnnualCost
where
    F: Fn(Stat) -> Dollars,
{
    let cost = |stat| round_to(cost_at(stat), COST_DECIMAL_PLACES);
    AnnualCost {
        mean: cost(Stat::Mean),
        std: cost(Stat::Std),
    }
}

/// Selects one of the statistics in a [`PriceSummary`]
#[derive(Clone, Copy)]
enum Stat {
    Mean,
    Std,
}

impl Stat {
    fn pick<P: Copy>(self, summary: &PriceSummary<P>) -> P {
        match self {
            Self::Mean => summary.mean,
            Self::Std => summary.std,
        }
    }
}

/// The inputs shared by every powertrain branch
struct Request<'a> {
    data: &'a ReferenceData,
    vehicle: &'a VehicleSpec,
    state: &'static str,
    driving: &'a DailyDriving,
}

/// Estimate the annual fuel costs and CO2 emissions of a vehicle.
///
/// # Arguments
///
/// * `data` - Reference prices and emission rates
/// * `vehicle` - The vehicle to estimate for
/// * `state_name` - The state in which the driver buys fuel
/// * `driving` - Distances driven each day
///
/// # Returns
///
/// The estimate, or an error if the state is unknown, the driving distances are unusable for the
/// vehicle, or reference data is missing.
pub fn estimate_fuel_costs(
    data: &ReferenceData,
    vehicle: &VehicleSpec,
    state_name: &str,
    driving: &DailyDriving,
) -> Result<FuelCostEstimate, EstimateError> {
    let state = canonical_state_name(state_name)?;
    debug!(
        "Estimating fuel costs for vehicle {} ({}) in {state}",
        vehicle.id,
        vehicle.powertrain.kind()
    );

    let request = Request {
        data,
        vehicle,
        state,
        driving,
    };
    let result = match &vehicle.powertrain {
        Powertrain::Electric { consumption, .. } => electric_costs(&request, consumption)?,
        Powertrain::PlugInHybrid {
            fuel,
            mpg,
            consumption,
            electric_range,
        } => plug_in_hybrid_costs(&request, *fuel, mpg, consumption, electric_range)?,
        Powertrain::Combustion { fuel, mpg } => combustion_costs(&request, *fuel, mpg)?,
    };

    let name = vehicle.display_name();
    let row = |area: &str, cost: AnnualCost| FuelCostReportRow {
        time_period: AVERAGING_PERIOD_LABEL,
        area: area.to_string(),
        annual_cost: cost.mean,
        annual_cost_std: cost.std,
        name: name.clone(),
    };

    Ok(FuelCostEstimate {
        report: [
            row(state, result.state_cost),
            row(NATIONAL_AREA_LABEL, result.national_cost),
        ],
        co2: result.co2,
        name,
    })
}

impl Request<'_> {
    /// Electricity prices for the state and the US
    fn electricity_prices(
        &self,
    ) -> Result<[PricedArea<'_, CentsPerKilowattHour>; 2], EstimateError> {
        let prices = &self.data.electricity_prices;
        Ok([
            PricedArea::new(prices.for_state(self.state)?, ELECTRICITY, self.state),
            PricedArea::new(&prices.national, ELECTRICITY, NATIONAL_AREA_LABEL),
        ])
    }

    /// Fuel prices for the PADD region containing the state and for the US
    fn fuel_prices(
        &self,
        fuel: PetroleumFuel,
    ) -> Result<[PricedArea<'_, DollarsPerGallon>; 2], EstimateError> {
        let region = PetroleumArea::Region(get_region(self.state)?);
        let prices = &self.data.petroleum_prices;
        let fuel_name = fuel.to_string();
        Ok([
            PricedArea::new(prices.get(fuel, region)?, &fuel_name, &region.to_string()),
            PricedArea::new(
                prices.get(fuel, PetroleumArea::National)?,
                &fuel_name,
                NATIONAL_AREA_LABEL,
            ),
        ])
    }

    /// Annual CO2 from a daily tailpipe mass plus daily electricity use, at state/national rates
    fn co2_with_generation(
        &self,
        daily_tailpipe: GramsCO2,
        daily_energy: KilowattHours,
    ) -> Result<Co2Emissions, EstimateError> {
        let rates = &self.data.emission_rates;
        let total =
            |rate: GramsCO2PerKilowattHour| annual_co2(daily_tailpipe + daily_energy * rate);

        Ok(Co2Emissions {
            tailpipe: annual_co2(daily_tailpipe),
            state: total(rates.for_state(self.state)?),
            national: total(rates.national),
        })
    }
}

/// Costs and emissions for a battery-electric vehicle
fn electric_costs(
    request: &Request,
    consumption: &CityHighway<KilowattHoursPerMile>,
) -> Result<BranchResult, EstimateError> {
    let driving = request.driving;
    let daily_energy = driving.highway * consumption.highway + driving.city * consumption.city;

    let [state_prices, national_prices] = request.electricity_prices()?;
    let cost_at = |summary: PriceSummary<CentsPerKilowattHour>| {
        annual_cost(|stat| electricity_cost(daily_energy, stat.pick(&summary)))
    };

    // Generation emissions only; the tailpipe figure is reported separately
    let mut co2 = request.co2_with_generation(GramsCO2(0.0), daily_energy)?;
    co2.tailpipe = annual_co2(driving.total() * request.vehicle.co2_tailpipe);

    Ok(BranchResult {
        state_cost: cost_at(state_prices.summary()?),
        national_cost: cost_at(national_prices.summary()?),
        co2,
    })
}

/// Costs and emissions for a plug-in hybrid.
///
/// The battery is assumed to be fully charged each day and fully drained before the engine is
/// used, so the electricity used is always the blended electric range times the blended
/// consumption, regardless of the distance actually driven.
fn plug_in_hybrid_costs(
    request: &Request,
    fuel: PetroleumFuel,
    mpg: &CityHighway<MilesPerGallon>,
    consumption: &CityHighway<KilowattHoursPerMile>,
    electric_range: &CityHighway<Miles>,
) -> Result<BranchResult, EstimateError> {
    let driving = request.driving;
    let city_fraction = driving.city_fraction()?;
    let effective_range = electric_range.blend(city_fraction);
    let daily_energy = effective_range * consumption.blend(city_fraction);

    let total = driving.total();
    let (daily_fuel, daily_tailpipe) = if total > effective_range {
        let fuel_miles = total - effective_range;
        (
            fuel_miles / mpg.blend(city_fraction),
            fuel_miles * request.vehicle.co2_tailpipe,
        )
    } else {
        // The battery is never drained, so the engine doesn't run
        (Gallons(0.0), GramsCO2(0.0))
    };

    let [state_electricity, national_electricity] = request.electricity_prices()?;
    let [region_fuel, national_fuel] = request.fuel_prices(fuel)?;
    let cost_at = |averages: PriceAverages| {
        annual_cost(|stat| {
            plug_in_hybrid_cost(
                daily_energy,
                stat.pick(&averages.electricity),
                daily_fuel,
                stat.pick(&averages.fuel),
            )
        })
    };

    Ok(BranchResult {
        state_cost: cost_at(price_averages(state_electricity, region_fuel)?),
        national_cost: cost_at(price_averages(national_electricity, national_fuel)?),
        co2: request.co2_with_generation(daily_tailpipe, daily_energy)?,
    })
}

/// Costs and emissions for a vehicle which only burns fuel.
///
/// Emissions don't depend on location, so all three CO2 figures are the same.
fn combustion_costs(
    request: &Request,
    fuel: PetroleumFuel,
    mpg: &CityHighway<MilesPerGallon>,
) -> Result<BranchResult, EstimateError> {
    let driving = request.driving;
    let daily_fuel = driving.highway / mpg.highway + driving.city / mpg.city;

    let [region_prices, national_prices] = request.fuel_prices(fuel)?;
    let cost_at = |summary: PriceSummary<DollarsPerGallon>| {
        annual_cost(|stat| fuel_cost(daily_fuel, stat.pick(&summary)))
    };

    let co2 = annual_co2(driving.total() * request.vehicle.co2_tailpipe);

    Ok(BranchResult {
        state_cost: cost_at(region_prices.summary()?),
        national_cost: cost_at(national_prices.summary()?),
        co2: Co2Emissions {
            tailpipe: co2,
            state: co2,
            national: co2,
        },
    })
}
