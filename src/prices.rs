//! Historical fuel and electricity prices and the averages derived from them.
use crate::error::EstimateError;
use crate::region::{PaddRegion, StateName};
use crate::units::{CentsPerKilowattHour, DollarsPerGallon, UnitType, round_to};
use crate::vehicle::PetroleumFuel;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::fmt;

/// The number of most recent samples which are averaged (three years of weekly prices)
pub const AVERAGING_WINDOW: usize = 3 * 52;

/// The label for the period covered by [`AVERAGING_WINDOW`]
pub const AVERAGING_PERIOD_LABEL: &str = "3year";

/// The number of decimal places to which price averages are rounded
const PRICE_DECIMAL_PLACES: i32 = 2;

/// A series of prices, sorted by date
#[derive(Clone, Debug, PartialEq)]
pub struct PriceSeries<P> {
    samples: Vec<(NaiveDate, P)>,
}

impl<P: UnitType> PriceSeries<P> {
    /// Create a new series, sorting the samples by date.
    ///
    /// Samples which share a date keep their original relative order.
    pub fn new(mut samples: Vec<(NaiveDate, P)>) -> Self {
        samples.sort_by_key(|(date, _)| *date);
        Self { samples }
    }

    /// The number of samples in the series
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the series is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterate over the samples in date order
    pub fn iter(&self) -> impl Iterator<Item = &(NaiveDate, P)> {
        self.samples.iter()
    }

    /// The date of the latest sample, if any
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.samples.last().map(|(date, _)| *date)
    }

    /// The most recent `count` samples, or the whole series if it is shorter than that
    fn trailing(&self, count: usize) -> &[(NaiveDate, P)] {
        let start = self.samples.len().saturating_sub(count);
        &self.samples[start..]
    }
}

/// The mean and sample standard deviation of a price over the averaging window
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PriceSummary<P> {
    /// Arithmetic mean, rounded to cents
    pub mean: P,
    /// Sample standard deviation, rounded to cents
    pub std: P,
}

/// Summarise the most recent [`AVERAGING_WINDOW`] samples of a price series.
///
/// A series shorter than the window is summarised in full. A series with a single sample has a
/// standard deviation of zero.
///
/// # Returns
///
/// `None` if the series is empty.
pub fn trailing_summary<P: UnitType>(series: &PriceSeries<P>) -> Option<PriceSummary<P>> {
    let window = series.trailing(AVERAGING_WINDOW);
    if window.is_empty() {
        return None;
    }

    let n = window.len() as f64;
    let mean = window.iter().map(|(_, price)| price.value()).sum::<f64>() / n;
    let std = if window.len() > 1 {
        let sum_sq = window
            .iter()
            .map(|(_, price)| (price.value() - mean).powi(2))
            .sum::<f64>();
        (sum_sq / (n - 1.0)).sqrt()
    } else {
        0.0
    };

    Some(PriceSummary {
        mean: round_to(P::new(mean), PRICE_DECIMAL_PLACES),
        std: round_to(P::new(std), PRICE_DECIMAL_PLACES),
    })
}

/// Price averages for electricity and a petroleum fuel within the same area
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PriceAverages {
    /// Average electricity price
    pub electricity: PriceSummary<CentsPerKilowattHour>,
    /// Average fuel price
    pub fuel: PriceSummary<DollarsPerGallon>,
}

/// Summarise an electricity price series and a fuel price series for the same area together.
pub fn price_averages(
    electricity: PricedArea<'_, CentsPerKilowattHour>,
    fuel: PricedArea<'_, DollarsPerGallon>,
) -> Result<PriceAverages, EstimateError> {
    Ok(PriceAverages {
        electricity: electricity.summary()?,
        fuel: fuel.summary()?,
    })
}

/// A price series along with a description of what it prices and where
#[derive(Clone, Debug)]
pub struct PricedArea<'a, P> {
    /// The price series
    pub series: &'a PriceSeries<P>,
    /// The commodity (e.g. "electricity")
    pub commodity: String,
    /// The area (e.g. "Ohio")
    pub area: String,
}

impl<'a, P: UnitType> PricedArea<'a, P> {
    /// Describe a price series
    pub fn new(series: &'a PriceSeries<P>, commodity: &str, area: &str) -> Self {
        Self {
            series,
            commodity: commodity.to_string(),
            area: area.to_string(),
        }
    }

    /// Summarise the series, failing if it is empty
    pub fn summary(&self) -> Result<PriceSummary<P>, EstimateError> {
        trailing_summary(self.series).ok_or_else(|| EstimateError::MissingPriceData {
            commodity: self.commodity.clone(),
            area: self.area.clone(),
        })
    }
}

/// The area to which a petroleum price applies
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PetroleumArea {
    /// A PADD region
    Region(PaddRegion),
    /// The US as a whole
    National,
}

impl PetroleumArea {
    /// Parse an EIA area name (e.g. "PADD 1A" or "U.S.")
    pub fn from_eia_area_name(name: &str) -> Option<Self> {
        match name.trim() {
            "U.S." => Some(Self::National),
            name => name.parse().ok().map(Self::Region),
        }
    }
}

impl fmt::Display for PetroleumArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Region(region) => write!(f, "{region}"),
            Self::National => write!(f, "US"),
        }
    }
}

/// Petroleum fuel prices, keyed by fuel and area
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PetroleumPrices(HashMap<(PetroleumFuel, PetroleumArea), PriceSeries<DollarsPerGallon>>);

impl PetroleumPrices {
    /// Create a new map of fuel prices
    pub fn new(
        map: HashMap<(PetroleumFuel, PetroleumArea), PriceSeries<DollarsPerGallon>>,
    ) -> Self {
        Self(map)
    }

    /// Get the prices for a fuel in an area
    pub fn get(
        &self,
        fuel: PetroleumFuel,
        area: PetroleumArea,
    ) -> Result<&PriceSeries<DollarsPerGallon>, EstimateError> {
        self.0
            .get(&(fuel, area))
            .ok_or_else(|| EstimateError::MissingPriceData {
                commodity: fuel.to_string(),
                area: area.to_string(),
            })
    }

    /// Iterate over the fuel/area combinations for which there are prices
    pub fn keys(&self) -> impl Iterator<Item = &(PetroleumFuel, PetroleumArea)> {
        self.0.keys()
    }
}

/// Retail electricity prices for each state and for the US as a whole
#[derive(Clone, Debug, PartialEq)]
pub struct ElectricityPrices {
    /// Prices keyed by full state name
    pub by_state: HashMap<StateName, PriceSeries<CentsPerKilowattHour>>,
    /// National average prices
    pub national: PriceSeries<CentsPerKilowattHour>,
}

impl ElectricityPrices {
    /// Get the electricity prices for a state
    pub fn for_state(
        &self,
        state: &str,
    ) -> Result<&PriceSeries<CentsPerKilowattHour>, EstimateError> {
        self.by_state
            .get(state)
            .ok_or_else(|| EstimateError::MissingPriceData {
                commodity: "electricity".to_string(),
                area: state.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::weekly_prices;
    use crate::units::Dollars;
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    fn weekly_series(prices: &[f64]) -> PriceSeries<Dollars> {
        weekly_prices(prices)
    }

    #[test]
    fn test_new_sorts_by_date() {
        let day = |d| NaiveDate::from_ymd_opt(2022, 3, d).unwrap();
        let series = PriceSeries::new(vec![(day(3), Dollars(3.0)), (day(1), Dollars(1.0))]);
        let dates: Vec<_> = series.iter().map(|(date, _)| *date).collect();
        assert_eq!(dates, [day(1), day(3)]);
        assert_eq!(series.latest_date(), Some(day(3)));
    }

    #[rstest]
    #[case(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], 5.0, 2.14)]
    #[case(&[3.456], 3.46, 0.0)]
    #[case(&[1.0, 2.0], 1.5, 0.71)]
    fn test_trailing_summary(#[case] prices: &[f64], #[case] mean: f64, #[case] std: f64) {
        let summary = trailing_summary(&weekly_series(prices)).unwrap();
        assert_approx_eq!(Dollars, summary.mean, Dollars(mean), epsilon = 1e-9);
        assert_approx_eq!(Dollars, summary.std, Dollars(std), epsilon = 1e-9);
    }

    #[test]
    fn test_trailing_summary_short_series() {
        // Fewer samples than the window: all ten are used
        let prices: Vec<f64> = (1..=10).map(f64::from).collect();
        let summary = trailing_summary(&weekly_series(&prices)).unwrap();
        assert_approx_eq!(Dollars, summary.mean, Dollars(5.5), epsilon = 1e-9);
        assert_approx_eq!(Dollars, summary.std, Dollars(3.03), epsilon = 1e-9);
    }

    #[test]
    fn test_trailing_summary_uses_latest_window() {
        // Old prices of 100 should fall outside the window
        let mut prices = vec![100.0; 44];
        prices.extend(std::iter::repeat_n(2.5, AVERAGING_WINDOW));
        let summary = trailing_summary(&weekly_series(&prices)).unwrap();
        assert_eq!(summary.mean, Dollars(2.5));
        assert_eq!(summary.std, Dollars(0.0));
    }

    #[test]
    fn test_trailing_summary_empty() {
        assert!(trailing_summary(&weekly_series(&[])).is_none());
    }

    #[test]
    fn test_price_averages() {
        let electricity = PriceSeries::new(vec![
            (NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(), CentsPerKilowattHour(13.0)),
            (NaiveDate::from_ymd_opt(2022, 2, 1).unwrap(), CentsPerKilowattHour(14.0)),
        ]);
        let fuel = PriceSeries::new(vec![(
            NaiveDate::from_ymd_opt(2022, 1, 3).unwrap(),
            DollarsPerGallon(3.2),
        )]);
        let averages = price_averages(
            PricedArea::new(&electricity, "electricity", "Ohio"),
            PricedArea::new(&fuel, "Regular Gasoline", "PADD 2"),
        )
        .unwrap();
        assert_eq!(averages.electricity.mean, CentsPerKilowattHour(13.5));
        assert_eq!(averages.electricity.std, CentsPerKilowattHour(0.71));
        assert_eq!(averages.fuel.mean, DollarsPerGallon(3.2));
        assert_eq!(averages.fuel.std, DollarsPerGallon(0.0));
    }

    #[test]
    fn test_price_averages_missing_data() {
        let electricity = PriceSeries::new(vec![]);
        let fuel = PriceSeries::new(vec![(
            NaiveDate::from_ymd_opt(2022, 1, 3).unwrap(),
            DollarsPerGallon(3.2),
        )]);
        let result = price_averages(
            PricedArea::new(&electricity, "electricity", "Ohio"),
            PricedArea::new(&fuel, "Regular Gasoline", "PADD 2"),
        );
        assert_eq!(
            result.unwrap_err(),
            EstimateError::MissingPriceData {
                commodity: "electricity".into(),
                area: "Ohio".into()
            }
        );
    }

    #[rstest]
    #[case("U.S.", Some(PetroleumArea::National))]
    #[case("PADD 1B", Some(PetroleumArea::Region(PaddRegion::CentralAtlantic)))]
    #[case("Boston", None)]
    fn test_petroleum_area_from_eia_area_name(
        #[case] name: &str,
        #[case] expected: Option<PetroleumArea>,
    ) {
        assert_eq!(PetroleumArea::from_eia_area_name(name), expected);
    }
}
