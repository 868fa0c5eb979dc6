//! CO2 emission rates for electricity generation.
use crate::error::EstimateError;
use crate::region::StateName;
use crate::units::GramsCO2PerKilowattHour;
use std::collections::HashMap;

/// Average CO2 emitted per unit of electricity generated, for each state and the US as a whole
#[derive(Clone, Debug, PartialEq)]
pub struct EmissionRates {
    /// Emission rates keyed by full state name
    pub by_state: HashMap<StateName, GramsCO2PerKilowattHour>,
    /// The national emission rate
    pub national: GramsCO2PerKilowattHour,
}

impl EmissionRates {
    /// Get the emission rate for a state
    pub fn for_state(&self, state: &str) -> Result<GramsCO2PerKilowattHour, EstimateError> {
        self.by_state
            .get(state)
            .copied()
            .ok_or_else(|| EstimateError::MissingEmissionRate(state.to_string()))
    }
}
