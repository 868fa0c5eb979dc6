//! US states and the EIA petroleum market regions (PADDs) they belong to.
//!
//! Gasoline and diesel prices are published per PADD sub-region, while electricity prices and
//! CO2 emission rates are published per state.
use crate::error::EstimateError;
use crate::id::define_id_type;
use strum::{EnumIter, EnumString, IntoEnumIterator};
use unicase::UniCase;

define_id_type! {StateName}

/// Two-letter USPS codes and full names for the 50 states plus D.C.
const STATES: [(&str, &str); 51] = [
    ("AK", "Alaska"),
    ("AL", "Alabama"),
    ("AR", "Arkansas"),
    ("AZ", "Arizona"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DC", "District of Columbia"),
    ("DE", "Delaware"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("IA", "Iowa"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("MA", "Massachusetts"),
    ("MD", "Maryland"),
    ("ME", "Maine"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MO", "Missouri"),
    ("MS", "Mississippi"),
    ("MT", "Montana"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("NE", "Nebraska"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NV", "Nevada"),
    ("NY", "New York"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VA", "Virginia"),
    ("VT", "Vermont"),
    ("WA", "Washington"),
    ("WI", "Wisconsin"),
    ("WV", "West Virginia"),
    ("WY", "Wyoming"),
];

/// A Petroleum Administration for Defense District (or sub-district) as used by the EIA
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumString, strum::Display,
)]
pub enum PaddRegion {
    /// New England
    #[strum(serialize = "PADD 1A")]
    NewEngland,
    /// Central Atlantic
    #[strum(serialize = "PADD 1B")]
    CentralAtlantic,
    /// Lower Atlantic
    #[strum(serialize = "PADD 1C")]
    LowerAtlantic,
    /// Midwest
    #[strum(serialize = "PADD 2")]
    Midwest,
    /// Gulf Coast
    #[strum(serialize = "PADD 3")]
    GulfCoast,
    /// Rocky Mountain
    #[strum(serialize = "PADD 4")]
    RockyMountain,
    /// West Coast (including Alaska and Hawaii)
    #[strum(serialize = "PADD 5")]
    WestCoast,
}

impl PaddRegion {
    /// The states which make up this region
    pub fn states(self) -> &'static [&'static str] {
        match self {
            Self::NewEngland => &[
                "Connecticut",
                "Maine",
                "Massachusetts",
                "New Hampshire",
                "Rhode Island",
                "Vermont",
            ],
            Self::CentralAtlantic => &[
                "Delaware",
                "District of Columbia",
                "Maryland",
                "New Jersey",
                "Pennsylvania",
                "New York",
            ],
            Self::LowerAtlantic => &[
                "Florida",
                "Georgia",
                "North Carolina",
                "South Carolina",
                "Virginia",
                "West Virginia",
            ],
            Self::Midwest => &[
                "Illinois",
                "Indiana",
                "Iowa",
                "Kansas",
                "Kentucky",
                "Michigan",
                "Missouri",
                "Nebraska",
                "North Dakota",
                "Oklahoma",
                "South Dakota",
                "Tennessee",
                "Wisconsin",
                "Minnesota",
                "Ohio",
            ],
            Self::GulfCoast => &[
                "Alabama",
                "Arkansas",
                "Louisiana",
                "Mississippi",
                "New Mexico",
                "Texas",
            ],
            Self::RockyMountain => &["Colorado", "Idaho", "Montana", "Utah", "Wyoming"],
            Self::WestCoast => &[
                "Alaska",
                "Arizona",
                "California",
                "Hawaii",
                "Nevada",
                "Oregon",
                "Washington",
            ],
        }
    }
}

/// Get the PADD region containing the given state.
///
/// The comparison is case-insensitive and ignores surrounding whitespace.
pub fn get_region(state_name: &str) -> Result<PaddRegion, EstimateError> {
    let state_name = canonical_state_name(state_name)?;
    PaddRegion::iter()
        .find(|region| region.states().contains(&state_name))
        .ok_or_else(|| EstimateError::UnknownRegion(state_name.to_string()))
}

/// Get the canonical spelling of a state name (e.g. "new york" becomes "New York")
pub fn canonical_state_name(state_name: &str) -> Result<&'static str, EstimateError> {
    let wanted = UniCase::new(state_name.trim());
    STATES
        .iter()
        .map(|(_, name)| *name)
        .find(|name| UniCase::new(*name) == wanted)
        .ok_or_else(|| EstimateError::UnknownRegion(state_name.to_string()))
}

/// Get the full name of a state from its two-letter USPS code
pub fn state_name_from_abbreviation(abbreviation: &str) -> Option<&'static str> {
    let abbreviation = abbreviation.trim();
    STATES
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(abbreviation))
        .map(|(_, name)| *name)
}

/// Iterate over the full names of all states, in alphabetical order of their USPS codes
pub fn iter_state_names() -> impl Iterator<Item = &'static str> {
    STATES.iter().map(|(_, name)| *name)
}
