//! Common functionality for fuelcompare.
#![warn(missing_docs)]
use std::path::PathBuf;

pub mod cli;
pub mod compare;
pub mod emissions;
pub mod error;
pub mod estimate;
pub mod id;
pub mod input;
pub mod log;
pub mod output;
pub mod prices;
pub mod reference;
pub mod region;
pub mod settings;
pub mod units;
pub mod vehicle;

#[cfg(test)]
mod fixture;

/// Get the folder in which fuelcompare's configuration files are stored.
///
/// Falls back to the current folder on platforms without a standard config folder.
pub fn get_config_dir() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_default();
    path.push("fuelcompare");

    path
}
