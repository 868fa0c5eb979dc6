//! Integration tests for the `validate` command.
use fuelcompare::cli::handle_validate_command;
use fuelcompare::log::is_logger_initialised;
use fuelcompare::settings::Settings;
use std::path::Path;

/// An integration test for the `validate` command.
///
/// We also check that the logger is initialised after it is run.
#[test]
fn test_handle_validate_command() {
    unsafe { std::env::set_var("FUELCOMPARE_LOG_LEVEL", "off") };

    assert!(!is_logger_initialised());

    handle_validate_command(Some(Path::new("data/demo")), Some(Settings::default())).unwrap();

    assert!(is_logger_initialised());
}
