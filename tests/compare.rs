//! Integration tests for the `compare` command.
use fuelcompare::cli::{CompareOpts, DrivingOpts, handle_compare_command};
use fuelcompare::settings::Settings;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn driving() -> DrivingOpts {
    DrivingOpts {
        state: "Pennsylvania".into(),
        city: 15.0,
        highway: 10.0,
    }
}

/// An integration test for the `compare` command.
#[test]
fn test_handle_compare_command() {
    unsafe { std::env::set_var("FUELCOMPARE_LOG_LEVEL", "off") };

    // Save results to non-existent directory to check that directory creation works
    let tempdir = tempdir().unwrap();
    let output_dir = tempdir.path().join("results");
    let mut opts = CompareOpts {
        output_dir: Some(output_dir.clone()),
        overwrite: false,
    };
    let data_dir = Path::new("data/demo");
    handle_compare_command(
        [43395, 42791],
        &driving(),
        Some(data_dir),
        &opts,
        Some(Settings::default()),
    )
    .unwrap();

    // A header plus a state and a national row for each vehicle
    let fuel_costs = fs::read_to_string(output_dir.join("fuel_costs.csv")).unwrap();
    let lines: Vec<_> = fuel_costs.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "time_period,area,annual_cost,annual_cost_std,name");
    assert!(lines[1].starts_with("3year,Pennsylvania,"));
    assert!(lines[2].starts_with("3year,US,"));

    let co2 = fs::read_to_string(output_dir.join("co2_emissions.csv")).unwrap();
    assert_eq!(co2.lines().count(), 3);

    // Second time will fail because the output folder isn't empty
    assert_eq!(
        handle_compare_command(
            [43395, 42791],
            &driving(),
            Some(data_dir),
            &opts,
            Some(Settings::default()),
        )
        .unwrap_err()
        .chain()
        .next()
        .unwrap()
        .to_string(),
        format!(
            "Failed to create output directory: {}",
            output_dir.display()
        )
    );

    // ...unless overwriting is allowed
    opts.overwrite = true;
    handle_compare_command(
        [43395, 42791],
        &driving(),
        Some(data_dir),
        &opts,
        Some(Settings::default()),
    )
    .unwrap();
}

/// Comparing against a vehicle which was skipped at load time gives the reason it was skipped
#[test]
fn test_handle_compare_command_rejected_vehicle() {
    unsafe { std::env::set_var("FUELCOMPARE_LOG_LEVEL", "off") };

    let tempdir = tempdir().unwrap();
    let opts = CompareOpts {
        output_dir: Some(tempdir.path().join("results")),
        overwrite: false,
    };
    let err = handle_compare_command(
        [41189, 34411],
        &driving(),
        Some(Path::new("data/demo")),
        &opts,
        Some(Settings::default()),
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Vehicle 34411 uses unsupported fuel type 'Natural Gas'"
    );
}
