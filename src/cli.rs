//! The command line interface for the fuel cost comparison.
use crate::compare::compare_vehicles;
use crate::estimate::{DailyDriving, FuelCostEstimate, estimate_fuel_costs};
use crate::id::VehicleID;
use crate::log;
use crate::output::{DataWriter, create_output_directory, get_output_dir};
use crate::reference::ReferenceData;
use crate::settings::Settings;
use ::log::{info, warn};
use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};

pub mod demo;
use demo::DemoSubcommands;
pub mod settings;
use settings::SettingsSubcommands;

/// The command line interface for the fuel cost comparison.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// The available commands.
    #[command(subcommand)]
    command: Option<Commands>,
    /// Flag to provide the CLI docs as markdown
    #[arg(long, hide = true)]
    markdown_help: bool,
}

/// Where and how much the vehicles are driven
#[derive(Args)]
pub struct DrivingOpts {
    /// The state in which fuel is bought (e.g. "Pennsylvania")
    #[arg(short, long)]
    pub state: String,
    /// Miles driven in the city each day
    #[arg(long)]
    pub city: f64,
    /// Miles driven on the highway each day
    #[arg(long)]
    pub highway: f64,
}

impl DrivingOpts {
    /// Check the distances and convert into a [`DailyDriving`]
    fn daily_driving(&self) -> Result<DailyDriving> {
        Ok(DailyDriving::new(self.city, self.highway)?)
    }
}

/// Options for the compare command
#[derive(Args)]
pub struct CompareOpts {
    /// Directory for output files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
    /// Whether to overwrite the output directory if it already exists
    #[arg(long)]
    pub overwrite: bool,
}

/// The available commands.
#[derive(Subcommand)]
enum Commands {
    /// Compare the annual fuel costs and CO2 emissions of two vehicles.
    Compare {
        /// ID of the first vehicle.
        first: VehicleID,
        /// ID of the second vehicle.
        second: VehicleID,
        /// How the vehicles are driven
        #[command(flatten)]
        driving: DrivingOpts,
        /// Directory containing the reference data.
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
        /// Other compare options
        #[command(flatten)]
        opts: CompareOpts,
    },
    /// Estimate the annual fuel costs and CO2 emissions of a single vehicle.
    Estimate {
        /// ID of the vehicle.
        vehicle: VehicleID,
        /// How the vehicle is driven
        #[command(flatten)]
        driving: DrivingOpts,
        /// Directory containing the reference data.
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
    /// List vehicles matching the given criteria.
    Vehicles {
        /// Model year.
        #[arg(long)]
        year: Option<u32>,
        /// Manufacturer (case-insensitive).
        #[arg(long)]
        make: Option<String>,
        /// Model name (case-insensitive).
        #[arg(long)]
        model: Option<String>,
        /// Directory containing the reference data.
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
    /// Validate the reference data.
    Validate {
        /// Directory containing the reference data.
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
    /// Work with the bundled demo data.
    Demo {
        /// The available subcommands for the demo data.
        #[command(subcommand)]
        subcommand: DemoSubcommands,
    },
    /// Manage settings file.
    Settings {
        /// The subcommands for managing the settings file.
        #[command(subcommand)]
        subcommand: SettingsSubcommands,
    },
}

impl Commands {
    /// Execute the supplied CLI command
    fn execute(self) -> Result<()> {
        match self {
            Self::Compare {
                first,
                second,
                driving,
                data_dir,
                opts,
            } => handle_compare_command(
                [first, second],
                &driving,
                data_dir.as_deref(),
                &opts,
                None,
            ),
            Self::Estimate {
                vehicle,
                driving,
                data_dir,
            } => handle_estimate_command(vehicle, &driving, data_dir.as_deref(), None),
            Self::Vehicles {
                year,
                make,
                model,
                data_dir,
            } => handle_vehicles_command(
                year,
                make.as_deref(),
                model.as_deref(),
                data_dir.as_deref(),
                None,
            ),
            Self::Validate { data_dir } => handle_validate_command(data_dir.as_deref(), None),
            Self::Demo { subcommand } => subcommand.execute(),
            Self::Settings { subcommand } => subcommand.execute(),
        }
    }
}

/// Parse CLI arguments and run the requested command
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    // Invoked as: `$ fuelcompare --markdown-help`
    if cli.markdown_help {
        clap_markdown::print_help_markdown::<Cli>();
        return Ok(());
    }

    let Some(command) = cli.command else {
        let help_str = Cli::command().render_long_help().to_string();
        println!("{help_str}");
        return Ok(());
    };

    command.execute()
}

/// Load program settings, if not provided
fn settings_or_load(settings: Option<Settings>) -> Result<Settings> {
    match settings {
        Some(settings) => Ok(settings),
        None => Settings::load().context("Failed to load settings."),
    }
}

/// Initialise the program logger, unless this has already been done
fn init_logger(settings: &Settings, log_dir: Option<&Path>) -> Result<()> {
    if log::is_logger_initialised() {
        return Ok(());
    }

    log::init(Some(&settings.log_level), log_dir).context("Failed to initialise logging.")
}

/// Load the reference data from the given folder
fn load_data(data_dir: &Path) -> Result<ReferenceData> {
    let data = ReferenceData::from_path(data_dir).context("Failed to load reference data.")?;
    info!("Loaded reference data from {}", data_dir.display());

    Ok(data)
}

/// Log the costs and emissions of one vehicle
fn log_estimate(estimate: &FuelCostEstimate) {
    let state = estimate.state_costs();
    let national = estimate.national_costs();
    info!(
        "{}: ${:.2} (± ${:.2}) per year at {} prices, ${:.2} (± ${:.2}) at {} prices",
        estimate.name,
        state.annual_cost.0,
        state.annual_cost_std.0,
        state.area,
        national.annual_cost.0,
        national.annual_cost_std.0,
        national.area
    );
    info!(
        "{}: {} kg CO2 per year from the tailpipe, {} kg including electricity generation in {} \
        ({} kg at the US average)",
        estimate.name, estimate.co2.tailpipe, estimate.co2.state, state.area, estimate.co2.national
    );
}

/// Handle the `compare` command.
pub fn handle_compare_command(
    vehicle_ids: [VehicleID; 2],
    driving: &DrivingOpts,
    data_dir: Option<&Path>,
    opts: &CompareOpts,
    settings: Option<Settings>,
) -> Result<()> {
    let settings = settings_or_load(settings)?;
    let daily_driving = driving.daily_driving()?;

    // Get path to output folder
    let pathbuf: PathBuf;
    let output_path = if let Some(p) = opts.output_dir.as_deref() {
        p
    } else {
        pathbuf = get_output_dir(vehicle_ids);
        &pathbuf
    };

    // The overwrite option can be given on the command line or in the settings file
    let overwrite = create_output_directory(output_path, opts.overwrite || settings.overwrite)
        .with_context(|| {
            format!(
                "Failed to create output directory: {}",
                output_path.display()
            )
        })?;

    init_logger(&settings, Some(output_path))?;
    let data = load_data(settings.data_dir_or(data_dir))?;
    info!("Output folder: {}", output_path.display());

    // NB: We have to wait until the logger is initialised to display this warning
    if overwrite {
        warn!("Output folder will be overwritten");
    }

    let comparison = compare_vehicles(&data, vehicle_ids, &driving.state, &daily_driving)?;
    let mut writer = DataWriter::create(output_path)?;
    for estimate in &comparison.estimates {
        log_estimate(estimate);
        writer.write_estimate(estimate)?;
    }
    writer.flush()?;

    for line in comparison.summary() {
        info!("{line}");
    }
    info!("Comparison complete!");

    Ok(())
}

/// Handle the `estimate` command.
pub fn handle_estimate_command(
    vehicle_id: VehicleID,
    driving: &DrivingOpts,
    data_dir: Option<&Path>,
    settings: Option<Settings>,
) -> Result<()> {
    let settings = settings_or_load(settings)?;
    let daily_driving = driving.daily_driving()?;
    init_logger(&settings, None)?;

    let data = load_data(settings.data_dir_or(data_dir))?;
    let vehicle = data.vehicles.get(vehicle_id)?;
    let estimate = estimate_fuel_costs(&data, vehicle, &driving.state, &daily_driving)?;
    log_estimate(&estimate);

    Ok(())
}

/// Handle the `vehicles` command.
pub fn handle_vehicles_command(
    year: Option<u32>,
    make: Option<&str>,
    model: Option<&str>,
    data_dir: Option<&Path>,
    settings: Option<Settings>,
) -> Result<()> {
    let settings = settings_or_load(settings)?;
    init_logger(&settings, None)?;

    let data = load_data(settings.data_dir_or(data_dir))?;
    let vehicles = data.vehicles.search(year, make, model);
    if vehicles.is_empty() {
        warn!("No matching vehicles found");
    }
    for vehicle in vehicles {
        println!(
            "{}\t{}\t{}",
            vehicle.id,
            vehicle.display_name(),
            vehicle.options
        );
    }

    Ok(())
}

/// Handle the `validate` command.
pub fn handle_validate_command(data_dir: Option<&Path>, settings: Option<Settings>) -> Result<()> {
    let settings = settings_or_load(settings)?;

    // We won't save log files when running the validate command
    init_logger(&settings, None)?;

    let data = load_data(settings.data_dir_or(data_dir))?;
    info!(
        "Found {} usable vehicles ({} records skipped)",
        data.vehicles.vehicles.len(),
        data.vehicles.rejected.len()
    );
    info!("Reference data validation successful!");

    Ok(())
}
