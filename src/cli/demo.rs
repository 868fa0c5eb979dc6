//! The bundled demo data set and the CLI commands for working with it.
use super::{CompareOpts, DrivingOpts, handle_compare_command};
use crate::id::VehicleID;
use crate::settings::Settings;
use anyhow::{Context, Result, bail, ensure};
use clap::Subcommand;
use include_dir::{Dir, DirEntry, include_dir};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The directory containing the demo data files.
const DEMO_DIR: Dir = include_dir!("data/demo");

/// The folder the demo data is extracted to if none is given
const DEFAULT_DEMO_PATH: &str = "fuelcompare_demo";

/// The vehicles compared by `demo run`: a Tesla Model 3 and a Honda Civic
pub const DEMO_VEHICLE_IDS: [VehicleID; 2] = [43395, 41189];

/// The state used by `demo run`
pub const DEMO_STATE: &str = "Pennsylvania";

/// Daily city and highway miles used by `demo run`
pub const DEMO_DAILY_MILES: (f64, f64) = (15.0, 10.0);

/// The available subcommands for the demo data.
#[derive(Subcommand)]
pub enum DemoSubcommands {
    /// Describe the demo data set.
    Info,
    /// Extract the demo data files to a new directory.
    Extract {
        /// The destination folder for the demo data.
        new_path: Option<PathBuf>,
    },
    /// Compare two vehicles using the demo data.
    Run {
        /// Directory for output files
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        /// Whether to overwrite the output directory if it already exists
        #[arg(long)]
        overwrite: bool,
    },
}

impl DemoSubcommands {
    /// Execute the supplied demo subcommand
    pub fn execute(self) -> Result<()> {
        match self {
            Self::Info => handle_demo_info_command()?,
            Self::Extract { new_path } => {
                extract_demo(new_path.as_deref().unwrap_or(Path::new(DEFAULT_DEMO_PATH)))?;
            }
            Self::Run {
                output_dir,
                overwrite,
            } => handle_demo_run_command(output_dir, overwrite, None)?,
        }

        Ok(())
    }
}

/// Handle the `demo info` command.
fn handle_demo_info_command() -> Result<()> {
    let readme = DEMO_DIR
        .get_file("README.txt")
        .context("Demo README not found.")?
        .contents_utf8()
        .context("README.txt is not UTF-8 encoded")?;

    println!("{readme}");

    Ok(())
}

/// Extract the demo data files to a new directory
pub fn extract_demo(new_path: &Path) -> Result<()> {
    ensure!(
        !new_path.exists(),
        "Destination directory {} already exists",
        new_path.display()
    );

    fs::create_dir_all(new_path)?;
    for entry in DEMO_DIR.entries() {
        let DirEntry::File(file) = entry else {
            bail!("Subdirectories in demo data not supported");
        };

        let file_name = file
            .path()
            .file_name()
            .with_context(|| format!("Invalid demo file path: {}", file.path().display()))?;
        let file_path = new_path.join(file_name);
        fs::write(&file_path, file.contents())
            .with_context(|| format!("Could not write {}", file_path.display()))?;
    }

    Ok(())
}

/// Handle the `demo run` command.
pub fn handle_demo_run_command(
    output_dir: Option<PathBuf>,
    overwrite: bool,
    settings: Option<Settings>,
) -> Result<()> {
    let temp_dir = TempDir::new().context("Failed to create temporary directory.")?;
    let data_dir = temp_dir.path().join("demo");
    extract_demo(&data_dir)?;

    let (city, highway) = DEMO_DAILY_MILES;
    let driving = DrivingOpts {
        state: DEMO_STATE.to_string(),
        city,
        highway,
    };
    let opts = CompareOpts {
        output_dir,
        overwrite,
    };
    handle_compare_command(DEMO_VEHICLE_IDS, &driving, Some(&data_dir), &opts, settings)
}
