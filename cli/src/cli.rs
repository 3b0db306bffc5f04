use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Plots hydrodynamic evolution output of heavy-ion collisions.
#[derive(Parser)]
#[command(name = "hydro-toolbox", author, version, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to a TOML configuration file.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Draw the normalized energy density of a grid snapshot.
    EnergyDensity(EnergyDensityArgs),
    /// Draw average and maximum temperature over proper time.
    Temperature(TemperatureArgs),
}

#[derive(clap::Args)]
pub struct EnergyDensityArgs {
    /// Path to the text grid file.
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Path of the PNG to write.
    #[arg(short, long, value_name = "FILE", default_value = "energy_density.png")]
    pub output: PathBuf,

    /// Plot title.
    #[arg(long)]
    pub title: Option<String>,
}

#[derive(clap::Args)]
pub struct TemperatureArgs {
    /// Path to the binary volume file.
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Path of the PNG to write.
    #[arg(short, long, value_name = "FILE", default_value = "temperature.png")]
    pub output: PathBuf,

    /// Override the eta position of the slice.
    #[arg(long, allow_hyphen_values = true)]
    pub eta: Option<f64>,

    /// Override the temperature cutoff (GeV).
    #[arg(long)]
    pub cutoff: Option<f32>,

    /// Also write the curves as CSV.
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,
}
