mod cli;
mod config;
mod logging;
mod plot;

use std::fs::File;

use clap::Parser;
use color_eyre::eyre::{self, WrapErr};
use hydro_toolbox_core::{GridSnapshot, TemperatureEvolution, VolumeDescriptor};
use tracing::info;

use crate::{
    cli::{Cli, Command, EnergyDensityArgs, TemperatureArgs},
    config::ToolboxConfig,
};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();
    logging::init(args.verbose);

    let config = ToolboxConfig::load(args.config.as_deref())?;

    match args.command {
        Command::EnergyDensity(args) => energy_density(args),
        Command::Temperature(args) => temperature(args, config),
    }
}

fn energy_density(args: EnergyDensityArgs) -> eyre::Result<()> {
    // miette renders the offending header token
    let grid = GridSnapshot::read(&args.input)
        .map_err(|err| eyre::eyre!("{:?}", miette::Report::new(err)))
        .wrap_err_with(|| format!("failed to read grid {}", args.input.display()))?;
    info!(nx = grid.nx(), ny = grid.ny(), "Read grid snapshot");

    let title = args
        .title
        .unwrap_or_else(|| "Energy density (normalized)".to_string());
    plot::energy_density_map(&grid, &args.output, &title)?;
    info!(output = %args.output.display(), "Wrote energy density map");
    Ok(())
}

fn temperature(args: TemperatureArgs, config: ToolboxConfig) -> eyre::Result<()> {
    let mut analysis = config.analysis;
    if let Some(eta) = args.eta {
        analysis.eta = eta;
    }
    if let Some(cutoff) = args.cutoff {
        analysis.temperature_cutoff = cutoff;
    }

    let volume = VolumeDescriptor::new(&args.input, config.volume.dims())
        .with_format(config.volume.format())
        .load()
        .wrap_err_with(|| format!("failed to read volume {}", args.input.display()))?;

    let slice = volume.slice_at_eta(analysis.eta, &analysis.eta_range)?;
    info!(eta = analysis.eta, eta_index = slice.eta_index(), "Sliced volume");

    let evolution = TemperatureEvolution::from_slice(&slice, &analysis)?;

    if let Some(csv) = &args.csv {
        let file = File::create(csv).wrap_err_with(|| format!("failed to create {}", csv.display()))?;
        evolution.write_csv(file)?;
        info!(output = %csv.display(), "Wrote temperature evolution CSV");
    }

    plot::temperature_curves(&evolution, &args.output)?;
    info!(output = %args.output.display(), "Wrote temperature evolution plot");
    Ok(())
}
