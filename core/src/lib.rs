// #![warn(clippy::pedantic)]
// #![warn(clippy::nursery)]
#![warn(clippy::complexity)]
#![warn(clippy::correctness)]
#![warn(clippy::perf)]
#![warn(clippy::style)]
#![warn(clippy::suspicious)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]

//! Readers for hydrodynamic evolution output of heavy-ion collision runs.
//!
//! Two independent formats are supported:
//!
//! * [`formats::grid`]: text snapshots of a 2D field, normalized on read.
//! * [`formats::volume`]: raw `f32` volumes laid out `(tau, eta, x, y, component)`,
//!   reduced to temperature curves by [`evolution`].

pub mod common;
pub mod config;
pub mod evolution;
pub mod formats;

pub use config::{AnalysisConfig, EtaRange};
pub use evolution::{compute_average, get_extreme, Extremum, TemperatureEvolution};
pub use formats::grid::{GridHeader, GridSnapshot};
pub use formats::volume::{
    TemperatureSlice, VolumeDescriptor, VolumeDims, VolumeFormat, VolumeProfile,
};
