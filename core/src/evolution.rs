//! Per-frame reductions of a `(tau, x, y)` temperature slice.

use std::io::Write;

use ndarray::{Array1, ArrayView3, Axis};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::{config::AnalysisConfig, formats::volume::TemperatureSlice};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Frame {0} has no cells")]
    EmptyFrame(usize),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Extremum {
    Maximum,
    Minimum,
}

/// Mean of all cells at or above `cutoff`, per frame. Frames without such
/// cells average to `0`.
pub fn compute_average(data: ArrayView3<'_, f32>, cutoff: f32) -> Array1<f32> {
    data.axis_iter(Axis(0))
        .map(|frame| {
            let (sum, count) = frame
                .iter()
                .filter(|v| **v >= cutoff)
                .fold((0f64, 0usize), |(sum, count), v| (sum + *v as f64, count + 1));
            if count == 0 {
                0.0
            } else {
                (sum / count as f64) as f32
            }
        })
        .collect()
}

/// Hottest or coldest cell per frame.
///
/// The cutoff only applies to minima, which are floored at it. Maxima are
/// never capped.
pub fn get_extreme(
    data: ArrayView3<'_, f32>,
    extremum: Extremum,
    cutoff: f32,
) -> Result<Array1<f32>, Error> {
    data.axis_iter(Axis(0))
        .enumerate()
        .map(|(i, frame)| {
            let mut values = frame.iter().copied();
            let first = values.next().ok_or(Error::EmptyFrame(i))?;
            Ok(match extremum {
                Extremum::Maximum => values.fold(first, f32::max),
                Extremum::Minimum => values.fold(first, f32::min).max(cutoff),
            })
        })
        .collect()
}

impl TemperatureSlice<'_> {
    pub fn average(&self, cutoff: f32) -> Array1<f32> {
        compute_average(self.data(), cutoff)
    }

    pub fn extreme(&self, extremum: Extremum, cutoff: f32) -> Result<Array1<f32>, Error> {
        get_extreme(self.data(), extremum, cutoff)
    }
}

/// Temperature curves over proper time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureEvolution {
    pub tau: Array1<f64>,
    pub average: Array1<f32>,
    pub maximum: Array1<f32>,
    pub minimum: Array1<f32>,
}

#[derive(Debug, Serialize)]
struct EvolutionRow {
    tau: f64,
    average: f32,
    maximum: f32,
    minimum: f32,
}

impl TemperatureEvolution {
    #[instrument(skip_all, fields(eta_index = slice.eta_index()))]
    pub fn from_slice(slice: &TemperatureSlice<'_>, config: &AnalysisConfig) -> Result<Self, Error> {
        let cutoff = config.temperature_cutoff;
        let tau = (0..slice.n_tau()).map(|i| config.tau_at(i)).collect();

        let evolution = TemperatureEvolution {
            tau,
            average: slice.average(cutoff),
            maximum: slice.extreme(Extremum::Maximum, cutoff)?,
            minimum: slice.extreme(Extremum::Minimum, cutoff)?,
        };
        debug!(frames = evolution.len(), "Computed temperature evolution");
        Ok(evolution)
    }

    pub fn len(&self) -> usize {
        self.tau.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tau.is_empty()
    }

    pub fn write_csv(&self, wtr: impl Write) -> Result<(), Error> {
        let mut wtr = csv::Writer::from_writer(wtr);
        for i in 0..self.len() {
            wtr.serialize(EvolutionRow {
                tau: self.tau[i],
                average: self.average[i],
                maximum: self.maximum[i],
                minimum: self.minimum[i],
            })?;
        }
        wtr.flush()?;
        Ok(())
    }
}
