use serde::{Deserialize, Serialize};

/// Physical eta interval covered by the `n_eta` bins of a volume file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EtaRange {
    pub min: f64,
    pub max: f64,
}

impl Default for EtaRange {
    fn default() -> Self {
        Self {
            min: -10.0,
            max: 10.0,
        }
    }
}

impl EtaRange {
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Maps a physical eta onto one of `n_eta` equal bins.
    ///
    /// Returns `None` if the result is not a valid bin index.
    pub fn bin_index(&self, eta: f64, n_eta: usize) -> Option<usize> {
        let idx = ((eta - self.min) * n_eta as f64 / self.width()).floor();
        if !idx.is_finite() || idx < 0.0 || idx >= n_eta as f64 {
            return None;
        }
        Some(idx as usize)
    }
}

/// Knobs for turning a volume file into temperature evolution curves.
///
/// Temperatures are in GeV, tau in fm/c.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Eta position of the slice.
    #[serde(default)]
    pub eta: f64,
    #[serde(default)]
    pub eta_range: EtaRange,
    /// Cells below this temperature are not part of the hot region.
    #[serde(default = "default_temperature_cutoff")]
    pub temperature_cutoff: f32,
    /// Proper time of the first stored frame.
    #[serde(default = "default_tau_start")]
    pub tau_start: f64,
    /// Proper time between stored frames.
    #[serde(default = "default_tau_step")]
    pub tau_step: f64,
}

fn default_temperature_cutoff() -> f32 {
    0.16
}
fn default_tau_start() -> f64 {
    0.4
}
fn default_tau_step() -> f64 {
    0.2
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            eta: 0.0,
            eta_range: EtaRange::default(),
            temperature_cutoff: default_temperature_cutoff(),
            tau_start: default_tau_start(),
            tau_step: default_tau_step(),
        }
    }
}

impl AnalysisConfig {
    pub fn tau_at(&self, frame: usize) -> f64 {
        self.tau_start + frame as f64 * self.tau_step
    }
}
