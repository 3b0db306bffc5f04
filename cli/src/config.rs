use std::{fs, path::Path};

use color_eyre::eyre::{self, WrapErr};
use hydro_toolbox_core::{
    formats::{read_ext::Endian, volume::LengthCheck},
    AnalysisConfig, VolumeDims, VolumeFormat,
};
use serde::Deserialize;

/// Contents of the TOML configuration file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolboxConfig {
    #[serde(default)]
    pub volume: VolumeToml,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Layout of the binary volume file, which the file does not describe itself.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VolumeToml {
    pub n_tau: usize,
    pub n_eta: usize,
    pub n_x: usize,
    pub n_comp: usize,
    pub byte_order: Endian,
    pub length_check: LengthCheck,
}

impl Default for VolumeToml {
    fn default() -> Self {
        let VolumeDims {
            n_tau,
            n_eta,
            n_x,
            n_comp,
        } = VolumeDims::default();
        let VolumeFormat {
            byte_order,
            length_check,
        } = VolumeFormat::default();
        Self {
            n_tau,
            n_eta,
            n_x,
            n_comp,
            byte_order,
            length_check,
        }
    }
}

impl VolumeToml {
    pub fn dims(&self) -> VolumeDims {
        VolumeDims::new(self.n_tau, self.n_eta, self.n_x, self.n_comp)
    }

    pub fn format(&self) -> VolumeFormat {
        VolumeFormat {
            byte_order: self.byte_order,
            length_check: self.length_check,
        }
    }
}

impl ToolboxConfig {
    /// Reads `path`, or falls back to the defaults when no file is given.
    pub fn load(path: Option<&Path>) -> eyre::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&text).wrap_err("failed to parse TOML config")
    }
}
