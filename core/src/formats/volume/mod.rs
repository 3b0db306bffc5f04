mod err;

use std::{
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

use derive_more::Constructor;
use ndarray::{s, Array5, ArrayView3, ArrayView5};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::EtaRange;
use crate::formats::read_ext::{Endian, ReadExt};
pub use err::Error;

/// Component holding the temperature (GeV) of a cell.
pub const TEMPERATURE: usize = 0;

/// Shape of a volume file, which the file itself does not store.
///
/// Data is laid out `(tau, eta, x, y, component)` with `y` sharing the
/// size of `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Constructor, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VolumeDims {
    pub n_tau: usize,
    pub n_eta: usize,
    pub n_x: usize,
    pub n_comp: usize,
}

impl Default for VolumeDims {
    fn default() -> Self {
        Self {
            n_tau: 84,
            n_eta: 64,
            n_x: 100,
            n_comp: 5,
        }
    }
}

impl VolumeDims {
    pub fn shape(&self) -> (usize, usize, usize, usize, usize) {
        (self.n_tau, self.n_eta, self.n_x, self.n_x, self.n_comp)
    }

    /// Number of floats in the file, checking for empty or overflowing shapes.
    pub fn value_count(&self) -> Result<usize, Error> {
        for (name, n) in [
            ("n_tau", self.n_tau),
            ("n_eta", self.n_eta),
            ("n_x", self.n_x),
            ("n_comp", self.n_comp),
        ] {
            if n == 0 {
                return Err(Error::EmptyDimension(name));
            }
        }

        [self.n_eta, self.n_x, self.n_x, self.n_comp]
            .into_iter()
            .try_fold(self.n_tau, usize::checked_mul)
            .ok_or(Error::DimensionOverflow {
                n_tau: self.n_tau,
                n_eta: self.n_eta,
                n_x: self.n_x,
                n_comp: self.n_comp,
            })
    }

    pub fn byte_count(&self) -> Result<usize, Error> {
        self.value_count()?
            .checked_mul(std::mem::size_of::<f32>())
            .ok_or(Error::DimensionOverflow {
                n_tau: self.n_tau,
                n_eta: self.n_eta,
                n_x: self.n_x,
                n_comp: self.n_comp,
            })
    }
}

/// What to do with bytes beyond the declared shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LengthCheck {
    /// Ignore trailing bytes, only a short file is an error.
    #[default]
    AllowTrailing,
    /// The file must hold exactly the declared number of floats.
    Exact,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VolumeFormat {
    pub byte_order: Endian,
    pub length_check: LengthCheck,
}

/// Where a volume file lives and how to interpret it. Holds no data.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeDescriptor {
    pub path: PathBuf,
    pub dims: VolumeDims,
    pub format: VolumeFormat,
}

impl VolumeDescriptor {
    pub fn new(path: impl Into<PathBuf>, dims: VolumeDims) -> Self {
        Self {
            path: path.into(),
            dims,
            format: VolumeFormat::default(),
        }
    }

    pub fn with_format(mut self, format: VolumeFormat) -> Self {
        self.format = format;
        self
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<VolumeProfile, Error> {
        let file = File::open(&self.path)?;
        VolumeProfile::from_reader(BufReader::new(file), self.dims, &self.format)
    }
}

/// A fully loaded volume file.
#[derive(Debug, Clone)]
pub struct VolumeProfile {
    dims: VolumeDims,
    data: Array5<f32>,
}

impl VolumeProfile {
    /// Loads `path` with the default format (little endian, trailing bytes ignored).
    pub fn read(path: impl AsRef<Path>, dims: VolumeDims) -> Result<Self, Error> {
        VolumeDescriptor::new(path.as_ref(), dims).load()
    }

    #[instrument(skip(rdr))]
    pub fn from_reader(
        mut rdr: impl Read,
        dims: VolumeDims,
        format: &VolumeFormat,
    ) -> Result<Self, Error> {
        let expected = dims.byte_count()?;

        let bytes = match format.length_check {
            LengthCheck::AllowTrailing => rdr.read_up_to(expected)?,
            LengthCheck::Exact => rdr.read_all()?,
        };
        if bytes.len() != expected {
            return Err(Error::ShapeMismatch {
                read: bytes.len(),
                expected,
            });
        }

        let mut values = vec![0f32; dims.value_count()?];
        format.byte_order.read_f32_into(&bytes, &mut values);
        let data = Array5::from_shape_vec(dims.shape(), values)?;

        debug!(bytes = expected, "Loaded volume");

        Ok(VolumeProfile { dims, data })
    }

    pub fn dims(&self) -> VolumeDims {
        self.dims
    }

    /// All values indexed `[tau, eta, x, y, component]`.
    pub fn data(&self) -> ArrayView5<'_, f32> {
        self.data.view()
    }

    pub fn eta_index(&self, eta: f64, range: &EtaRange) -> Result<usize, Error> {
        range
            .bin_index(eta, self.dims.n_eta)
            .ok_or(Error::EtaOutOfRange {
                eta,
                n_eta: self.dims.n_eta,
                min: range.min,
                max: range.max,
            })
    }

    /// Temperature at every `(tau, x, y)` for the eta bin containing `eta`.
    pub fn slice_at_eta(&self, eta: f64, range: &EtaRange) -> Result<TemperatureSlice<'_>, Error> {
        let eta_index = self.eta_index(eta, range)?;
        Ok(TemperatureSlice {
            eta_index,
            data: self.data.slice(s![.., eta_index, .., .., TEMPERATURE]),
        })
    }

    pub fn component_at_eta(
        &self,
        eta: f64,
        range: &EtaRange,
        component: usize,
    ) -> Result<ArrayView3<'_, f32>, Error> {
        if component >= self.dims.n_comp {
            return Err(Error::ComponentOutOfRange {
                component,
                n_comp: self.dims.n_comp,
            });
        }
        let eta_index = self.eta_index(eta, range)?;
        Ok(self.data.slice(s![.., eta_index, .., .., component]))
    }
}

/// Read-only `(tau, x, y)` temperature view at a fixed eta bin.
#[derive(Debug, Clone)]
pub struct TemperatureSlice<'a> {
    eta_index: usize,
    data: ArrayView3<'a, f32>,
}

impl<'a> TemperatureSlice<'a> {
    pub fn new(eta_index: usize, data: ArrayView3<'a, f32>) -> Self {
        Self { eta_index, data }
    }

    pub fn eta_index(&self) -> usize {
        self.eta_index
    }

    pub fn data(&self) -> ArrayView3<'a, f32> {
        self.data.clone()
    }

    pub fn n_tau(&self) -> usize {
        self.data.len_of(ndarray::Axis(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every float holds its own flat index.
    fn indexed_bytes(count: usize, endian: Endian) -> Vec<u8> {
        (0..count)
            .flat_map(|i| match endian {
                Endian::Little => (i as f32).to_le_bytes(),
                Endian::Big => (i as f32).to_be_bytes(),
            })
            .collect()
    }

    const DIMS: VolumeDims = VolumeDims {
        n_tau: 2,
        n_eta: 4,
        n_x: 3,
        n_comp: 2,
    };

    #[test]
    fn reshapes_row_major() {
        let bytes = indexed_bytes(144, Endian::Little);
        let volume = VolumeProfile::from_reader(&bytes[..], DIMS, &VolumeFormat::default()).unwrap();

        assert_eq!(volume.data().dim(), (2, 4, 3, 3, 2));
        // ((((1 * 4 + 2) * 3 + 1) * 3 + 2) * 2 + 1)
        assert_eq!(volume.data()[[1, 2, 1, 2, 1]], 119.0);
        assert_eq!(volume.data()[[0, 0, 0, 0, 1]], 1.0);
    }

    #[test]
    fn big_endian() {
        let bytes = indexed_bytes(144, Endian::Big);
        let format = VolumeFormat {
            byte_order: Endian::Big,
            ..Default::default()
        };
        let volume = VolumeProfile::from_reader(&bytes[..], DIMS, &format).unwrap();
        assert_eq!(volume.data()[[1, 2, 1, 2, 1]], 119.0);
    }

    #[test]
    fn short_file_is_rejected() {
        let bytes = indexed_bytes(143, Endian::Little);
        let err = VolumeProfile::from_reader(&bytes[..], DIMS, &VolumeFormat::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::ShapeMismatch {
                read: 572,
                expected: 576
            }
        ));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn short_file_with_huge_dims_is_rejected() {
        // 2^50 bytes declared, 16 present
        let dims = VolumeDims::new(1 << 16, 1 << 16, 1 << 8, 1);
        for format in [
            VolumeFormat::default(),
            VolumeFormat {
                length_check: LengthCheck::Exact,
                ..Default::default()
            },
        ] {
            let err = VolumeProfile::from_reader(&[0u8; 16][..], dims, &format).unwrap_err();
            assert!(matches!(
                err,
                Error::ShapeMismatch {
                    read: 16,
                    expected: 1_125_899_906_842_624
                }
            ));
        }
    }

    #[test]
    fn trailing_bytes() {
        let mut bytes = indexed_bytes(144, Endian::Little);
        bytes.extend_from_slice(&[0, 0, 0, 0, 1]);

        let volume = VolumeProfile::from_reader(&bytes[..], DIMS, &VolumeFormat::default()).unwrap();
        assert_eq!(volume.data()[[1, 3, 2, 2, 1]], 143.0);

        let exact = VolumeFormat {
            length_check: LengthCheck::Exact,
            ..Default::default()
        };
        let err = VolumeProfile::from_reader(&bytes[..], DIMS, &exact).unwrap_err();
        assert!(matches!(
            err,
            Error::ShapeMismatch {
                read: 581,
                expected: 576
            }
        ));
    }

    #[test]
    fn zero_dimension() {
        let dims = VolumeDims::new(2, 0, 3, 1);
        let err = VolumeProfile::from_reader(&b""[..], dims, &VolumeFormat::default()).unwrap_err();
        assert!(matches!(err, Error::EmptyDimension("n_eta")));
    }

    #[test]
    fn overflowing_dimensions() {
        let dims = VolumeDims::new(usize::MAX, 2, 1, 1);
        assert!(matches!(
            dims.value_count(),
            Err(Error::DimensionOverflow { .. })
        ));
    }

    #[test]
    fn slice_selects_eta_bin_and_temperature() {
        let bytes = indexed_bytes(144, Endian::Little);
        let volume = VolumeProfile::from_reader(&bytes[..], DIMS, &VolumeFormat::default()).unwrap();

        // 4 bins over [-10, 10): eta 0.0 lies in bin 2
        let slice = volume.slice_at_eta(0.0, &EtaRange::default()).unwrap();
        assert_eq!(slice.eta_index(), 2);
        assert_eq!(slice.data().dim(), (2, 3, 3));
        assert_eq!(slice.n_tau(), 2);
        for ((t, x, y), v) in slice.data().indexed_iter() {
            assert_eq!(*v, volume.data()[[t, 2, x, y, TEMPERATURE]]);
        }
    }

    #[test]
    fn eta_bin_boundaries() {
        let dims = VolumeDims::new(1, 64, 1, 1);
        let bytes = indexed_bytes(64, Endian::Little);
        let volume = VolumeProfile::from_reader(&bytes[..], dims, &VolumeFormat::default()).unwrap();
        let range = EtaRange::default();

        assert_eq!(volume.slice_at_eta(0.0, &range).unwrap().eta_index(), 32);
        assert_eq!(volume.slice_at_eta(-10.0, &range).unwrap().eta_index(), 0);
        assert_eq!(volume.slice_at_eta(9.99, &range).unwrap().eta_index(), 63);

        assert!(matches!(
            volume.slice_at_eta(10.0, &range),
            Err(Error::EtaOutOfRange { .. })
        ));
        assert!(matches!(
            volume.slice_at_eta(-10.5, &range),
            Err(Error::EtaOutOfRange { .. })
        ));
    }

    #[test]
    fn other_components() {
        let bytes = indexed_bytes(144, Endian::Little);
        let volume = VolumeProfile::from_reader(&bytes[..], DIMS, &VolumeFormat::default()).unwrap();
        let range = EtaRange::default();

        let comp = volume.component_at_eta(0.0, &range, 1).unwrap();
        assert_eq!(comp[[1, 1, 2]], volume.data()[[1, 2, 1, 2, 1]]);

        assert!(matches!(
            volume.component_at_eta(0.0, &range, 2),
            Err(Error::ComponentOutOfRange {
                component: 2,
                n_comp: 2
            })
        ));
    }
}
