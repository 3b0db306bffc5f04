use ndarray::ShapeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    IoErr(#[from] std::io::Error),

    #[error("Dimension {0} must not be zero")]
    EmptyDimension(&'static str),

    #[error("Volume size overflows (n_tau={n_tau}, n_eta={n_eta}, n_x={n_x}, n_comp={n_comp})")]
    DimensionOverflow {
        n_tau: usize,
        n_eta: usize,
        n_x: usize,
        n_comp: usize,
    },

    #[error("Bad file size: read {read} bytes, expected {expected}")]
    ShapeMismatch { read: usize, expected: usize },

    #[error("Reshaping data resulted in shape error: {0}")]
    ShapeErr(#[from] ShapeError),

    #[error("Eta {eta} is outside of the {n_eta} bins covering [{min}, {max})")]
    EtaOutOfRange {
        eta: f64,
        n_eta: usize,
        min: f64,
        max: f64,
    },

    #[error("Component {component} does not exist, file has {n_comp}")]
    ComponentOutOfRange { component: usize, n_comp: usize },
}
