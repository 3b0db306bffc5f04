use std::num::ParseFloatError;

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("I/O error: {0}")]
    #[diagnostic(code(hydro_tbx::grid::io))]
    Io(#[from] std::io::Error),

    #[error("Missing header (first line)")]
    #[diagnostic(code(hydro_tbx::grid::missing_header))]
    MissingHeader,

    #[error("Missing header field {name} (column {column}, header has {found} columns)")]
    #[diagnostic(
        code(hydro_tbx::grid::missing_header_field),
        help("The header lists `label value` pairs for neta, nx, ny, deta, dx and dy")
    )]
    MissingHeaderField {
        name: &'static str,
        column: usize,
        found: usize,
    },

    #[error("Invalid number for header field {name}")]
    #[diagnostic(code(hydro_tbx::grid::invalid_header_number))]
    InvalidHeaderNumber {
        #[source_code]
        header: String,
        #[label("Expected a number here")]
        span: SourceSpan,
        name: &'static str,
        #[source]
        err: ParseFloatError,
    },

    #[error("Invalid grid dimension {name} = {value}")]
    #[diagnostic(code(hydro_tbx::grid::invalid_dimension))]
    InvalidDimension { name: &'static str, value: f64 },

    #[error("Invalid value (line {line}: {err})")]
    #[diagnostic(code(hydro_tbx::grid::invalid_value))]
    InvalidValue {
        line: usize,
        #[source]
        err: ParseFloatError,
    },

    #[error("Data row outside of the {nx}x{ny} grid (line {line}, cell [{i}][{j}])")]
    #[diagnostic(
        code(hydro_tbx::grid::cell_out_of_bounds),
        help("Every x block is expected to end with one separator line")
    )]
    CellOutOfBounds {
        line: usize,
        i: usize,
        j: usize,
        nx: usize,
        ny: usize,
    },

    #[error("Cannot normalize grid, sum of all values is {0}")]
    #[diagnostic(code(hydro_tbx::grid::degenerate_integral))]
    DegenerateIntegral(f64),
}
