mod err;

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use ndarray::{Array1, Array2, ArrayView2};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use super::util::{columns, parse_column, InputLocator};
use crate::common::arr_meta::ArrayStats;
pub use err::Error;

/// Dimensions and spacings from the first line of a grid file.
///
/// The header alternates labels and values, e.g.
/// `neta 1 nx 200 ny 200 deta 0.1 dx 0.08 dy 0.08`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridHeader {
    pub neta: usize,
    pub nx: usize,
    pub ny: usize,
    pub deta: f64,
    pub dx: f64,
    pub dy: f64,
}

impl GridHeader {
    pub fn parse(line: &str) -> Result<Self, Error> {
        let locator = InputLocator::new(line);
        let cols = columns(line);

        let field = |name: &'static str, column: usize| -> Result<f64, Error> {
            let token = cols.get(column).ok_or(Error::MissingHeaderField {
                name,
                column,
                found: cols.len(),
            })?;
            parse_column::<f64>(token).map_err(|err| Error::InvalidHeaderNumber {
                header: line.to_string(),
                span: locator.span_from_substr(token),
                name,
                err,
            })
        };

        let header = GridHeader {
            neta: dimension("neta", field("neta", 1)?)?,
            nx: dimension("nx", field("nx", 3)?)?,
            ny: dimension("ny", field("ny", 5)?)?,
            deta: field("deta", 7)?,
            dx: field("dx", 9)?,
            dy: field("dy", 11)?,
        };

        // Loop bounds must not overflow and the cells must fit in one allocation
        header
            .nx
            .checked_add(1)
            .zip(header.ny.checked_add(1))
            .and_then(|(x, y)| x.checked_mul(y))
            .and(header.cell_bytes())
            .filter(|bytes| *bytes <= isize::MAX as usize)
            .ok_or_else(|| header.too_large())?;

        Ok(header)
    }

    fn cell_bytes(&self) -> Option<usize> {
        self.nx
            .checked_mul(self.ny)?
            .checked_mul(std::mem::size_of::<f64>())
    }

    fn too_large(&self) -> Error {
        Error::InvalidDimension {
            name: "nx * ny",
            value: self.nx as f64 * self.ny as f64,
        }
    }

    /// Zeroed `(nx, ny)` cells, failing instead of aborting if the memory
    /// is not available.
    fn zeroed_cells(&self) -> Result<Array2<f64>, Error> {
        let len = self.nx.checked_mul(self.ny).ok_or_else(|| self.too_large())?;
        let mut cells = Vec::<f64>::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| self.too_large())?;
        cells.resize(len, 0.0);
        Array2::from_shape_vec((self.nx, self.ny), cells).map_err(|_| self.too_large())
    }
}

/// Dimensions are written as floats and truncated towards zero.
fn dimension(name: &'static str, value: f64) -> Result<usize, Error> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidDimension { name, value });
    }
    Ok(value.trunc() as usize)
}

/// A 2D field snapshot (e.g. energy density), normalized to unit sum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSnapshot {
    header: GridHeader,
    values: Array2<f64>,
}

impl GridSnapshot {
    pub fn read(path: impl AsRef<Path>) -> Result<Self, Error> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parses the header line and the body below it.
    ///
    /// The body is visited as `nx + 1` blocks of `ny + 1` lines, the value
    /// being the fourth space separated column. Lines with fewer columns
    /// (block separators, blank lines, end of file) are skipped and leave
    /// their cell at zero. The last line of each block and the whole last
    /// block lie outside the grid, so a data row there is an error.
    #[instrument(skip(rdr))]
    pub fn from_reader(rdr: impl BufRead) -> Result<Self, Error> {
        let mut lines = rdr.lines();

        let header = lines.next().ok_or(Error::MissingHeader)??;
        let header = GridHeader::parse(&header)?;
        debug!(?header, "Parsed grid header");

        let GridHeader { nx, ny, .. } = header;
        let mut values = header.zeroed_cells()?;
        let mut integral = 0.0;
        let mut skipped = 0usize;

        'blocks: for i in 0..=nx {
            for j in 0..=ny {
                // 1-based, the header is line 1
                let line_no = 2 + i * (ny + 1) + j;

                let Some(line) = lines.next() else {
                    break 'blocks;
                };
                let line = line?;

                let cols = columns(&line);
                if cols.len() < 4 {
                    trace!(line = line_no, "Skipping short row");
                    skipped += 1;
                    continue;
                }

                let value: f64 = parse_column(cols[3]).map_err(|err| Error::InvalidValue {
                    line: line_no,
                    err,
                })?;

                if i >= nx || j >= ny {
                    return Err(Error::CellOutOfBounds {
                        line: line_no,
                        i,
                        j,
                        nx,
                        ny,
                    });
                }

                integral += value;
                values[[i, j]] = value;
            }
        }

        debug!(integral, skipped, "Read grid body");

        if integral == 0.0 || !integral.is_finite() {
            return Err(Error::DegenerateIntegral(integral));
        }
        values /= integral;

        Ok(GridSnapshot { header, values })
    }

    pub fn header(&self) -> &GridHeader {
        &self.header
    }

    pub fn nx(&self) -> usize {
        self.header.nx
    }

    pub fn ny(&self) -> usize {
        self.header.ny
    }

    pub fn dx(&self) -> f64 {
        self.header.dx
    }

    pub fn dy(&self) -> f64 {
        self.header.dy
    }

    /// Normalized values indexed `[x][y]`.
    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    /// Cell positions along x, centered on the origin.
    pub fn x_axis(&self) -> Array1<f64> {
        centered_axis(self.header.nx, self.header.dx)
    }

    /// Cell positions along y, centered on the origin.
    pub fn y_axis(&self) -> Array1<f64> {
        centered_axis(self.header.ny, self.header.dy)
    }

    pub fn stats(&self) -> Option<ArrayStats<f64>> {
        ArrayStats::new(self.values.iter().copied())
    }
}

fn centered_axis(n: usize, spacing: f64) -> Array1<f64> {
    let half = n as f64 * spacing / 2.0;
    Array1::linspace(-half, half, n)
}
