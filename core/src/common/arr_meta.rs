use std::ops::{Div, Sub};

use serde::{Deserialize, Serialize};

/// Extremes of the values in an array, used to pick color ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrayStats<N> {
    pub min: N,
    pub max: N,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range<N> {
    pub min: N,
    pub max: N,
}

impl<N: PartialOrd + Copy> ArrayStats<N> {
    /// Returns `None` for an empty iterator. NaNs never replace a min or max.
    pub fn new(mut data: impl Iterator<Item = N>) -> Option<Self> {
        let first = data.next()?;
        Some(data.fold(Self { min: first, max: first }, |mut stats, value| {
            if value < stats.min {
                stats.min = value;
            }
            if value > stats.max {
                stats.max = value;
            }
            stats
        }))
    }

    pub fn range(&self) -> Range<N> {
        Range::new(self.min, self.max)
    }
}

impl<N> Range<N> {
    pub fn new(min: N, max: N) -> Self {
        Self { min, max }
    }
}

impl<N: Sub + Copy> Range<N>
where
    <N as Sub>::Output: Div<<N as Sub>::Output>,
{
    pub fn width(&self) -> <N as Sub>::Output {
        self.max - self.min
    }

    /// Maps `value` into `0..=1` relative to this range.
    pub fn map(&self, value: N) -> <<N as Sub>::Output as Div>::Output {
        (value - self.min) / self.width()
    }
}
