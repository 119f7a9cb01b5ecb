use clap::builder::PossibleValue;
use clap::ValueEnum;

use crate::Arguments;

mod driver;
mod grid;
mod sampler;

pub use driver::{reconstruct_image, reconstruct_image_parallel, reconstruct_image_with};
pub use grid::{PixelGrid, Rgb, SampleGrid};
pub use sampler::MosaicSampler;

/// Color channel of the RGGB mosaic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// The channel a mosaic pixel natively samples, derived from coordinate parity.
    ///
    /// ```text
    /// R G R G
    /// G B G B
    /// ```
    pub fn native_at(x: usize, y: usize) -> Self {
        match (x % 2 == 0, y % 2 == 0) {
            (true, true) => Self::Red,
            (false, false) => Self::Blue,
            _ => Self::Green,
        }
    }
}

/// Tie-break rule applied when an averaged value lies exactly between two integers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rounding {
    /// Ties go to the even neighbour (2.5 -> 2, 3.5 -> 4).
    #[default]
    HalfToEven,
    /// Ties go away from zero (2.5 -> 3, 3.5 -> 4).
    HalfAwayFromZero,
}

impl Rounding {
    pub fn round(&self, value: f64) -> f64 {
        match self {
            Self::HalfToEven => value.round_ties_even(),
            Self::HalfAwayFromZero => value.round(),
        }
    }
}

impl ValueEnum for Rounding {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::HalfToEven, Self::HalfAwayFromZero]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Self::HalfToEven => Some(PossibleValue::new("HalfToEven")),
            Self::HalfAwayFromZero => Some(PossibleValue::new("HalfAwayFromZero")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReconstructionOptions {
    pub rounding: Rounding,
    pub number_of_threads: usize,
}

impl Default for ReconstructionOptions {
    fn default() -> Self {
        Self {
            rounding: Rounding::default(),
            number_of_threads: 1,
        }
    }
}

impl From<&Arguments> for ReconstructionOptions {
    fn from(value: &Arguments) -> Self {
        Self {
            rounding: value.rounding,
            number_of_threads: value.number_of_threads,
        }
    }
}
