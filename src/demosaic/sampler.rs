use super::{Channel, Rgb, Rounding, SampleGrid};
use crate::error::Error;

/// How a missing channel is estimated from the neighbourhood of a pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Interpolation {
    Native,
    Horizontal,
    Vertical,
    Diagonal,
    Orthogonal,
}

impl Interpolation {
    fn select(wanted: Channel, native: Channel, y: usize) -> Self {
        let even_row = y % 2 == 0;
        match (wanted, native) {
            (Channel::Red, Channel::Red)
            | (Channel::Green, Channel::Green)
            | (Channel::Blue, Channel::Blue) => Self::Native,
            // red samples sit on even rows, so a green pixel on an even row has them left and right
            (Channel::Red, Channel::Green) if even_row => Self::Horizontal,
            (Channel::Red, Channel::Green) => Self::Vertical,
            (Channel::Red, Channel::Blue) => Self::Diagonal,
            (Channel::Green, Channel::Red) | (Channel::Green, Channel::Blue) => Self::Orthogonal,
            (Channel::Blue, Channel::Green) if even_row => Self::Vertical,
            (Channel::Blue, Channel::Green) => Self::Horizontal,
            (Channel::Blue, Channel::Red) => Self::Diagonal,
        }
    }
}

/// Answers per-coordinate channel queries over an RGGB mosaic.
pub struct MosaicSampler<'a> {
    grid: &'a SampleGrid,
    rounding: Rounding,
}

impl<'a> MosaicSampler<'a> {
    pub fn new(grid: &'a SampleGrid, rounding: Rounding) -> Self {
        Self { grid, rounding }
    }

    pub fn native_channel(&self, x: usize, y: usize) -> Channel {
        Channel::native_at(x, y)
    }

    pub fn sample(&self, x: usize, y: usize) -> crate::Result<u8> {
        self.grid.sample(x, y)
    }

    /// Reconstructed value of `channel` at `(x, y)`.
    ///
    /// Compatibility note: every channel on the outermost ring is reported as 0,
    /// including the channel the pixel sampled itself. Existing outputs depend
    /// on this, so the observed border value is discarded on purpose.
    pub fn reconstruct(&self, x: usize, y: usize, channel: Channel) -> crate::Result<u8> {
        if !self.grid.contains(x, y) {
            return Err(Error::CoordinateOutOfRange(
                x,
                y,
                self.grid.width(),
                self.grid.height(),
            ));
        }
        if self.is_border(x, y) {
            return Ok(0);
        }
        match Interpolation::select(channel, self.native_channel(x, y), y) {
            Interpolation::Native => self.sample(x, y),
            Interpolation::Horizontal => self.mean(&[(x - 1, y), (x + 1, y)]),
            Interpolation::Vertical => self.mean(&[(x, y - 1), (x, y + 1)]),
            Interpolation::Diagonal => self.mean(&[
                (x - 1, y - 1),
                (x + 1, y - 1),
                (x - 1, y + 1),
                (x + 1, y + 1),
            ]),
            Interpolation::Orthogonal => {
                self.mean(&[(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)])
            }
        }
    }

    pub fn reconstruct_rgb(&self, x: usize, y: usize) -> crate::Result<Rgb> {
        Ok(Rgb::new(
            self.reconstruct(x, y, Channel::Red)?,
            self.reconstruct(x, y, Channel::Green)?,
            self.reconstruct(x, y, Channel::Blue)?,
        ))
    }

    fn is_border(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x == self.grid.width() - 1 || y == self.grid.height() - 1
    }

    fn mean(&self, coordinates: &[(usize, usize)]) -> crate::Result<u8> {
        let mut sum = 0.0;
        for &(x, y) in coordinates {
            sum += f64::from(self.sample(x, y)?);
        }
        let mean = sum / coordinates.len() as f64;
        Ok(self.rounding.round(mean) as u8)
    }
}
