use crate::error::Error;

const MIN_DIMENSION: usize = 2;

/// Single-channel mosaic as delivered by the decoder, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SampleGrid {
    width: usize,
    height: usize,
    samples: Vec<u8>,
}

impl SampleGrid {
    pub fn new(width: usize, height: usize, samples: Vec<u8>) -> crate::Result<Self> {
        if width < MIN_DIMENSION || height < MIN_DIMENSION {
            return Err(Error::InvalidDimensions(width, height));
        }
        let expected_number_of_samples = width * height;
        if samples.len() != expected_number_of_samples {
            return Err(Error::SampleCountDoesNotMatchDimensions(
                expected_number_of_samples,
                samples.len(),
            ));
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw sensor value at `(x, y)`.
    pub fn sample(&self, x: usize, y: usize) -> crate::Result<u8> {
        if !self.contains(x, y) {
            return Err(Error::CoordinateOutOfRange(x, y, self.width, self.height));
        }
        Ok(self.samples[x + y * self.width])
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    pub fn components(&self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }
}

/// Reconstructed three-channel image, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    dots: Vec<Rgb>,
}

impl PixelGrid {
    pub(crate) fn new(width: usize, height: usize, dots: Vec<Rgb>) -> crate::Result<Self> {
        let expected_number_of_dots = width * height;
        if dots.len() != expected_number_of_dots {
            return Err(Error::SampleCountDoesNotMatchDimensions(
                expected_number_of_dots,
                dots.len(),
            ));
        }
        Ok(Self {
            width,
            height,
            dots,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dot(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.dots[x + y * self.width])
    }

    pub fn dots(&self) -> &[Rgb] {
        &self.dots
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Rgb]> {
        self.dots.chunks_exact(self.width)
    }
}

#[cfg(test)]
mod test {
    use super::{PixelGrid, Rgb, SampleGrid};
    use crate::error::Error;

    #[test]
    fn reject_single_column() {
        let result = SampleGrid::new(1, 4, vec![0; 4]);
        assert!(matches!(result, Err(Error::InvalidDimensions(1, 4))));
    }

    #[test]
    fn reject_single_row() {
        let result = SampleGrid::new(4, 1, vec![0; 4]);
        assert!(matches!(result, Err(Error::InvalidDimensions(4, 1))));
    }

    #[test]
    fn reject_empty_grid() {
        let result = SampleGrid::new(0, 0, Vec::new());
        assert!(matches!(result, Err(Error::InvalidDimensions(0, 0))));
    }

    #[test]
    fn reject_wrong_number_of_samples() {
        let result = SampleGrid::new(3, 3, vec![0; 8]);
        assert!(matches!(
            result,
            Err(Error::SampleCountDoesNotMatchDimensions(9, 8))
        ));
    }

    #[test]
    fn sample_is_row_major() {
        let grid = SampleGrid::new(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(grid.sample(0, 0).unwrap(), 1);
        assert_eq!(grid.sample(2, 0).unwrap(), 3);
        assert_eq!(grid.sample(0, 1).unwrap(), 4);
        assert_eq!(grid.sample(2, 1).unwrap(), 6);
    }

    #[test]
    fn sample_outside_grid_is_out_of_range() {
        let grid = SampleGrid::new(2, 2, vec![0; 4]).unwrap();
        assert!(matches!(
            grid.sample(2, 0),
            Err(Error::CoordinateOutOfRange(2, 0, 2, 2))
        ));
        assert!(matches!(
            grid.sample(0, 2),
            Err(Error::CoordinateOutOfRange(0, 2, 2, 2))
        ));
    }

    #[test]
    fn pixel_grid_rows() {
        let dots = (0..6).map(|v| Rgb::new(v, v, v)).collect();
        let grid = PixelGrid::new(3, 2, dots).unwrap();
        let rows: Vec<&[Rgb]> = grid.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0], Rgb::new(3, 3, 3));
        assert_eq!(grid.dot(2, 1), Some(Rgb::new(5, 5, 5)));
        assert_eq!(grid.dot(3, 1), None);
    }

    #[test]
    fn pixel_grid_rejects_missing_dots() {
        let result = PixelGrid::new(2, 2, vec![Rgb::default(); 3]);
        assert!(result.is_err());
    }
}
