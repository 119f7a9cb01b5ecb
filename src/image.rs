use crate::demosaic::{PixelGrid, SampleGrid};

pub mod reader;
pub mod writer;

/// Source of a single-channel mosaic.
pub trait ImageReader {
    fn read_image(&mut self) -> crate::Result<SampleGrid>;
}

/// Sink for a reconstructed color image.
pub trait ImageWriter {
    fn write_image(&mut self, image: &PixelGrid) -> crate::Result<()>;
}
