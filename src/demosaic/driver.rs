use std::cmp;
use std::ops::Range;
use std::sync::{mpsc, Arc};

use threadpool::ThreadPool;

use super::{MosaicSampler, PixelGrid, ReconstructionOptions, Rgb, Rounding, SampleGrid};
use crate::error::Error;

// bands per worker, so a slow band does not leave the other workers idle
const BANDS_PER_THREAD: usize = 4;

/// Reconstructs every pixel of `grid` sequentially with the default rounding policy.
pub fn reconstruct_image(grid: &SampleGrid) -> crate::Result<PixelGrid> {
    reconstruct_sequentially(grid, Rounding::default())
}

/// Reconstructs `grid` according to `options`, on a thread pool when more than
/// one thread is requested.
pub fn reconstruct_image_with(
    grid: SampleGrid,
    options: &ReconstructionOptions,
) -> crate::Result<PixelGrid> {
    if options.number_of_threads <= 1 {
        log::info!("Reconstructing sequentially");
        return reconstruct_sequentially(&grid, options.rounding);
    }
    log::info!(
        "Reconstructing with {} threads",
        options.number_of_threads
    );
    let threadpool = ThreadPool::new(options.number_of_threads);
    reconstruct_image_parallel(Arc::new(grid), options.rounding, &threadpool)
}

/// Splits the image into bands of rows and reconstructs them on `threadpool`.
///
/// The result is identical to the sequential reconstruction since every output
/// pixel depends on the input grid alone.
pub fn reconstruct_image_parallel(
    grid: Arc<SampleGrid>,
    rounding: Rounding,
    threadpool: &ThreadPool,
) -> crate::Result<PixelGrid> {
    let bands = split_into_bands(grid.height(), threadpool.max_count() * BANDS_PER_THREAD);
    let (sender, receiver) = mpsc::channel();

    for (band_index, rows) in bands.iter().cloned().enumerate() {
        let grid = Arc::clone(&grid);
        let sender = sender.clone();
        threadpool.execute(move || {
            let sampler = MosaicSampler::new(&grid, rounding);
            let band = reconstruct_rows(&sampler, grid.width(), rows);
            // the receiver is gone once another band has failed
            let _ = sender.send((band_index, band));
        });
    }
    drop(sender);

    let mut finished_bands: Vec<Option<Vec<Rgb>>> = vec![None; bands.len()];
    for (band_index, band) in receiver.iter() {
        log::debug!("Band {} of {} finished", band_index + 1, bands.len());
        finished_bands[band_index] = Some(band?);
    }

    let mut dots = Vec::with_capacity(grid.width() * grid.height());
    for (band_index, band) in finished_bands.into_iter().enumerate() {
        let band = band.ok_or_else(|| {
            log::error!("Band {} was never delivered", band_index);
            Error::ReconstructionJobFailed(band_index)
        })?;
        dots.extend(band);
    }
    PixelGrid::new(grid.width(), grid.height(), dots)
}

fn reconstruct_sequentially(grid: &SampleGrid, rounding: Rounding) -> crate::Result<PixelGrid> {
    let sampler = MosaicSampler::new(grid, rounding);
    let dots = reconstruct_rows(&sampler, grid.width(), 0..grid.height())?;
    PixelGrid::new(grid.width(), grid.height(), dots)
}

fn reconstruct_rows(
    sampler: &MosaicSampler,
    width: usize,
    rows: Range<usize>,
) -> crate::Result<Vec<Rgb>> {
    let mut dots = Vec::with_capacity(width * rows.len());
    for y in rows {
        for x in 0..width {
            dots.push(sampler.reconstruct_rgb(x, y)?);
        }
    }
    Ok(dots)
}

fn split_into_bands(height: usize, number_of_bands: usize) -> Vec<Range<usize>> {
    let number_of_bands = cmp::max(1, cmp::min(height, number_of_bands));
    let band_height = height.div_ceil(number_of_bands);
    (0..height)
        .step_by(band_height)
        .map(|start| start..cmp::min(start + band_height, height))
        .collect()
}
