use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use cfa_demosaic::demosaic::{
    reconstruct_image, reconstruct_image_parallel, Rounding, SampleGrid,
};
use threadpool::ThreadPool;

const IMAGE_WIDTH: usize = 3840;
const IMAGE_HEIGHT: usize = 2160;
const IMAGE_SIZE: usize = IMAGE_WIDTH * IMAGE_HEIGHT;

fn create_test_mosaic() -> SampleGrid {
    let samples = (0..IMAGE_SIZE)
        .map(|index| {
            let x = index % IMAGE_WIDTH;
            let y = index / IMAGE_WIDTH;
            ((x + y * 8) % 256) as u8
        })
        .collect();
    SampleGrid::new(IMAGE_WIDTH, IMAGE_HEIGHT, samples).expect("Test mosaic must be valid")
}

fn calculate_std_deviation_in_micros(mean: &Duration, measurements: &[Duration]) -> u64 {
    let mean_micros = mean.as_micros() as i128;
    let sum = measurements
        .iter()
        .map(|m| m.as_micros() as i128 - mean_micros)
        .map(|v| v.pow(2).unsigned_abs())
        .sum::<u128>();
    let variance = sum / measurements.len() as u128;
    (variance as f64).sqrt().round() as u64
}

fn report(name: &str, durations: &[Duration]) {
    let min_duration = durations.iter().min().unwrap();
    let max_duration = durations.iter().max().unwrap();
    let avg_duration = durations.iter().sum::<Duration>() / durations.len() as u32;
    let std_deviation = calculate_std_deviation_in_micros(&avg_duration, durations);

    println!(
        "{}: Min: {}, Max: {}, Average: {}, Std Deviation: {}",
        name,
        min_duration.as_micros(),
        max_duration.as_micros(),
        avg_duration.as_micros(),
        std_deviation,
    );
}

fn measure<F: FnMut()>(name: &str, mut run: F) -> Vec<Duration> {
    let mut durations: Vec<Duration> = Vec::new();
    for round in 1..=NUMBER_OF_ROUNDS {
        let start = Instant::now();
        run();
        let duration = start.elapsed();
        println!(
            "{}: finished round {} after {} microseconds",
            name,
            round,
            duration.as_micros(),
        );
        durations.push(duration);
    }
    durations
}

const NUMBER_OF_ROUNDS: u32 = 10;

fn main() {
    println!("Creating test mosaic");
    let mosaic = Arc::new(create_test_mosaic());
    let number_of_threads = thread::available_parallelism().map_or(1, |n| n.get());
    let threadpool = ThreadPool::new(number_of_threads);

    let sequential = measure("sequential", || {
        reconstruct_image(&mosaic).unwrap();
    });
    let parallel = measure("parallel", || {
        reconstruct_image_parallel(Arc::clone(&mosaic), Rounding::HalfToEven, &threadpool)
            .unwrap();
    });

    println!("Reconstruction done");
    report("sequential", &sequential);
    report(
        &format!("parallel ({} threads)", number_of_threads),
        &parallel,
    );
}
