/// Loader for the bundled iris measurements
pub mod iris;
/// Embedded CSV text backing the loaders
mod raw_data;
