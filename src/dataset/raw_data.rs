/// Iris CSV text as compiled-in string constants
pub mod iris_raw;
