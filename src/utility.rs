use ahash::AHashMap;
use ndarray::{Array1, Array2};

/// One-hot encoding and decoding helpers for class labels
pub mod label_encoding;

/// Shuffled splitting of paired feature and label matrices
pub mod train_test_split;

pub use label_encoding::*;
pub use train_test_split::*;
