use crate::error::ModelError;
use ndarray::{Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{SeedableRng, thread_rng};

/// Shuffles a dataset and carves it into training and test portions.
///
/// Rows of `x` and `y` stay paired through the shuffle, so label matrices
/// from `to_categorical` can be passed in directly. Both portions are
/// guaranteed at least one sample.
///
/// # Parameters
///
/// - `x` - Feature matrix, one sample per row
/// - `y` - Label matrix with the same number of rows as `x`
/// - `test_size` - Fraction of samples routed to the test set; `None` means 0.3
/// - `random_state` - Shuffle seed; `None` draws from thread randomness
///
/// # Returns
///
/// - `Result<(Array2<f64>, Array2<f64>, Array2<f64>, Array2<f64>), ModelError>` -
///   `(x_train, x_test, y_train, y_test)` on success
///
/// # Errors
///
/// - `ModelError::InputValidationError` when `x` and `y` disagree on sample
///   count, when there are fewer than 2 samples, or when `test_size` falls
///   outside the open interval (0, 1)
///
/// # Example
/// ```rust
/// use ndarray::Array2;
/// use shallownet::utility::train_test_split::train_test_split;
///
/// let x = Array2::from_shape_vec((5, 2), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]).unwrap();
/// let y = Array2::from_shape_vec((5, 2), vec![1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0]).unwrap();
/// let (x_train, x_test, y_train, y_test) = train_test_split(x, y, Some(0.4), Some(42)).unwrap();
/// assert_eq!(x_train.nrows(), 3);
/// assert_eq!(x_test.nrows(), 2);
/// ```
pub fn train_test_split(
    x: Array2<f64>,
    y: Array2<f64>,
    test_size: Option<f64>,
    random_state: Option<u64>,
) -> Result<(Array2<f64>, Array2<f64>, Array2<f64>, Array2<f64>), ModelError> {
    let n_samples = x.nrows();

    if n_samples != y.nrows() {
        return Err(ModelError::InputValidationError(format!(
            "sample count mismatch between x ({} rows) and y ({} rows)",
            n_samples,
            y.nrows()
        )));
    }

    if n_samples < 2 {
        return Err(ModelError::InputValidationError(format!(
            "need at least 2 samples to split into train and test sets, got {}",
            n_samples
        )));
    }

    let test_fraction = test_size.unwrap_or(0.3);
    if test_fraction <= 0.0 || test_fraction >= 1.0 {
        return Err(ModelError::InputValidationError(format!(
            "test_size must lie strictly between 0 and 1, got {}",
            test_fraction
        )));
    }

    // Round toward the requested fraction, then clamp so neither side is empty.
    // Two samples always split 1/1 whatever the fraction says.
    let n_test = if n_samples == 2 {
        1
    } else {
        let rounded = (n_samples as f64 * test_fraction).round() as usize;
        rounded.max(1).min(n_samples - 1)
    };

    let mut order: Vec<usize> = (0..n_samples).collect();
    match random_state {
        Some(seed) => order.shuffle(&mut StdRng::seed_from_u64(seed)),
        None => order.shuffle(&mut thread_rng()),
    }

    let (test_rows, train_rows) = order.split_at(n_test);

    // select copies the chosen rows, keeping each x row aligned with its y row
    let take = |rows: &[usize]| (x.select(Axis(0), rows), y.select(Axis(0), rows));
    let (x_train, y_train) = take(train_rows);
    let (x_test, y_test) = take(test_rows);

    Ok((x_train, x_test, y_train, y_test))
}
