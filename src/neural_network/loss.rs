use ndarray::{ArrayBase, Data, Ix2};

/// Guard added to every probability inside the logarithm so that a literal
/// zero stays finite. Small enough to be invisible at any probability the
/// softmax actually produces.
const LOG_EPSILON: f64 = 1e-9;

/// Calculates the mean categorical cross-entropy loss between one-hot labels
/// and predicted probabilities.
///
/// Computes `-(1/batch) * sum(y_true * ln(y_pred + 1e-9))`, averaging over
/// the batch (rows). With one-hot labels only the log-probability of each
/// sample's true class contributes, so the loss goes to zero as those
/// probabilities go to one.
///
/// # Parameters
///
/// - `y_true` - One-hot encoded labels, shape (batch_size, num_classes)
/// - `y_pred` - Predicted probabilities, shape (batch_size, num_classes),
///   each row summing to 1
///
/// # Returns
///
/// - `f64` - Average cross-entropy loss over the batch
///
/// # Examples
/// ```rust
/// use ndarray::array;
/// use shallownet::neural_network::loss::categorical_cross_entropy;
///
/// let y_true = array![[1.0, 0.0], [0.0, 1.0]];
/// let y_pred = array![[0.8, 0.2], [0.3, 0.7]];
/// let loss = categorical_cross_entropy(&y_true, &y_pred);
/// // -(ln(0.8) + ln(0.7)) / 2 is approximately 0.289909
/// assert!((loss - 0.289909).abs() < 1e-5);
/// ```
#[inline]
pub fn categorical_cross_entropy<S1, S2>(
    y_true: &ArrayBase<S1, Ix2>,
    y_pred: &ArrayBase<S2, Ix2>,
) -> f64
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    let batch_size = y_true.nrows() as f64;

    let total_loss = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&t, &p)| t * (p + LOG_EPSILON).ln())
        .sum::<f64>();

    -total_loss / batch_size
}
