use ndarray::Data;
use ndarray::prelude::*;

/// Fraction of predictions that exactly match the ground truth.
///
/// Both arrays hold class indices; a sample counts as correct only when the
/// two indices are equal. This is the single evaluation metric of the crate,
/// applied to the output of `NeuralNetwork::predict`.
///
/// # Parameters
///
/// - `predicted` - Class index per sample as produced by the model
/// - `actual` - Ground-truth class index per sample
///
/// # Returns
///
/// - `f64` - Correct predictions divided by total samples, in \[0.0, 1.0\]
///
/// # Panics
///
/// - If the two arrays differ in length
/// - If the arrays are empty (the ratio would be 0/0)
///
/// # Examples
/// ```rust
/// use ndarray::array;
/// use shallownet::metric::accuracy;
///
/// let predicted = array![0usize, 1, 1];
/// let actual = array![0usize, 0, 1];
/// assert!((accuracy(&predicted, &actual) - 0.6666666666666667).abs() < 1e-6);
/// ```
pub fn accuracy<S>(predicted: &ArrayBase<S, Ix1>, actual: &ArrayBase<S, Ix1>) -> f64
where
    S: Data<Elem = usize>,
{
    if predicted.len() != actual.len() {
        panic!(
            "predicted and actual must have matching lengths (got {} and {})",
            predicted.len(),
            actual.len()
        );
    }
    if predicted.is_empty() {
        panic!("cannot compute accuracy on empty arrays");
    }

    let hits = predicted
        .iter()
        .zip(actual.iter())
        .filter(|(p, a)| p == a)
        .count();

    hits as f64 / predicted.len() as f64
}
