use ndarray::{Array2, Axis};
use rayon::prelude::*;

/// Applies the ReLU function element-wise: `max(0, x)`
///
/// # Parameters
///
/// * `z` - Pre-activation tensor
///
/// # Returns
///
/// * `Array2<f64>` - A new tensor with negative entries replaced by zero
///
/// # Examples
/// ```rust
/// use ndarray::array;
/// use shallownet::neural_network::activation::relu;
///
/// let z = array![[-1.0, 0.0], [2.0, -3.0]];
/// let a = relu(&z);
/// assert_eq!(a, array![[0.0, 0.0], [2.0, 0.0]]);
/// ```
pub fn relu(z: &Array2<f64>) -> Array2<f64> {
    let mut result = z.clone();
    result.par_mapv_inplace(|x| if x > 0.0 { x } else { 0.0 });
    result
}

/// Computes the ReLU derivative element-wise: 1 where the input is strictly
/// positive, 0 elsewhere
///
/// The derivative at exactly zero is defined as 0 (the subgradient
/// convention), so units sitting on the kink pass no gradient.
///
/// # Parameters
///
/// * `z` - Pre-activation tensor (the input the ReLU was applied to, not its
///   output)
///
/// # Returns
///
/// * `Array2<f64>` - A tensor of ones and zeros
pub fn relu_derivative(z: &Array2<f64>) -> Array2<f64> {
    z.mapv(|x| if x > 0.0 { 1.0 } else { 0.0 })
}

/// Applies the softmax function to each row of the input tensor
///
/// Each row is shifted by its maximum before exponentiation so that the
/// largest exponent is e^0; the normalized result is unchanged by the shift
/// and cannot overflow.
///
/// # Parameters
///
/// * `z` - Pre-activation tensor, one sample per row
///
/// # Returns
///
/// * `Array2<f64>` - A tensor of the same shape where every row is a
///   probability distribution (non-negative entries summing to 1)
///
/// # Examples
/// ```rust
/// use ndarray::array;
/// use shallownet::neural_network::activation::softmax;
///
/// let z = array![[1.0, 1.0, 1.0]];
/// let p = softmax(&z);
/// assert!((p.row(0).sum() - 1.0).abs() < 1e-12);
/// assert!((p[[0, 0]] - 1.0 / 3.0).abs() < 1e-12);
/// ```
pub fn softmax(z: &Array2<f64>) -> Array2<f64> {
    let mut out = z.clone();

    if out.nrows() > 8 {
        out.axis_iter_mut(Axis(0))
            .into_par_iter()
            .for_each(|mut row| {
                let max_val = row.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                row.mapv_inplace(|x| (x - max_val).exp());
                let sum = row.sum();
                row.mapv_inplace(|x| x / sum);
            });
    } else {
        for mut row in out.outer_iter_mut() {
            let max_val = row.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            row.map_inplace(|x| *x = (*x - max_val).exp());
            let sum = row.sum();
            row.map_inplace(|x| *x /= sum);
        }
    }
    out
}
