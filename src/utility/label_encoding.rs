use super::*;

/// One-hot encodes an array of class indices.
///
/// Row `i` of the result is all zeros except for a 1.0 in column
/// `labels[i]`. The output is `f64` so it can be fed straight into the
/// network as a target matrix.
///
/// # Parameters
///
/// - `labels` - Class index per sample
/// - `num_classes` - Width of the encoding; `None` infers `max(labels) + 1`
///
/// # Returns
///
/// * `Array2<f64>` - One-hot matrix, shape (n_samples, num_classes)
///
/// # Panics
///
/// Panics if an explicit `num_classes` cannot hold the largest label.
///
/// # Examples
///
/// ```rust
/// use ndarray::array;
/// use shallownet::utility::to_categorical;
///
/// let one_hot = to_categorical(&array![0, 2, 1], None);
/// assert_eq!(one_hot.shape(), &[3, 3]);
/// assert_eq!(one_hot[[1, 2]], 1.0);
/// ```
pub fn to_categorical(labels: &Array1<usize>, num_classes: Option<usize>) -> Array2<f64> {
    let max_label = labels.iter().copied().max().unwrap_or(0);

    let width = match num_classes {
        Some(n) if n <= max_label => panic!(
            "num_classes ({}) must be greater than the maximum label ({})",
            n, max_label
        ),
        Some(n) => n,
        None => max_label + 1,
    };

    Array2::from_shape_fn((labels.len(), width), |(i, j)| {
        if labels[i] == j { 1.0 } else { 0.0 }
    })
}

/// One-hot encodes arbitrary hashable labels, returning the index mapping
/// alongside the matrix.
///
/// Class indices are handed out in order of first appearance, so for a
/// dataset stored grouped by class (like the bundled Iris data) the mapping
/// is stable across runs. Use the returned map to translate predicted
/// indices back to the original labels.
///
/// # Parameters
///
/// - `labels` - Label per sample; any `Clone + Eq + Hash` type works
/// - `num_classes` - Width of the encoding; `None` uses the number of
///   distinct labels
///
/// # Returns
///
/// * `(Array2<f64>, AHashMap<T, usize>)` - The one-hot matrix and the
///   label-to-index mapping that produced it
///
/// # Panics
///
/// Panics if an explicit `num_classes` is smaller than the number of
/// distinct labels.
///
/// # Examples
///
/// ```rust
/// use shallownet::utility::to_categorical_with_mapping;
///
/// let species = vec!["setosa", "versicolor", "setosa", "virginica"];
/// let (one_hot, mapping) = to_categorical_with_mapping(&species, None);
///
/// assert_eq!(one_hot.shape(), &[4, 3]);
/// assert_eq!(mapping["setosa"], 0);
/// assert_eq!(mapping["versicolor"], 1);
/// assert_eq!(mapping["virginica"], 2);
/// ```
pub fn to_categorical_with_mapping<T>(
    labels: &[T],
    num_classes: Option<usize>,
) -> (Array2<f64>, AHashMap<T, usize>)
where
    T: Clone + Eq + std::hash::Hash,
{
    let mut label_to_index = AHashMap::new();
    for label in labels {
        let next_index = label_to_index.len();
        label_to_index.entry(label.clone()).or_insert(next_index);
    }

    let distinct = label_to_index.len();
    let width = match num_classes {
        Some(n) if n < distinct => panic!(
            "num_classes ({}) must be at least the number of unique labels ({})",
            n, distinct
        ),
        Some(n) => n,
        None => distinct,
    };

    let mut categorical = Array2::<f64>::zeros((labels.len(), width));
    for (i, label) in labels.iter().enumerate() {
        categorical[[i, label_to_index[label]]] = 1.0;
    }

    (categorical, label_to_index)
}

/// Collapses a one-hot (or probability) matrix back to class indices.
///
/// Each row maps to the column index of its largest value, so this inverts
/// `to_categorical` and also turns softmax output into predicted classes.
/// Ties resolve to the lowest index.
///
/// # Parameters
///
/// * `categorical` - Matrix with one sample per row
///
/// # Returns
///
/// * `Array1<usize>` - Argmax of each row
///
/// # Examples
///
/// ```rust
/// use ndarray::array;
/// use shallownet::utility::to_sparse_categorical;
///
/// let probabilities = array![[0.1, 0.7, 0.2], [0.9, 0.05, 0.05]];
/// assert_eq!(to_sparse_categorical(&probabilities), array![1, 0]);
/// ```
pub fn to_sparse_categorical(categorical: &Array2<f64>) -> Array1<usize> {
    categorical
        .rows()
        .into_iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .fold((0_usize, f64::NEG_INFINITY), |best, (j, &value)| {
                    if value > best.1 { (j, value) } else { best }
                })
                .0
        })
        .collect()
}
