use super::raw_data::iris_raw::*;
use ndarray::prelude::*;

/// Parses the embedded Iris CSV into ready-to-use arrays.
///
/// The dataset is Fisher's classic table of 150 flowers, 50 each of
/// Iris-setosa, Iris-versicolor and Iris-virginica, with four measurements
/// per flower (sepal length/width and petal length/width, in centimeters).
/// The text ships inside the crate, so loading never touches the filesystem
/// and cannot fail.
///
/// # Returns
///
/// A `(headers, features, species)` tuple:
/// - `Array1<&'static str>` - the five column names
/// - `Array2<f64>` - the measurements, shape (150, 4), one flower per row
/// - `Array1<&'static str>` - the species label of each row
///
/// # Example
///
/// ```
/// use shallownet::dataset::iris::load_iris;
///
/// let (headers, features, labels) = load_iris();
/// assert_eq!(headers.len(), 5);
/// assert_eq!(features.shape(), &[150, 4]);
/// assert_eq!(labels.len(), 150);
/// ```
pub fn load_iris() -> (Array1<&'static str>, Array2<f64>, Array1<&'static str>) {
    let (header_text, csv_text) = load_iris_raw_data();

    let headers: Array1<&'static str> = header_text.trim().lines().collect();

    let rows: Vec<&str> = csv_text.trim().lines().collect();
    let sample_count = rows.len();

    let mut measurements = Vec::with_capacity(sample_count * 4);
    let mut species = Vec::with_capacity(sample_count);

    for row in rows {
        // Four numeric fields, then the species name
        let (values, label) = row.rsplit_once(',').unwrap();
        measurements.extend(values.split(',').map(|v| v.parse::<f64>().unwrap()));
        species.push(label);
    }

    let features = Array2::from_shape_vec((sample_count, 4), measurements).unwrap();

    (headers, features, Array1::from_vec(species))
}
