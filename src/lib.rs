/// Error type shared by every fallible operation in this crate
pub mod error;

pub use error::ModelError;

/// Expands to a by-value getter for a private struct field.
///
/// `NeuralNetwork` exposes several hyperparameters this way instead of
/// hand-writing one accessor per field. Each generated method carries a
/// doc string naming the field it reads.
///
/// # Parameters
///
/// - `$method_name` - Name of the generated method (e.g. get_learning_rate)
/// - `$field_name` - Field the method reads (e.g. learning_rate)
/// - `$return_type` - Type the method returns
macro_rules! get_field {
    ($method_name:ident, $field_name:ident, $return_type:ty) => {
        #[doc = concat!("Returns the current `", stringify!($field_name), "` value.\n\n")]
        #[doc = "# Returns\n\n"]
        #[doc = concat!("* `", stringify!($return_type), "` - Copy of the `", stringify!($field_name), "` field")]
        pub fn $method_name(&self) -> $return_type {
            self.$field_name
        }
    };
}

/// Expands to a getter that exposes a field through `AsRef` conversion.
///
/// Same shape as `get_field!`, but the body calls `.as_ref()` on the field,
/// so a `Vec<f64>` field like the loss history surfaces as `&Vec<f64>`
/// without cloning.
///
/// # Parameters
///
/// - `$method_name` - Name of the generated method
/// - `$field_name` - Field the method borrows from
/// - `$return_type` - Returned reference type
macro_rules! get_field_as_ref {
    ($method_name:ident, $field_name:ident, $return_type:ty) => {
        #[doc = concat!("Returns the current `", stringify!($field_name), "` value without cloning it.\n\n")]
        #[doc = "# Returns\n\n"]
        #[doc = concat!("* `", stringify!($return_type), "` - Borrowed view of the `", stringify!($field_name), "` field")]
        pub fn $method_name(&self) -> $return_type {
            self.$field_name.as_ref()
        }
    };
}

/// Access to the iris dataset for experimentation and the end-to-end examples.
///
/// The dataset ships embedded in the crate, so loading it involves no file or
/// network access and always succeeds.
///
/// # Available Datasets
/// - **iris**: Fisher's 150-flower measurement table; 4 features, 3 species
///
/// # Data Format
/// The loader returns a tuple `(headers, data, target)` where:
/// - `headers`: column names, one per measurement plus the species column
/// - `data`: measurement matrix, one flower per row
/// - `target`: species label of each flower
///
/// # Examples
/// ```rust
/// use shallownet::dataset::iris;
///
/// let (headers, data, species) = iris::load_iris();
/// assert_eq!(data.shape(), &[150, 4]);
/// assert_eq!(species.len(), 150);
/// assert_eq!(headers.len(), 5);
/// ```
pub mod dataset;

/// Evaluation metrics for classification results.
///
/// # Classification Functions
/// - **accuracy**: Proportion of correctly predicted class indices over all samples
///
/// # Examples
/// ```rust
/// use shallownet::metric::accuracy;
/// use ndarray::array;
///
/// let predicted = array![0usize, 1, 2, 1];
/// let actual = array![0usize, 1, 2, 2];
/// let acc = accuracy(&predicted, &actual);
/// assert!((acc - 0.75).abs() < 1e-12);
/// ```
pub mod metric;

/// The feedforward neural network and its building blocks.
///
/// This module implements a fixed two-layer classifier from first principles:
/// one ReLU hidden layer feeding a softmax output layer, trained with
/// full-batch gradient descent against categorical cross-entropy.
///
/// # Core Components
///
/// ## Network
/// - **NeuralNetwork**: The model itself; construction, forward/backward passes,
///   parameter updates, training loop, prediction, and loss-curve plotting
/// - **ForwardPass**: Intermediate activations of one forward pass, consumed by `backward`
/// - **Gradients**: Batch-averaged parameter gradients produced by `backward`
/// - **NetworkWeights**: Borrowed view of the four trainable parameter arrays
///
/// ## Functions
/// - **relu** / **relu_derivative**: Hidden layer activation and its subgradient
/// - **softmax**: Row-wise output activation with max-subtraction stabilization
/// - **categorical_cross_entropy**: Training loss over one-hot labels
///
/// # Examples
/// ```rust
/// use ndarray::array;
/// use shallownet::prelude::*;
///
/// let x = array![[0.0, 1.0], [1.0, 0.0]];
/// let y = array![[1.0, 0.0], [0.0, 1.0]];
///
/// let mut model = NeuralNetwork::new(2, 4, 2, Some(0.1), Some(42)).unwrap();
/// model.fit(x.view(), y.view(), 50).unwrap();
///
/// let predictions = model.predict(x.view()).unwrap();
/// assert_eq!(predictions.len(), 2);
/// ```
pub mod neural_network;

/// One-stop import for the items a typical training script touches.
///
/// Re-exports the network and its data bundles, the loss and activation
/// functions, the label-encoding and dataset-splitting utilities, the
/// accuracy metric, the iris loader, and the error type.
///
/// # Examples
/// ```rust
/// use ndarray::array;
/// use shallownet::prelude::*;
///
/// let one_hot = to_categorical(&array![0, 1, 1], None);
/// assert_eq!(one_hot.shape(), &[3, 2]);
/// ```
pub mod prelude;

/// Data preparation utilities that support the training workflow.
///
/// # Label Encoding
/// - **to_categorical**: One-hot encode class indices
/// - **to_categorical_with_mapping**: One-hot encode arbitrary hashable labels,
///   assigning indices in first-appearance order
/// - **to_sparse_categorical**: Decode one-hot (or probability) rows back to class indices
///
/// # Data Splitting
/// - **train_test_split**: Seeded shuffled split of a feature matrix and its label matrix
///
/// # Examples
/// ```rust
/// use ndarray::array;
/// use shallownet::utility::*;
///
/// let labels = array![0, 1, 2, 1];
/// let one_hot = to_categorical(&labels, None);
/// assert_eq!(one_hot.shape(), &[4, 3]);
///
/// let decoded = to_sparse_categorical(&one_hot);
/// assert_eq!(decoded, labels);
/// ```
pub mod utility;
