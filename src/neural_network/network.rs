use super::activation::{relu, relu_derivative, softmax};
use super::loss::categorical_cross_entropy;
use crate::ModelError;
use indicatif::{ProgressBar, ProgressStyle};
use ndarray::{Array, Array1, Array2, ArrayView2, Axis};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;
use plotly::common::Mode;
use plotly::{Plot, Scatter};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;

/// Epoch interval between printed loss waypoints during training, also used
/// as the stride when subsampling the loss history for plotting.
const REPORT_INTERVAL: u32 = 100;

/// Intermediate values produced by a single forward pass.
///
/// `forward` returns this bundle and `backward` consumes it, so the
/// activations used for gradient computation are always the ones produced by
/// the matching forward pass. The network itself caches nothing between
/// calls.
///
/// # Fields
///
/// - `hidden_preactivation` - Hidden layer values before ReLU, shape (batch_size, hidden_size)
/// - `hidden_activation` - Hidden layer values after ReLU, shape (batch_size, hidden_size)
/// - `output_preactivation` - Output layer values before softmax, shape (batch_size, output_size)
/// - `output_probabilities` - Softmax output, shape (batch_size, output_size), each row summing to 1
pub struct ForwardPass {
    pub hidden_preactivation: Array2<f64>,
    pub hidden_activation: Array2<f64>,
    pub output_preactivation: Array2<f64>,
    pub output_probabilities: Array2<f64>,
}

/// Parameter gradients produced by a single backward pass.
///
/// Each field is shaped exactly like the parameter it belongs to and is
/// already averaged over the batch, so `update_parameters` only scales by the
/// learning rate.
///
/// # Fields
///
/// - `grad_weights_input_hidden` - Gradient for the input-to-hidden weights, shape (input_size, hidden_size)
/// - `grad_bias_hidden` - Gradient for the hidden bias, shape (1, hidden_size)
/// - `grad_weights_hidden_output` - Gradient for the hidden-to-output weights, shape (hidden_size, output_size)
/// - `grad_bias_output` - Gradient for the output bias, shape (1, output_size)
pub struct Gradients {
    pub grad_weights_input_hidden: Array2<f64>,
    pub grad_bias_hidden: Array2<f64>,
    pub grad_weights_hidden_output: Array2<f64>,
    pub grad_bias_output: Array2<f64>,
}

/// Borrowed view of all trainable parameters of a network
///
/// # Fields
///
/// - `weights_input_hidden` - Input-to-hidden weight matrix, shape (input_size, hidden_size)
/// - `bias_hidden` - Hidden bias, shape (1, hidden_size)
/// - `weights_hidden_output` - Hidden-to-output weight matrix, shape (hidden_size, output_size)
/// - `bias_output` - Output bias, shape (1, output_size)
pub struct NetworkWeights<'a> {
    pub weights_input_hidden: &'a Array2<f64>,
    pub bias_hidden: &'a Array2<f64>,
    pub weights_hidden_output: &'a Array2<f64>,
    pub bias_output: &'a Array2<f64>,
}

/// A feedforward neural network with one ReLU hidden layer and a softmax
/// output layer, trained by full-batch gradient descent.
///
/// The topology is fixed at construction: input -> hidden (ReLU) -> output
/// (softmax), with categorical cross-entropy as the training loss. Every
/// training step processes the whole dataset as a single batch. This is the
/// classic from-first-principles classifier: all passes are explicit matrix
/// expressions with no autograd and no framework underneath.
///
/// # Fields
///
/// - `input_size` - Features expected per sample
/// - `hidden_size` - Number of hidden units
/// - `output_size` - Number of output classes
/// - `weights_input_hidden` - Input-to-hidden weight matrix, shape (input_size, hidden_size)
/// - `bias_hidden` - Hidden bias, shape (1, hidden_size), initialized to zeros
/// - `weights_hidden_output` - Hidden-to-output weight matrix, shape (hidden_size, output_size)
/// - `bias_output` - Output bias, shape (1, output_size), initialized to zeros
/// - `learning_rate` - Step size for gradient descent, fixed at construction
/// - `loss_history` - Loss recorded once per training epoch, in order
///
/// # Example
/// ```rust
/// use ndarray::array;
/// use shallownet::prelude::*;
///
/// // Four samples with two features each, two classes one-hot encoded
/// let x = array![
///     [0.1, 0.9],
///     [0.2, 0.8],
///     [0.9, 0.1],
///     [0.8, 0.2],
/// ];
/// let y = array![
///     [1.0, 0.0],
///     [1.0, 0.0],
///     [0.0, 1.0],
///     [0.0, 1.0],
/// ];
///
/// // 2 input features, 8 hidden units, 2 classes
/// let mut model = NeuralNetwork::new(2, 8, 2, Some(0.5), Some(42)).unwrap();
///
/// model.fit(x.view(), y.view(), 300).unwrap();
///
/// // Predict class indices for the training data
/// let predictions = model.predict(x.view()).unwrap();
/// assert_eq!(predictions.len(), 4);
///
/// // One loss entry was recorded per epoch
/// assert_eq!(model.get_loss_history().len(), 300);
/// ```
pub struct NeuralNetwork {
    /// Features expected per sample
    input_size: usize,
    /// Number of hidden units
    hidden_size: usize,
    /// Number of output classes
    output_size: usize,
    /// Input-to-hidden weight matrix, shape (input_size, hidden_size)
    weights_input_hidden: Array2<f64>,
    /// Hidden bias, shape (1, hidden_size)
    bias_hidden: Array2<f64>,
    /// Hidden-to-output weight matrix, shape (hidden_size, output_size)
    weights_hidden_output: Array2<f64>,
    /// Output bias, shape (1, output_size)
    bias_output: Array2<f64>,
    /// Step size for gradient descent
    learning_rate: f64,
    /// Loss recorded once per training epoch
    loss_history: Vec<f64>,
}

impl NeuralNetwork {
    /// Creates a new network with randomly initialized weights and zero biases.
    ///
    /// Weights are drawn uniformly from [0, 0.01) so that hidden-unit
    /// symmetry is broken while every ReLU unit starts active on
    /// non-negative inputs; biases start at zero.
    ///
    /// # Parameters
    ///
    /// - `input_size` - Features per sample (must be greater than 0)
    /// - `hidden_size` - Number of hidden units (must be greater than 0)
    /// - `output_size` - Number of output classes (must be greater than 0)
    /// - `learning_rate` - Step size for gradient descent; `None` uses 0.01
    /// - `random_state` - Optional seed for weight initialization to ensure reproducibility
    ///
    /// # Returns
    ///
    /// - `Result<Self, ModelError>` - A new network instance if the parameters are valid
    ///
    /// # Errors
    ///
    /// - `ModelError::InputValidationError` - If any layer size is 0, or the learning rate is non-positive or non-finite
    ///
    /// # Examples
    /// ```rust
    /// use shallownet::neural_network::NeuralNetwork;
    ///
    /// let model = NeuralNetwork::new(4, 20, 3, None, Some(7)).unwrap();
    /// assert_eq!(model.get_input_size(), 4);
    /// assert_eq!(model.get_hidden_size(), 20);
    /// assert_eq!(model.get_output_size(), 3);
    /// assert_eq!(model.get_learning_rate(), 0.01);
    /// ```
    pub fn new(
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        learning_rate: Option<f64>,
        random_state: Option<u64>,
    ) -> Result<Self, ModelError> {
        // Input validation
        for (name, size) in [
            ("input_size", input_size),
            ("hidden_size", hidden_size),
            ("output_size", output_size),
        ] {
            if size == 0 {
                return Err(ModelError::InputValidationError(format!(
                    "{} must be greater than 0",
                    name
                )));
            }
        }

        let learning_rate = learning_rate.unwrap_or(0.01);
        if !(learning_rate > 0.0 && learning_rate.is_finite()) {
            return Err(ModelError::InputValidationError(format!(
                "learning_rate must be positive and finite, got {}",
                learning_rate
            )));
        }

        let mut rng = match random_state {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let weights_input_hidden =
            Array::random_using((input_size, hidden_size), Uniform::new(0.0, 0.01), &mut rng);
        let weights_hidden_output =
            Array::random_using((hidden_size, output_size), Uniform::new(0.0, 0.01), &mut rng);

        Ok(Self {
            input_size,
            hidden_size,
            output_size,
            weights_input_hidden,
            bias_hidden: Array2::zeros((1, hidden_size)),
            weights_hidden_output,
            bias_output: Array2::zeros((1, output_size)),
            learning_rate,
            loss_history: Vec::new(),
        })
    }

    // Getters
    get_field!(get_input_size, input_size, usize);
    get_field!(get_hidden_size, hidden_size, usize);
    get_field!(get_output_size, output_size, usize);
    get_field!(get_learning_rate, learning_rate, f64);
    get_field_as_ref!(get_loss_history, loss_history, &Vec<f64>);

    /// Returns borrowed views of all trainable parameters.
    ///
    /// # Returns
    ///
    /// * `NetworkWeights` - References to the two weight matrices and two bias rows
    pub fn get_weights(&self) -> NetworkWeights<'_> {
        NetworkWeights {
            weights_input_hidden: &self.weights_input_hidden,
            bias_hidden: &self.bias_hidden,
            weights_hidden_output: &self.weights_hidden_output,
            bias_output: &self.bias_output,
        }
    }

    /// Validates a feature matrix against the network's input width
    fn validate_features(&self, x: &ArrayView2<f64>) -> Result<(), ModelError> {
        if x.is_empty() {
            return Err(ModelError::InputValidationError(
                "Input matrix cannot be empty".to_string(),
            ));
        }

        if x.ncols() != self.input_size {
            return Err(ModelError::InputValidationError(format!(
                "Feature count mismatch: network expects {} features, input has {} columns",
                self.input_size,
                x.ncols()
            )));
        }

        Ok(())
    }

    /// Validates a feature matrix and its one-hot label matrix together
    fn validate_training_inputs(
        &self,
        x: &ArrayView2<f64>,
        y: &ArrayView2<f64>,
    ) -> Result<(), ModelError> {
        self.validate_features(x)?;

        if y.is_empty() {
            return Err(ModelError::InputValidationError(
                "Target matrix cannot be empty".to_string(),
            ));
        }

        if x.nrows() != y.nrows() {
            return Err(ModelError::InputValidationError(format!(
                "Batch size mismatch: input has {} samples, target has {} samples",
                x.nrows(),
                y.nrows()
            )));
        }

        if y.ncols() != self.output_size {
            return Err(ModelError::InputValidationError(format!(
                "Class count mismatch: network expects {} classes, target has {} columns",
                self.output_size,
                y.ncols()
            )));
        }

        Ok(())
    }

    /// Runs the forward pass for a batch of samples.
    ///
    /// Computes hidden pre-activations, applies ReLU, computes output
    /// pre-activations, and applies row-wise softmax. All four intermediate
    /// matrices are returned so a subsequent `backward` call can reuse them.
    ///
    /// # Parameters
    ///
    /// * `x` - Feature matrix, shape (batch_size, input_size)
    ///
    /// # Returns
    ///
    /// - `Result<ForwardPass, ModelError>` - The intermediate values of this pass
    ///
    /// # Errors
    ///
    /// - `ModelError::InputValidationError` - If `x` is empty or its column count differs from `input_size`
    pub fn forward(&self, x: ArrayView2<f64>) -> Result<ForwardPass, ModelError> {
        self.validate_features(&x)?;

        let hidden_preactivation = x.dot(&self.weights_input_hidden) + &self.bias_hidden;
        let hidden_activation = relu(&hidden_preactivation);
        let output_preactivation =
            hidden_activation.dot(&self.weights_hidden_output) + &self.bias_output;
        let output_probabilities = softmax(&output_preactivation);

        Ok(ForwardPass {
            hidden_preactivation,
            hidden_activation,
            output_preactivation,
            output_probabilities,
        })
    }

    /// Runs the backward pass, producing batch-averaged gradients for all
    /// four parameters.
    ///
    /// Uses the closed-form softmax/cross-entropy gradient at the output
    /// (`probabilities - y_true`), then backpropagates through the
    /// hidden-to-output weights and the ReLU. The ReLU derivative is taken on
    /// the hidden pre-activations with the value at exactly zero defined as
    /// zero, so units on the kink contribute nothing.
    ///
    /// # Parameters
    ///
    /// - `x` - Feature matrix the forward pass was run on, shape (batch_size, input_size)
    /// - `y_true` - One-hot label matrix, shape (batch_size, output_size)
    /// - `forward` - The bundle returned by `forward` for this same batch
    ///
    /// # Returns
    ///
    /// - `Result<Gradients, ModelError>` - Gradients shaped like the four parameters
    ///
    /// # Errors
    ///
    /// - `ModelError::InputValidationError` - If `x`/`y_true` are empty or their dimensions do not match the network
    /// - `ModelError::ProcessingError` - If `forward` was produced from a different batch or network shape
    pub fn backward(
        &self,
        x: ArrayView2<f64>,
        y_true: ArrayView2<f64>,
        forward: &ForwardPass,
    ) -> Result<Gradients, ModelError> {
        self.validate_training_inputs(&x, &y_true)?;
        self.validate_forward_pass(&x, forward)?;

        let batch_size = x.nrows() as f64;

        // Softmax + cross-entropy collapse to this closed form at the output
        let grad_output_preactivation = &forward.output_probabilities - &y_true;

        let grad_weights_hidden_output = forward
            .hidden_activation
            .t()
            .dot(&grad_output_preactivation)
            / batch_size;
        let grad_bias_output = grad_output_preactivation
            .sum_axis(Axis(0))
            .insert_axis(Axis(0))
            / batch_size;

        let grad_hidden_activation =
            grad_output_preactivation.dot(&self.weights_hidden_output.t());
        let grad_hidden_preactivation =
            grad_hidden_activation * relu_derivative(&forward.hidden_preactivation);

        let grad_weights_input_hidden = x.t().dot(&grad_hidden_preactivation) / batch_size;
        let grad_bias_hidden = grad_hidden_preactivation
            .sum_axis(Axis(0))
            .insert_axis(Axis(0))
            / batch_size;

        Ok(Gradients {
            grad_weights_input_hidden,
            grad_bias_hidden,
            grad_weights_hidden_output,
            grad_bias_output,
        })
    }

    /// Checks that a forward-pass bundle belongs to the given batch and to
    /// this network's topology
    fn validate_forward_pass(
        &self,
        x: &ArrayView2<f64>,
        forward: &ForwardPass,
    ) -> Result<(), ModelError> {
        let batch_size = x.nrows();

        if forward.hidden_preactivation.dim() != (batch_size, self.hidden_size)
            || forward.hidden_activation.dim() != (batch_size, self.hidden_size)
        {
            return Err(ModelError::ProcessingError(format!(
                "Forward pass bundle mismatch: expected hidden shape ({}, {}), got {:?}",
                batch_size,
                self.hidden_size,
                forward.hidden_activation.dim()
            )));
        }

        if forward.output_preactivation.dim() != (batch_size, self.output_size)
            || forward.output_probabilities.dim() != (batch_size, self.output_size)
        {
            return Err(ModelError::ProcessingError(format!(
                "Forward pass bundle mismatch: expected output shape ({}, {}), got {:?}",
                batch_size,
                self.output_size,
                forward.output_probabilities.dim()
            )));
        }

        Ok(())
    }

    /// Applies one gradient descent step in place: `param -= learning_rate * grad`.
    ///
    /// The weight/bias pairs of the two layers are updated in parallel.
    ///
    /// # Parameters
    ///
    /// * `gradients` - Batch-averaged gradients as returned by `backward`
    pub fn update_parameters(&mut self, gradients: &Gradients) {
        let lr = self.learning_rate;
        let Self {
            weights_input_hidden,
            bias_hidden,
            weights_hidden_output,
            bias_output,
            ..
        } = self;

        rayon::join(
            || {
                descend(
                    weights_input_hidden.as_slice_mut().unwrap(),
                    gradients.grad_weights_input_hidden.as_slice().unwrap(),
                    lr,
                );
                descend(
                    bias_hidden.as_slice_mut().unwrap(),
                    gradients.grad_bias_hidden.as_slice().unwrap(),
                    lr,
                );
            },
            || {
                descend(
                    weights_hidden_output.as_slice_mut().unwrap(),
                    gradients.grad_weights_hidden_output.as_slice().unwrap(),
                    lr,
                );
                descend(
                    bias_output.as_slice_mut().unwrap(),
                    gradients.grad_bias_output.as_slice().unwrap(),
                    lr,
                );
            },
        );
    }

    /// Trains the network on the provided data with full-batch gradient
    /// descent.
    ///
    /// Runs exactly `epochs` iterations with no early stopping. Each epoch
    /// performs one forward pass over the whole dataset, records the loss in
    /// the loss history, runs the backward pass, and applies one parameter
    /// update. The current loss is shown on a progress bar and a waypoint
    /// line is printed every 100th epoch.
    ///
    /// # Parameters
    ///
    /// - `x` - Feature matrix, shape (batch_size, input_size)
    /// - `y` - One-hot label matrix, shape (batch_size, output_size)
    /// - `epochs` - Full-batch training passes to run
    ///
    /// # Returns
    ///
    /// - `Result<&mut Self, ModelError>` - Mutable reference to self for method chaining
    ///
    /// # Errors
    ///
    /// - `ModelError::InputValidationError` - If `x`/`y` are empty or their dimensions do not match the network
    pub fn fit(
        &mut self,
        x: ArrayView2<f64>,
        y: ArrayView2<f64>,
        epochs: u32,
    ) -> Result<&mut Self, ModelError> {
        // Validate once up front; every epoch reuses the same views
        self.validate_training_inputs(&x, &y)?;

        let n_samples = x.nrows();

        // One tick per epoch
        let progress_bar = ProgressBar::new(epochs as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} | Loss: {msg}")
                .expect("Failed to set progress bar template")
                .progress_chars("█▓░"),
        );

        for epoch in 0..epochs {
            // Full-batch step: one forward/backward pass over all samples
            let forward = self.forward(x)?;
            let loss_value = categorical_cross_entropy(&y, &forward.output_probabilities);
            self.loss_history.push(loss_value);

            let gradients = self.backward(x, y, &forward)?;
            self.update_parameters(&gradients);

            if epoch % REPORT_INTERVAL == 0 {
                progress_bar.println(format!("Epoch {}: loss = {:.6}", epoch, loss_value));
            }

            progress_bar.set_message(format!("{:.6}", loss_value));
            progress_bar.inc(1);
        }

        progress_bar.finish_with_message("Training completed");

        println!(
            "\nNeural network training completed: {} samples, {} epochs",
            n_samples, epochs
        );

        Ok(self)
    }

    /// Predicts class indices for the input data.
    ///
    /// Only performs a forward pass; the network is not modified, so
    /// repeated calls on the same input return the same result. Ties in the
    /// output probabilities resolve to the lowest class index.
    ///
    /// # Parameters
    ///
    /// * `x` - Feature matrix, shape (batch_size, input_size)
    ///
    /// # Returns
    ///
    /// - `Result<Array1<usize>, ModelError>` - Predicted class index per sample
    ///
    /// # Errors
    ///
    /// - `ModelError::InputValidationError` - If `x` is empty or its column count differs from `input_size`
    ///
    /// # Examples
    /// ```rust
    /// use ndarray::array;
    /// use shallownet::neural_network::NeuralNetwork;
    ///
    /// let model = NeuralNetwork::new(2, 4, 3, None, Some(0)).unwrap();
    /// let x = array![[0.5, 1.0], [1.0, 0.5]];
    ///
    /// // An untrained network already predicts, there is no fitted-state gate
    /// let predictions = model.predict(x.view()).unwrap();
    /// assert_eq!(predictions.len(), 2);
    /// assert!(predictions.iter().all(|&class| class < 3));
    /// ```
    pub fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<usize>, ModelError> {
        let forward = self.forward(x)?;

        let predictions = forward
            .output_probabilities
            .axis_iter(Axis(0))
            .map(|row| {
                let mut max_idx = 0;
                let mut max_val = row[0];
                for (idx, &val) in row.iter().enumerate() {
                    if val > max_val {
                        max_val = val;
                        max_idx = idx;
                    }
                }
                max_idx
            })
            .collect::<Array1<usize>>();

        Ok(predictions)
    }

    /// Writes the training loss curve to a self-contained HTML file.
    ///
    /// The loss history is subsampled to every 100th epoch, matching the
    /// waypoint cadence of `fit`, and rendered as a line plot. Calling this
    /// before any training produces an empty plot.
    ///
    /// # Parameters
    ///
    /// * `path` - File path the HTML plot is written to (e.g. "loss.html")
    pub fn plot_loss_curve(&self, path: &str) {
        let epochs: Vec<usize> = (0..self.loss_history.len())
            .step_by(REPORT_INTERVAL as usize)
            .collect();
        let losses: Vec<f64> = self
            .loss_history
            .iter()
            .step_by(REPORT_INTERVAL as usize)
            .cloned()
            .collect();

        let mut plot = Plot::new();
        let trace = Scatter::new(epochs, losses)
            .name("training loss")
            .mode(Mode::Lines);
        plot.add_trace(trace);
        plot.write_html(path);
    }
}

/// Moves one parameter slice a step down its gradient in parallel
fn descend(params: &mut [f64], grads: &[f64], lr: f64) {
    params
        .par_iter_mut()
        .zip(grads.par_iter())
        .for_each(|(p, g)| {
            *p -= *g * lr;
        });
}
