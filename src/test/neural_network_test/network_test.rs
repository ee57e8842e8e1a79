use super::*;

// ===== Construction and getters =====

#[test]
fn new_with_valid_arguments_test() {
    let model = NeuralNetwork::new(4, 10, 3, Some(0.05), Some(42)).unwrap();

    assert_eq!(model.get_input_size(), 4);
    assert_eq!(model.get_hidden_size(), 10);
    assert_eq!(model.get_output_size(), 3);
    assert_abs_diff_eq!(model.get_learning_rate(), 0.05, epsilon = 1e-12);
    assert!(model.get_loss_history().is_empty());
}

#[test]
fn new_default_learning_rate_test() {
    let model = NeuralNetwork::new(4, 10, 3, None, None).unwrap();

    assert_abs_diff_eq!(model.get_learning_rate(), 0.01, epsilon = 1e-12);
}

#[test]
fn new_zero_layer_size_test() {
    assert!(matches!(
        NeuralNetwork::new(0, 10, 3, None, None),
        Err(ModelError::InputValidationError(_))
    ));
    assert!(matches!(
        NeuralNetwork::new(4, 0, 3, None, None),
        Err(ModelError::InputValidationError(_))
    ));
    assert!(matches!(
        NeuralNetwork::new(4, 10, 0, None, None),
        Err(ModelError::InputValidationError(_))
    ));
}

#[test]
fn new_invalid_learning_rate_test() {
    assert!(NeuralNetwork::new(4, 10, 3, Some(0.0), None).is_err());
    assert!(NeuralNetwork::new(4, 10, 3, Some(-0.1), None).is_err());
    assert!(NeuralNetwork::new(4, 10, 3, Some(f64::NAN), None).is_err());
    assert!(NeuralNetwork::new(4, 10, 3, Some(f64::INFINITY), None).is_err());
}

#[test]
fn new_parameter_shapes_test() {
    let model = NeuralNetwork::new(4, 5, 3, None, Some(0)).unwrap();
    let weights = model.get_weights();

    assert_eq!(weights.weights_input_hidden.dim(), (4, 5));
    assert_eq!(weights.bias_hidden.dim(), (1, 5));
    assert_eq!(weights.weights_hidden_output.dim(), (5, 3));
    assert_eq!(weights.bias_output.dim(), (1, 3));
}

#[test]
fn new_initialization_ranges_test() {
    let model = NeuralNetwork::new(6, 8, 4, None, Some(123)).unwrap();
    let weights = model.get_weights();

    // Weights are drawn from [0, 0.01), biases start at zero
    for w in weights
        .weights_input_hidden
        .iter()
        .chain(weights.weights_hidden_output.iter())
    {
        assert!(
            (0.0..0.01).contains(w),
            "Weight {} falls outside the init range [0, 0.01)",
            w
        );
    }
    assert!(weights.bias_hidden.iter().all(|&b| b == 0.0));
    assert!(weights.bias_output.iter().all(|&b| b == 0.0));
}

#[test]
fn new_seeded_reproducibility_test() {
    let a = NeuralNetwork::new(4, 10, 3, None, Some(42)).unwrap();
    let b = NeuralNetwork::new(4, 10, 3, None, Some(42)).unwrap();
    let c = NeuralNetwork::new(4, 10, 3, None, Some(7)).unwrap();

    // Same seed reproduces the exact same draw, a different seed does not
    assert_eq!(
        a.get_weights().weights_input_hidden,
        b.get_weights().weights_input_hidden
    );
    assert_eq!(
        a.get_weights().weights_hidden_output,
        b.get_weights().weights_hidden_output
    );
    assert_ne!(
        a.get_weights().weights_input_hidden,
        c.get_weights().weights_input_hidden
    );
}

// ===== Forward pass =====

#[test]
fn forward_shapes_test() {
    let model = NeuralNetwork::new(3, 5, 2, None, Some(1)).unwrap();
    let x = array![[0.1, 0.2, 0.3], [1.0, 2.0, 3.0], [0.5, 0.5, 0.5], [2.0, 1.0, 0.0]];

    let pass = model.forward(x.view()).unwrap();

    assert_eq!(pass.hidden_preactivation.dim(), (4, 5));
    assert_eq!(pass.hidden_activation.dim(), (4, 5));
    assert_eq!(pass.output_preactivation.dim(), (4, 2));
    assert_eq!(pass.output_probabilities.dim(), (4, 2));
}

#[test]
fn forward_output_is_probability_distribution_test() {
    let model = NeuralNetwork::new(3, 5, 4, None, Some(1)).unwrap();
    let x = array![[0.1, 0.2, 0.3], [5.0, 1.0, 2.0]];

    let pass = model.forward(x.view()).unwrap();

    for row in pass.output_probabilities.rows() {
        let row_sum: f64 = row.sum();
        assert_abs_diff_eq!(row_sum, 1.0, epsilon = 1e-9);
        for &p in row.iter() {
            assert!(p > 0.0 && p < 1.0);
        }
    }
}

#[test]
fn forward_hidden_activation_is_rectified_test() {
    let model = NeuralNetwork::new(2, 6, 2, None, Some(9)).unwrap();
    let x = array![[-10.0, -20.0], [3.0, 4.0]];

    let pass = model.forward(x.view()).unwrap();

    for (&z, &a) in pass
        .hidden_preactivation
        .iter()
        .zip(pass.hidden_activation.iter())
    {
        if z > 0.0 {
            assert_abs_diff_eq!(a, z, epsilon = 1e-12);
        } else {
            assert_eq!(a, 0.0);
        }
    }
}

#[test]
fn forward_empty_input_test() {
    let model = NeuralNetwork::new(3, 5, 2, None, None).unwrap();
    let x = Array2::<f64>::zeros((0, 3));

    assert!(matches!(
        model.forward(x.view()),
        Err(ModelError::InputValidationError(_))
    ));
}

#[test]
fn forward_feature_mismatch_test() {
    let model = NeuralNetwork::new(3, 5, 2, None, None).unwrap();
    let x = Array2::<f64>::zeros((4, 7));

    assert!(model.forward(x.view()).is_err());
}

#[test]
fn forward_does_not_mutate_network_test() {
    let model = NeuralNetwork::new(3, 5, 2, None, Some(11)).unwrap();
    let w1_before = model.get_weights().weights_input_hidden.clone();
    let x = array![[1.0, 2.0, 3.0]];

    let _ = model.forward(x.view()).unwrap();
    let _ = model.forward(x.view()).unwrap();

    assert_eq!(model.get_weights().weights_input_hidden, &w1_before);
    assert!(model.get_loss_history().is_empty());
}

// ===== Backward pass =====

#[test]
fn backward_gradient_shapes_test() {
    let model = NeuralNetwork::new(3, 5, 2, None, Some(2)).unwrap();
    let x = array![[0.1, 0.2, 0.3], [1.0, 2.0, 3.0]];
    let y = array![[1.0, 0.0], [0.0, 1.0]];

    let pass = model.forward(x.view()).unwrap();
    let gradients = model.backward(x.view(), y.view(), &pass).unwrap();

    assert_eq!(gradients.grad_weights_input_hidden.dim(), (3, 5));
    assert_eq!(gradients.grad_bias_hidden.dim(), (1, 5));
    assert_eq!(gradients.grad_weights_hidden_output.dim(), (5, 2));
    assert_eq!(gradients.grad_bias_output.dim(), (1, 2));
}

#[test]
fn backward_output_gradient_closed_form_test() {
    // For a single sample the output bias gradient is exactly
    // probabilities - one_hot, and the hidden-to-output weight gradient
    // is the outer product of the hidden activation with that residual
    let model = NeuralNetwork::new(2, 3, 2, None, Some(5)).unwrap();
    let x = array![[0.5, 1.5]];
    let y = array![[1.0, 0.0]];

    let pass = model.forward(x.view()).unwrap();
    let gradients = model.backward(x.view(), y.view(), &pass).unwrap();

    for j in 0..2 {
        let residual = pass.output_probabilities[[0, j]] - y[[0, j]];
        assert_relative_eq!(
            gradients.grad_bias_output[[0, j]],
            residual,
            epsilon = 1e-12
        );
        for i in 0..3 {
            assert_relative_eq!(
                gradients.grad_weights_hidden_output[[i, j]],
                pass.hidden_activation[[0, i]] * residual,
                epsilon = 1e-12
            );
        }
    }
}

#[test]
fn backward_zero_input_kills_hidden_gradient_test() {
    // An all-zero batch lands every hidden pre-activation exactly on 0,
    // where the ReLU subgradient is 0, so the hidden-layer gradients must
    // vanish. Both samples carry the same label; with opposite labels the
    // two rows' residuals are exact negatives and every column sum would
    // be 0 regardless of the subgradient convention.
    let model = NeuralNetwork::new(3, 4, 2, None, Some(3)).unwrap();
    let x = Array2::<f64>::zeros((2, 3));
    let y = array![[1.0, 0.0], [1.0, 0.0]];

    let pass = model.forward(x.view()).unwrap();
    let gradients = model.backward(x.view(), y.view(), &pass).unwrap();

    assert!(gradients.grad_bias_hidden.iter().all(|&g| g == 0.0));
    assert!(
        gradients
            .grad_weights_input_hidden
            .iter()
            .all(|&g| g == 0.0)
    );

    // Zero logits soften to [0.5, 0.5] per row, so each sample's output
    // residual is exactly [-0.5, 0.5]
    assert_abs_diff_eq!(gradients.grad_bias_output[[0, 0]], -0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(gradients.grad_bias_output[[0, 1]], 0.5, epsilon = 1e-12);
}

#[test]
fn backward_batch_mismatch_test() {
    let model = NeuralNetwork::new(3, 5, 2, None, None).unwrap();
    let x = array![[0.1, 0.2, 0.3], [1.0, 2.0, 3.0]];
    let y = array![[1.0, 0.0]];

    let pass = model.forward(x.view()).unwrap();

    assert!(matches!(
        model.backward(x.view(), y.view(), &pass),
        Err(ModelError::InputValidationError(_))
    ));
}

#[test]
fn backward_stale_forward_pass_test() {
    // A bundle produced for one batch cannot be replayed against another
    let model = NeuralNetwork::new(2, 3, 2, None, Some(8)).unwrap();
    let x_large = array![[0.1, 0.2], [0.3, 0.4], [0.5, 0.6], [0.7, 0.8]];
    let x_small = array![[0.1, 0.2], [0.3, 0.4]];
    let y_small = array![[1.0, 0.0], [0.0, 1.0]];

    let stale = model.forward(x_large.view()).unwrap();

    assert!(matches!(
        model.backward(x_small.view(), y_small.view(), &stale),
        Err(ModelError::ProcessingError(_))
    ));
}

// ===== Parameter updates =====

#[test]
fn update_parameters_applies_scaled_step_test() {
    let mut model = NeuralNetwork::new(2, 4, 3, Some(0.1), Some(21)).unwrap();
    let w1_before = model.get_weights().weights_input_hidden.clone();
    let w2_before = model.get_weights().weights_hidden_output.clone();

    let gradients = Gradients {
        grad_weights_input_hidden: Array2::ones((2, 4)),
        grad_bias_hidden: Array2::ones((1, 4)),
        grad_weights_hidden_output: Array2::ones((4, 3)),
        grad_bias_output: Array2::ones((1, 3)),
    };
    model.update_parameters(&gradients);

    let weights = model.get_weights();
    for (after, before) in weights.weights_input_hidden.iter().zip(w1_before.iter()) {
        assert_relative_eq!(*after, *before - 0.1, epsilon = 1e-12);
    }
    for (after, before) in weights.weights_hidden_output.iter().zip(w2_before.iter()) {
        assert_relative_eq!(*after, *before - 0.1, epsilon = 1e-12);
    }
    for &b in weights.bias_hidden.iter().chain(weights.bias_output.iter()) {
        assert_abs_diff_eq!(b, -0.1, epsilon = 1e-12);
    }
}

#[test]
fn update_parameters_zero_gradient_is_noop_test() {
    let mut model = NeuralNetwork::new(2, 4, 3, Some(0.5), Some(22)).unwrap();
    let w1_before = model.get_weights().weights_input_hidden.clone();

    let gradients = Gradients {
        grad_weights_input_hidden: Array2::zeros((2, 4)),
        grad_bias_hidden: Array2::zeros((1, 4)),
        grad_weights_hidden_output: Array2::zeros((4, 3)),
        grad_bias_output: Array2::zeros((1, 3)),
    };
    model.update_parameters(&gradients);

    assert_eq!(model.get_weights().weights_input_hidden, &w1_before);
}

// ===== Training =====

#[test]
fn fit_records_one_loss_per_epoch_test() {
    let (x, y) = generate_two_class_data();
    let mut model = NeuralNetwork::new(2, 6, 2, Some(0.1), Some(42)).unwrap();

    model.fit(x.view(), y.view(), 50).unwrap();

    assert_eq!(model.get_loss_history().len(), 50);
    assert!(model.get_loss_history().iter().all(|l| l.is_finite()));
}

#[test]
fn fit_reduces_loss_on_separable_data_test() {
    let (x, y) = generate_two_class_data();
    let mut model = NeuralNetwork::new(2, 8, 2, Some(0.1), Some(42)).unwrap();

    model.fit(x.view(), y.view(), 800).unwrap();

    let history = model.get_loss_history();
    let initial_loss = history[0];
    let final_loss = *history.last().unwrap();
    assert!(
        final_loss < initial_loss,
        "Final loss ({:.6}) should be less than initial loss ({:.6})",
        final_loss,
        initial_loss
    );

    // Two tight clusters this far apart should be fully separated
    let predictions = model.predict(x.view()).unwrap();
    let expected = array![0_usize, 0, 0, 0, 1, 1, 1, 1];
    assert_eq!(predictions, expected);
}

#[test]
fn fit_accumulates_history_across_calls_test() {
    let (x, y) = generate_two_class_data();
    let mut model = NeuralNetwork::new(2, 6, 2, Some(0.1), Some(42)).unwrap();

    model.fit(x.view(), y.view(), 30).unwrap();
    model.fit(x.view(), y.view(), 20).unwrap();

    assert_eq!(model.get_loss_history().len(), 50);
}

#[test]
fn fit_zero_epochs_test() {
    let (x, y) = generate_two_class_data();
    let mut model = NeuralNetwork::new(2, 6, 2, None, Some(42)).unwrap();
    let w1_before = model.get_weights().weights_input_hidden.clone();

    model.fit(x.view(), y.view(), 0).unwrap();

    assert!(model.get_loss_history().is_empty());
    assert_eq!(model.get_weights().weights_input_hidden, &w1_before);
}

#[test]
fn fit_error_handling_test() {
    let mut model = NeuralNetwork::new(2, 6, 2, None, None).unwrap();

    // Empty feature matrix
    let empty_x = Array2::<f64>::zeros((0, 2));
    let empty_y = Array2::<f64>::zeros((0, 2));
    assert!(model.fit(empty_x.view(), empty_y.view(), 10).is_err());

    // Batch size mismatch between features and targets
    let x = array![[0.0, 0.1], [1.0, 1.1], [2.0, 2.1]];
    let y_short = array![[1.0, 0.0], [0.0, 1.0]];
    assert!(model.fit(x.view(), y_short.view(), 10).is_err());

    // Wrong number of target columns
    let y_wide = array![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
    assert!(model.fit(x.view(), y_wide.view(), 10).is_err());

    // A failed fit must not record any loss
    assert!(model.get_loss_history().is_empty());
}

// ===== Prediction =====

#[test]
fn predict_matches_forward_argmax_test() {
    let model = NeuralNetwork::new(3, 5, 4, None, Some(17)).unwrap();
    let x = array![[0.2, 0.4, 0.6], [3.0, 1.0, 2.0], [0.0, 0.0, 5.0]];

    let pass = model.forward(x.view()).unwrap();
    let predictions = model.predict(x.view()).unwrap();

    for (row, &predicted) in pass
        .output_probabilities
        .rows()
        .into_iter()
        .zip(predictions.iter())
    {
        for &p in row.iter() {
            assert!(row[predicted] >= p);
        }
    }
}

#[test]
fn predict_is_idempotent_test() {
    let model = NeuralNetwork::new(4, 6, 3, None, Some(42)).unwrap();
    let x = array![
        [5.1, 3.5, 1.4, 0.2],
        [6.7, 3.1, 4.4, 1.4],
        [6.3, 3.3, 6.0, 2.5]
    ];
    let w1_before = model.get_weights().weights_input_hidden.clone();
    let b1_before = model.get_weights().bias_hidden.clone();

    let first = model.predict(x.view()).unwrap();
    let second = model.predict(x.view()).unwrap();

    assert_eq!(first, second);
    assert_eq!(model.get_weights().weights_input_hidden, &w1_before);
    assert_eq!(model.get_weights().bias_hidden, &b1_before);
}

#[test]
fn predict_feature_mismatch_test() {
    let model = NeuralNetwork::new(4, 6, 3, None, None).unwrap();
    let x = array![[1.0, 2.0]];

    assert!(model.predict(x.view()).is_err());
}

// ===== Plotting =====

#[test]
fn plot_loss_curve_writes_html_test() {
    let (x, y) = generate_two_class_data();
    let mut model = NeuralNetwork::new(2, 6, 2, Some(0.1), Some(42)).unwrap();
    model.fit(x.view(), y.view(), 120).unwrap();

    let path = std::env::temp_dir().join("loss_curve_smoke_test.html");
    model.plot_loss_curve(path.to_str().unwrap());

    let metadata = std::fs::metadata(&path).expect("Plot file should exist");
    assert!(metadata.len() > 0, "Plot file should not be empty");

    let _ = std::fs::remove_file(&path);
}
