use super::*;

#[test]
fn categorical_cross_entropy_known_value_test() {
    // Hand-computed: -(ln(0.8) + ln(0.7)) / 2
    let y_true = array![[1.0, 0.0], [0.0, 1.0]];
    let y_pred = array![[0.8, 0.2], [0.3, 0.7]];

    let loss = categorical_cross_entropy(&y_true, &y_pred);

    assert_relative_eq!(loss, 0.2899092476264711, epsilon = 1e-6);
}

#[test]
fn categorical_cross_entropy_perfect_prediction_test() {
    // A probability of 1 on the true class drives the loss to ~0
    let y_true = array![[1.0, 0.0], [0.0, 1.0]];
    let y_pred = array![[1.0, 0.0], [0.0, 1.0]];

    let loss = categorical_cross_entropy(&y_true, &y_pred);

    assert!(
        loss.abs() < 1e-8,
        "Loss for a perfect prediction should be ~0, got {:.12}",
        loss
    );
}

#[test]
fn categorical_cross_entropy_zero_probability_test() {
    // The epsilon inside the logarithm keeps ln(0) finite
    let y_true = array![[1.0, 0.0]];
    let y_pred = array![[0.0, 1.0]];

    let loss = categorical_cross_entropy(&y_true, &y_pred);

    assert!(loss.is_finite(), "Loss must stay finite at p = 0");
    // -ln(1e-9) = 20.723...
    assert_relative_eq!(loss, 20.72326583694641, epsilon = 1e-6);
}

#[test]
fn categorical_cross_entropy_averages_over_batch_test() {
    // Duplicating every sample leaves the mean loss unchanged
    let y_true_single = array![[0.0, 1.0]];
    let y_pred_single = array![[0.4, 0.6]];
    let y_true_double = array![[0.0, 1.0], [0.0, 1.0]];
    let y_pred_double = array![[0.4, 0.6], [0.4, 0.6]];

    let single = categorical_cross_entropy(&y_true_single, &y_pred_single);
    let double = categorical_cross_entropy(&y_true_double, &y_pred_double);

    assert_relative_eq!(single, double, epsilon = 1e-12);
}

#[test]
fn categorical_cross_entropy_ignores_off_target_probabilities_test() {
    // Only the probability assigned to the true class matters
    let y_true = array![[1.0, 0.0, 0.0]];
    let y_pred_a = array![[0.5, 0.3, 0.2]];
    let y_pred_b = array![[0.5, 0.1, 0.4]];

    let loss_a = categorical_cross_entropy(&y_true, &y_pred_a);
    let loss_b = categorical_cross_entropy(&y_true, &y_pred_b);

    assert_relative_eq!(loss_a, loss_b, epsilon = 1e-12);
}

#[test]
fn categorical_cross_entropy_accepts_views_test() {
    let y_true = array![[1.0, 0.0], [0.0, 1.0]];
    let y_pred = array![[0.8, 0.2], [0.3, 0.7]];

    let from_views = categorical_cross_entropy(&y_true.view(), &y_pred.view());
    let from_owned = categorical_cross_entropy(&y_true, &y_pred);

    assert_relative_eq!(from_views, from_owned, epsilon = 1e-12);
}
