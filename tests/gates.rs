// End-to-end training scenarios on the 2-input boolean gates, from a fixed,
// reproducible starting point.

use magnetite_nn::{
    GradientMethod, Network, Sgd, TensorView, TensorWrite, TrainConfig, train_network,
};

static OR_TRAIN: [f32; 12] = [
    0.0, 0.0, 0.0,
    0.0, 1.0, 1.0,
    1.0, 0.0, 1.0,
    1.0, 1.0, 1.0,
];

static XOR_TRAIN: [f32; 12] = [
    0.0, 0.0, 0.0,
    0.0, 1.0, 1.0,
    1.0, 0.0, 1.0,
    1.0, 1.0, 0.0,
];

/// [2, 2, 1] network with a fixed parameter set; every scenario below starts
/// from the same point.
fn fixed_network() -> Network {
    let mut nn = Network::new(&[2, 2, 1]);

    let w1 = [[0.47, 0.12], [0.83, 0.58]];
    let b1 = [0.91, 0.26];
    let w2 = [[0.64], [0.31]];
    let b2 = [0.72];

    for j in 0..2 {
        for k in 0..2 {
            *nn.layers[0].weights.at2_mut(j, k) = w1[j][k];
        }
        *nn.layers[0].biases.at2_mut(0, j) = b1[j];
        *nn.layers[1].weights.at2_mut(j, 0) = w2[j][0];
    }
    *nn.layers[1].biases.at2_mut(0, 0) = b2[0];
    nn
}

#[test]
fn or_gate_converges_with_backprop() {
    let target = TensorView::matrix(&OR_TRAIN, 4, 3, 3, 1);
    let mut nn = fixed_network();

    let cost = train_network(
        &mut nn,
        &target,
        &Sgd::new(0.1),
        &TrainConfig::new(100_000, GradientMethod::Backprop),
    );
    assert!(cost < 0.01, "final cost {cost} not below 0.01");

    assert!(nn.predict(&[0.0, 0.0])[0] < 0.5);
    assert!(nn.predict(&[0.0, 1.0])[0] > 0.5);
    assert!(nn.predict(&[1.0, 0.0])[0] > 0.5);
    assert!(nn.predict(&[1.0, 1.0])[0] > 0.5);
}

#[test]
fn xor_gate_converges_with_backprop() {
    let target = TensorView::matrix(&XOR_TRAIN, 4, 3, 3, 1);
    let mut nn = fixed_network();

    let cost = train_network(
        &mut nn,
        &target,
        &Sgd::new(0.1),
        &TrainConfig::new(1_000_000, GradientMethod::Backprop),
    );
    assert!(cost < 0.05, "final cost {cost} not below 0.05");

    assert!(nn.predict(&[0.0, 0.0])[0] < 0.5);
    assert!(nn.predict(&[0.0, 1.0])[0] > 0.5);
    assert!(nn.predict(&[1.0, 0.0])[0] > 0.5);
    assert!(nn.predict(&[1.0, 1.0])[0] < 0.5);
}

#[test]
fn cost_decreases_every_epoch_early_in_training() {
    let target = TensorView::matrix(&XOR_TRAIN, 4, 3, 3, 1);
    let mut nn = fixed_network();
    let optimizer = Sgd::new(0.1);
    let one_epoch = TrainConfig::new(1, GradientMethod::Backprop);

    let mut prev = nn.cost(&target);
    for epoch in 1..=50 {
        let cost = train_network(&mut nn, &target, &optimizer, &one_epoch);
        assert!(cost <= prev, "cost rose from {prev} to {cost} at epoch {epoch}");
        prev = cost;
    }
}

#[test]
fn cost_strictly_decreases_over_hundred_epoch_windows() {
    let target = TensorView::matrix(&XOR_TRAIN, 4, 3, 3, 1);
    let mut nn = fixed_network();
    let optimizer = Sgd::new(0.1);
    let window = TrainConfig::new(100, GradientMethod::Backprop);

    let mut prev = nn.cost(&target);
    for _ in 0..5 {
        let cost = train_network(&mut nn, &target, &optimizer, &window);
        assert!(cost < prev, "no strict decrease over a 100-epoch window: {prev} -> {cost}");
        prev = cost;
    }
}

#[test]
fn both_estimators_learn_the_same_gate() {
    let target = TensorView::matrix(&OR_TRAIN, 4, 3, 3, 1);

    let mut by_backprop = fixed_network();
    train_network(
        &mut by_backprop,
        &target,
        &Sgd::new(0.1),
        &TrainConfig::new(2_000, GradientMethod::Backprop),
    );

    let mut by_finite_diff = fixed_network();
    train_network(
        &mut by_finite_diff,
        &target,
        &Sgd::new(0.1),
        &TrainConfig::new(2_000, GradientMethod::FiniteDiff { eps: 1e-3 }),
    );

    // Same decision boundary after enough epochs, whichever estimator ran.
    for (x, expected_high) in [
        ([0.0, 0.0], false),
        ([0.0, 1.0], true),
        ([1.0, 0.0], true),
        ([1.0, 1.0], true),
    ] {
        let bp = by_backprop.predict(&x)[0];
        let fd = by_finite_diff.predict(&x)[0];
        assert_eq!(bp > 0.5, expected_high, "backprop misclassifies {x:?}");
        assert_eq!(fd > 0.5, expected_high, "finite diff misclassifies {x:?}");
    }
}
