use std::sync::mpsc;

use crate::train::epoch_stats::EpochStats;

/// How the trainer estimates the cost gradient each epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradientMethod {
    /// Analytic reverse-mode gradient.
    Backprop,
    /// One-sided finite difference with step `eps`. The correctness oracle;
    /// orders of magnitude slower than backprop.
    FiniteDiff { eps: f32 },
}

/// Configuration for a `train_network` run.
///
/// # Fields
/// - `epochs`      — full-batch gradient steps to take
/// - `method`      — gradient estimator driving each step
/// - `progress_tx` — optional channel sender; one `EpochStats` is sent per
///                   completed epoch. The loop always runs to the requested
///                   epoch count, even if the receiver has been dropped.
pub struct TrainConfig {
    pub epochs: usize,
    pub method: GradientMethod,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
}

impl TrainConfig {
    /// Minimal config with no progress channel.
    pub fn new(epochs: usize, method: GradientMethod) -> Self {
        TrainConfig {
            epochs,
            method,
            progress_tx: None,
        }
    }
}
