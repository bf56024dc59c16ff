use serde::{Serialize, Deserialize};

/// Per-epoch training statistics emitted by `train_network` when a progress
/// channel is configured in `TrainConfig`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Full-dataset cost after this epoch's parameter update.
    pub cost: f32,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}
