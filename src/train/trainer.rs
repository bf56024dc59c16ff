use std::time::Instant;

use crate::math::tensor::TensorRead;
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::{GradientMethod, TrainConfig};

/// Full-batch training: `config.epochs` iterations of {estimate gradient}
/// → {apply update} against every row of `target`. Returns the final
/// full-dataset cost.
///
/// One scratch gradient network is allocated for the whole session and
/// reused (re-zeroed by the estimators) every epoch; it is dropped on every
/// exit path, panics included.
pub fn train_network(
    network: &mut Network,
    target: &impl TensorRead,
    optimizer: &Sgd,
    config: &TrainConfig,
) -> f32 {
    let arch = network.arch().to_vec();
    let mut grad = Network::new(&arch);

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();

        match config.method {
            GradientMethod::Backprop => network.backprop(&mut grad, target),
            GradientMethod::FiniteDiff { eps } => network.finite_diff(&mut grad, target, eps),
        }
        optimizer.step(network, &grad);

        if let Some(ref tx) = config.progress_tx {
            let stats = EpochStats {
                epoch,
                total_epochs: config.epochs,
                cost: network.cost(target),
                elapsed_ms: t_start.elapsed().as_millis() as u64,
            };
            // The epoch loop is unconditional; a dropped receiver never
            // aborts the run.
            let _ = tx.send(stats);
        }
    }

    network.cost(target)
}
