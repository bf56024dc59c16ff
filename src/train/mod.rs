pub mod trainer;
pub mod epoch_stats;
pub mod train_config;

pub use trainer::train_network;
pub use epoch_stats::EpochStats;
pub use train_config::{GradientMethod, TrainConfig};
