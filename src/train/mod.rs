pub mod trainer;
pub mod epoch_stats;
pub mod train_config;
pub mod loop_fn;

pub use trainer::train_epoch;
pub use epoch_stats::{EpochStats, TrainReport};
pub use train_config::TrainConfig;
pub use loop_fn::{train_loop, train_network};
