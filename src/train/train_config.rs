use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::error::Result;
use crate::optim::schedule::ScheduleConfig;

/// Configuration for a `train_network` run.
///
/// # Fields
/// - `epochs`    — full passes over the training data (must be positive)
/// - `schedule`  — learning-rate schedule, evaluated once per epoch
/// - `log_every` — emit a `debug!` line every this many epochs; `0` disables
///
/// Every field has a default, so a JSON file only needs the fields it
/// overrides, e.g. `{"epochs": 5000, "schedule": {"type": "constant", "rate": 0.5}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub epochs: usize,
    pub schedule: ScheduleConfig,
    pub log_every: usize,
}

impl TrainConfig {
    pub fn new(epochs: usize, schedule: ScheduleConfig) -> Self {
        TrainConfig {
            epochs,
            schedule,
            ..TrainConfig::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<TrainConfig> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<TrainConfig> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            epochs: 1024,
            schedule: ScheduleConfig::default(),
            log_every: 100,
        }
    }
}
