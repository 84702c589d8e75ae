//! Labelled examples for the steering head
//!
//! Feature extraction and training happen in an external numeric runtime;
//! this module only keeps the examples in the shape it expects and derives
//! the batch size it should train with.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Examples kept per control
pub const MAX_EXAMPLES_PER_CONTROL: usize = 50;
/// Upper bound on the training batch size
pub const MAX_BATCH_SIZE: usize = 32;

/// Gesture classes the user records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    Up,
    Left,
    Right,
}

impl Control {
    pub const ALL: [Control; 3] = [Control::Up, Control::Left, Control::Right];

    pub fn index(self) -> usize {
        match self {
            Control::Up => 0,
            Control::Left => 1,
            Control::Right => 2,
        }
    }

    /// Regression target: "up" means hold still
    pub fn steering(self) -> f32 {
        match self {
            Control::Up => 0.0,
            Control::Left => -1.0,
            Control::Right => 1.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Control::Up => "up",
            Control::Left => "left",
            Control::Right => "right",
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("feature vector is empty")]
    EmptyFeatures,
    #[error("feature length mismatch: expected {expected}, got {actual}")]
    FeatureLength { expected: usize, actual: usize },
    #[error("{} already has {limit} examples", .control.name())]
    ControlFull { control: Control, limit: usize },
    #[error("add some examples before training")]
    NoExamples,
    #[error("batch size is 0; choose a larger batch size fraction")]
    ZeroBatch,
    #[error("invalid training parameter {name}: {value}")]
    InvalidParam { name: &'static str, value: f32 },
}

/// Row-major feature matrix plus one target per row
#[derive(Debug, Clone, Default)]
pub struct ControllerDataset {
    xs: Vec<f32>,
    ys: Vec<f32>,
    feature_len: Option<usize>,
    counts: [usize; 3],
}

impl ControllerDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store one example. Returns how many examples `control` now has.
    pub fn add_example(&mut self, features: &[f32], control: Control) -> Result<usize, DatasetError> {
        if features.is_empty() {
            return Err(DatasetError::EmptyFeatures);
        }
        if let Some(expected) = self.feature_len {
            if features.len() != expected {
                return Err(DatasetError::FeatureLength {
                    expected,
                    actual: features.len(),
                });
            }
        }
        let count = &mut self.counts[control.index()];
        if *count >= MAX_EXAMPLES_PER_CONTROL {
            return Err(DatasetError::ControlFull {
                control,
                limit: MAX_EXAMPLES_PER_CONTROL,
            });
        }

        *count += 1;
        self.feature_len = Some(features.len());
        self.xs.extend_from_slice(features);
        self.ys.push(control.steering());
        Ok(*count)
    }

    pub fn clear_examples(&mut self) {
        *self = Self::default();
    }

    pub fn len(&self) -> usize {
        self.ys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ys.is_empty()
    }

    pub fn feature_len(&self) -> Option<usize> {
        self.feature_len
    }

    pub fn count(&self, control: Control) -> usize {
        self.counts[control.index()]
    }

    pub fn xs(&self) -> &[f32] {
        &self.xs
    }

    pub fn ys(&self) -> &[f32] {
        &self.ys
    }

    /// `(features, target)` per example, in insertion order
    pub fn rows(&self) -> impl Iterator<Item = (&[f32], f32)> + '_ {
        let width = self.feature_len.unwrap_or(1);
        self.xs.chunks(width).zip(self.ys.iter().copied())
    }

    pub fn plan(&self, params: &TrainingParams) -> Result<TrainingPlan, DatasetError> {
        params.validate()?;
        let feature_len = match self.feature_len {
            Some(len) if !self.is_empty() => len,
            _ => return Err(DatasetError::NoExamples),
        };
        Ok(TrainingPlan {
            examples: self.len(),
            feature_len,
            batch_size: params.batch_size(self.len())?,
            epochs: params.epochs,
            learning_rate: params.learning_rate,
            dense_units: params.dense_units,
        })
    }
}

/// Hyper-parameters chosen in the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingParams {
    pub learning_rate: f32,
    pub batch_size_fraction: f32,
    pub epochs: u32,
    pub dense_units: u32,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            learning_rate: 0.0001,
            batch_size_fraction: 0.4,
            epochs: 20,
            dense_units: 100,
        }
    }
}

impl TrainingParams {
    pub fn validate(&self) -> Result<(), DatasetError> {
        if !(self.learning_rate > 0.0) {
            return Err(DatasetError::InvalidParam {
                name: "learning_rate",
                value: self.learning_rate,
            });
        }
        if !(self.batch_size_fraction > 0.0 && self.batch_size_fraction <= 1.0) {
            return Err(DatasetError::InvalidParam {
                name: "batch_size_fraction",
                value: self.batch_size_fraction,
            });
        }
        if self.epochs == 0 {
            return Err(DatasetError::InvalidParam {
                name: "epochs",
                value: 0.0,
            });
        }
        if self.dense_units == 0 {
            return Err(DatasetError::InvalidParam {
                name: "dense_units",
                value: 0.0,
            });
        }
        Ok(())
    }

    /// A fraction of the dataset per batch, at least one, at most
    /// [`MAX_BATCH_SIZE`]
    pub fn batch_size(&self, examples: usize) -> Result<usize, DatasetError> {
        let size = (examples as f32 * self.batch_size_fraction).floor();
        if !(size > 0.0) {
            return Err(DatasetError::ZeroBatch);
        }
        let size = size as usize;
        if size > MAX_BATCH_SIZE {
            info!(requested = size, max = MAX_BATCH_SIZE, "clamping batch size");
            return Ok(MAX_BATCH_SIZE);
        }
        Ok(size)
    }
}

/// Everything the external trainer needs to fit the steering head
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingPlan {
    pub examples: usize,
    pub feature_len: usize,
    pub batch_size: usize,
    pub epochs: u32,
    pub learning_rate: f32,
    pub dense_units: u32,
}
