//! Learner hyperparameters

use marl_core::{MarlError, Result};
use serde::{Deserialize, Serialize};

use crate::utils::{boxed, BoxedSchedule, ConstantSchedule, ExponentialSchedule};

/// Configuration for tabular learners
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearnerConfig {
    /// Learning rate α (increase rate for hysteretic learners)
    pub learning_rate: f64,
    /// Decrease rate β, used by hysteretic learners for negative TD errors
    pub decrease_rate: f64,
    /// Discount factor γ
    pub discount: f64,
    /// Initial exploration parameter (epsilon or temperature)
    pub exploration: f64,
    /// Per-step multiplicative exploration decay; `None` keeps it constant
    pub exploration_decay: Option<f64>,
    /// Floor for a decaying exploration parameter
    pub min_exploration: f64,
    /// Additional parameters
    #[serde(flatten)]
    pub params: serde_json::Map<String, serde_json::Value>,
}

impl Default for LearnerConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            decrease_rate: 0.01,
            discount: 0.9,
            exploration: 0.1,
            exploration_decay: None,
            min_exploration: 0.0,
            params: serde_json::Map::new(),
        }
    }
}

impl LearnerConfig {
    /// Parse a JSON document, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every rate lies in its admissible range
    pub fn validate(&self) -> Result<()> {
        let unit = |name: &str, value: f64| {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(MarlError::InvalidParameter(format!(
                    "{name} must lie in [0, 1], got {value}"
                )))
            }
        };
        unit("learning_rate", self.learning_rate)?;
        unit("decrease_rate", self.decrease_rate)?;
        unit("discount", self.discount)?;
        if let Some(decay) = self.exploration_decay {
            if !(decay > 0.0 && decay <= 1.0) {
                return Err(MarlError::InvalidParameter(format!(
                    "exploration_decay must lie in (0, 1], got {decay}"
                )));
            }
        }
        if self.exploration.is_nan() || self.exploration < 0.0 {
            return Err(MarlError::InvalidParameter(format!(
                "exploration must be non-negative, got {}",
                self.exploration
            )));
        }
        Ok(())
    }

    /// α schedule
    #[must_use]
    pub fn learning_rate_schedule(&self) -> BoxedSchedule {
        boxed(ConstantSchedule::new(self.learning_rate))
    }

    /// β schedule
    #[must_use]
    pub fn decrease_rate_schedule(&self) -> BoxedSchedule {
        boxed(ConstantSchedule::new(self.decrease_rate))
    }

    /// γ schedule
    #[must_use]
    pub fn discount_schedule(&self) -> BoxedSchedule {
        boxed(ConstantSchedule::new(self.discount))
    }

    /// Exploration schedule, decaying when `exploration_decay` is set
    #[must_use]
    pub fn exploration_schedule(&self) -> BoxedSchedule {
        match self.exploration_decay {
            Some(decay) => boxed(ExponentialSchedule::new(
                self.exploration,
                self.min_exploration,
                decay,
            )),
            None => boxed(ConstantSchedule::new(self.exploration)),
        }
    }
}
