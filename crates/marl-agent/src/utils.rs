//! Step-indexed parameter schedules (learning rate, discount, exploration)

use std::fmt;

/// Trait for schedules: a parameter as a function of the step index
pub trait Schedule: Send + Sync {
    /// Get value at step t
    fn value(&self, t: usize) -> f64;
}

impl<F> Schedule for F
where
    F: Fn(usize) -> f64 + Send + Sync,
{
    fn value(&self, t: usize) -> f64 {
        self(t)
    }
}

/// Owned, type-erased schedule as stored by learners
pub type BoxedSchedule = Box<dyn Schedule>;

impl fmt::Debug for dyn Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Schedule(t=0 -> {})", self.value(0))
    }
}

/// Constant schedule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantSchedule {
    /// Constant value
    pub value: f64,
}

impl ConstantSchedule {
    /// Create a new constant schedule
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl Schedule for ConstantSchedule {
    fn value(&self, _t: usize) -> f64 {
        self.value
    }
}

/// Linear schedule that decays from start to end over steps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearSchedule {
    /// Starting value
    pub start: f64,
    /// Ending value
    pub end: f64,
    /// Number of steps for decay
    pub steps: usize,
}

impl LinearSchedule {
    /// Create a new linear schedule
    #[must_use]
    pub fn new(start: f64, end: f64, steps: usize) -> Self {
        Self { start, end, steps }
    }
}

impl Schedule for LinearSchedule {
    #[allow(clippy::cast_precision_loss)]
    fn value(&self, t: usize) -> f64 {
        if t >= self.steps {
            self.end
        } else {
            let progress = t as f64 / self.steps as f64;
            self.start + (self.end - self.start) * progress
        }
    }
}

/// Exponential decay schedule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialSchedule {
    /// Starting value
    pub start: f64,
    /// Minimum value
    pub min_value: f64,
    /// Decay rate
    pub decay_rate: f64,
}

impl ExponentialSchedule {
    /// Create a new exponential schedule
    #[must_use]
    pub fn new(start: f64, min_value: f64, decay_rate: f64) -> Self {
        Self {
            start,
            min_value,
            decay_rate,
        }
    }
}

impl Schedule for ExponentialSchedule {
    #[allow(clippy::cast_precision_loss)]
    fn value(&self, t: usize) -> f64 {
        let value = self.start * self.decay_rate.powf(t as f64);
        value.max(self.min_value)
    }
}

/// Box any schedule
pub fn boxed(schedule: impl Schedule + 'static) -> BoxedSchedule {
    Box::new(schedule)
}

/// Evaluate a schedule at an optional step; a missing step reads step 0
pub(crate) fn at(schedule: &dyn Schedule, step: Option<usize>) -> f64 {
    schedule.value(step.unwrap_or(0))
}
