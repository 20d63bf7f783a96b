//! Temporal-difference update rules
//!
//! Both rules share the Q-learning target `r + γ(t) · max_a' Q(s', a')` and
//! differ only in the step size applied to the TD error δ.

use marl_core::{Action, Reward, Result, State, ValueTable};

use crate::utils::{at, BoxedSchedule, Schedule};

/// Step-size rule for a TD error at step `t`
pub trait UpdateRule: Send + Sync {
    /// Step size to apply to `td_error`
    fn step_size(&self, td_error: f64, step: Option<usize>) -> f64;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

/// Standard Q-learning: `Q ← Q + α(t) · δ`
pub struct Standard {
    learning_rate: BoxedSchedule,
}

impl Standard {
    /// Create the standard rule from a learning-rate schedule
    pub fn new(learning_rate: impl Schedule + 'static) -> Self {
        Self::from_boxed(Box::new(learning_rate))
    }

    /// Create the standard rule from an already boxed schedule
    #[must_use]
    pub fn from_boxed(learning_rate: BoxedSchedule) -> Self {
        Self { learning_rate }
    }
}

impl UpdateRule for Standard {
    fn step_size(&self, _td_error: f64, step: Option<usize>) -> f64 {
        at(self.learning_rate.as_ref(), step)
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}

impl std::fmt::Debug for Standard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Standard")
            .field("learning_rate", &self.learning_rate)
            .finish()
    }
}

/// Hysteretic Q-learning.
///
/// Positive TD errors use the increase rate α(t), negative ones the (usually
/// smaller) decrease rate β(t). Independent learners in a cooperative game use
/// the asymmetry to stay optimistic about joint actions that a teammate's
/// exploration made look bad.
pub struct Hysteretic {
    increase_rate: BoxedSchedule,
    decrease_rate: BoxedSchedule,
}

impl Hysteretic {
    /// Create the hysteretic rule from increase- and decrease-rate schedules
    pub fn new(
        increase_rate: impl Schedule + 'static,
        decrease_rate: impl Schedule + 'static,
    ) -> Self {
        Self::from_boxed(Box::new(increase_rate), Box::new(decrease_rate))
    }

    /// Create the hysteretic rule from already boxed schedules
    #[must_use]
    pub fn from_boxed(increase_rate: BoxedSchedule, decrease_rate: BoxedSchedule) -> Self {
        Self {
            increase_rate,
            decrease_rate,
        }
    }
}

impl UpdateRule for Hysteretic {
    fn step_size(&self, td_error: f64, step: Option<usize>) -> f64 {
        if td_error >= 0.0 {
            at(self.increase_rate.as_ref(), step)
        } else {
            at(self.decrease_rate.as_ref(), step)
        }
    }

    fn name(&self) -> &'static str {
        "hysteretic"
    }
}

impl std::fmt::Debug for Hysteretic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hysteretic")
            .field("increase_rate", &self.increase_rate)
            .field("decrease_rate", &self.decrease_rate)
            .finish()
    }
}

/// One observed transition `(s, a, s', r)`
#[derive(Debug, Clone, Copy)]
pub struct Transition<'a, S, A> {
    /// State the action was taken in
    pub state: &'a S,
    /// Action taken
    pub action: &'a A,
    /// State reached
    pub next_state: &'a S,
    /// Reward received
    pub reward: Reward,
}

/// Record of one applied update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TdUpdate {
    /// Q(s, a) before the update
    pub previous: f64,
    /// `r + γ · max_a' Q(s', a')`
    pub target: f64,
    /// `target - previous`
    pub td_error: f64,
    /// Step size the rule chose
    pub step_size: f64,
    /// Q(s, a) after the update
    pub updated: f64,
}

/// Apply one TD update to `table` in place.
///
/// An `s'` missing from the table is a hard error; it is never bootstrapped
/// from a default.
pub fn td_update<S: State, A: Action>(
    table: &mut ValueTable<S, A>,
    rule: &dyn UpdateRule,
    discount: &dyn Schedule,
    transition: Transition<'_, S, A>,
    step: Option<usize>,
) -> Result<TdUpdate> {
    let previous = table.get(transition.state, transition.action)?;
    let bootstrap = table.max_over_actions(transition.next_state)?;
    let target = transition.reward.value() + at(discount, step) * bootstrap;
    let td_error = target - previous;
    let step_size = rule.step_size(td_error, step);
    let updated = previous + step_size * td_error;
    table.set(transition.state, transition.action, updated)?;

    Ok(TdUpdate {
        previous,
        target,
        td_error,
        step_size,
        updated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ConstantSchedule;
    use crate::testing::{ChainEnv, Move};
    use approx::assert_relative_eq;
    use marl_core::MarlError;

    fn table() -> ValueTable<u8, Move> {
        ValueTable::from_environment(&ChainEnv::default()).unwrap()
    }

    fn transition<'a>(s: &'a u8, a: &'a Move, next: &'a u8, r: f64) -> Transition<'a, u8, Move> {
        Transition {
            state: s,
            action: a,
            next_state: next,
            reward: Reward::new(r),
        }
    }

    #[test]
    fn test_standard_update_from_zero() {
        let mut q = table();
        let rule = Standard::new(ConstantSchedule::new(0.1));

        let update = td_update(
            &mut q,
            &rule,
            &ConstantSchedule::new(0.9),
            transition(&0, &Move::Forward, &1, 10.0),
            Some(0),
        )
        .unwrap();

        assert_relative_eq!(update.target, 10.0);
        assert_relative_eq!(update.updated, 1.0);
        assert_relative_eq!(q.get(&0, &Move::Forward).unwrap(), 1.0);
    }

    #[test]
    fn test_standard_update_bootstraps_from_next_state() {
        let mut q = table();
        q.set(&1, &Move::Stay, 4.0).unwrap();
        q.set(&1, &Move::Forward, 2.0).unwrap();
        let rule = Standard::new(ConstantSchedule::new(0.5));

        let update = td_update(
            &mut q,
            &rule,
            &ConstantSchedule::new(0.5),
            transition(&0, &Move::Forward, &1, 1.0),
            None,
        )
        .unwrap();

        // target = 1 + 0.5 * 4
        assert_relative_eq!(update.target, 3.0);
        assert_relative_eq!(update.updated, 1.5);
    }

    #[test]
    fn test_hysteretic_negative_error_uses_decrease_rate() {
        let mut q = table();
        q.set(&0, &Move::Stay, 5.0).unwrap();
        let rule = Hysteretic::new(ConstantSchedule::new(0.5), ConstantSchedule::new(0.01));

        // target = 3 + 0 => delta = -2
        let update = td_update(
            &mut q,
            &rule,
            &ConstantSchedule::new(0.9),
            transition(&0, &Move::Stay, &1, 3.0),
            Some(3),
        )
        .unwrap();

        assert_relative_eq!(update.td_error, -2.0);
        assert_relative_eq!(update.step_size, 0.01);
        assert_relative_eq!(update.updated, 4.98);
        assert_relative_eq!(q.get(&0, &Move::Stay).unwrap(), 4.98);
    }

    #[test]
    fn test_hysteretic_positive_error_uses_increase_rate() {
        let mut q = table();
        let rule = Hysteretic::new(ConstantSchedule::new(0.1), ConstantSchedule::new(0.01));

        let update = td_update(
            &mut q,
            &rule,
            &ConstantSchedule::new(0.9),
            transition(&0, &Move::Forward, &1, 10.0),
            Some(0),
        )
        .unwrap();

        assert_relative_eq!(update.updated, 1.0);
    }

    #[test]
    fn test_zero_error_counts_as_increase() {
        let rule = Hysteretic::new(ConstantSchedule::new(0.3), ConstantSchedule::new(0.01));
        assert_relative_eq!(rule.step_size(0.0, None), 0.3);
        assert_relative_eq!(rule.step_size(-1e-12, None), 0.01);
    }

    #[test]
    fn test_schedules_are_evaluated_at_step() {
        let rule = Standard::new(|t: usize| if t < 10 { 0.5 } else { 0.05 });
        assert_relative_eq!(rule.step_size(1.0, Some(3)), 0.5);
        assert_relative_eq!(rule.step_size(1.0, Some(10)), 0.05);
        assert_relative_eq!(rule.step_size(1.0, None), 0.5);
    }

    #[test]
    fn test_unknown_next_state_propagates() {
        let mut q = table();
        let rule = Standard::new(ConstantSchedule::new(0.1));

        let err = td_update(
            &mut q,
            &rule,
            &ConstantSchedule::new(0.9),
            transition(&0, &Move::Forward, &42, 1.0),
            None,
        )
        .unwrap_err();

        assert!(matches!(err, MarlError::UnknownState { .. }));
        assert_relative_eq!(q.get(&0, &Move::Forward).unwrap(), 0.0);
    }
}
