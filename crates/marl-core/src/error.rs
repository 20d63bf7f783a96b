//! Error types for the tabular MARL core

use thiserror::Error;

/// Core error type for learning and simulation
#[derive(Error, Debug)]
pub enum MarlError {
    /// A fixed agent was configured with an action outside the declared action space
    #[error("Fixed action {action} is not in the environment's action space")]
    FixedActionOutOfSpace { action: String },

    /// A non-terminal state declared no available actions
    #[error("Non-terminal state {state} has an empty action set")]
    EmptyActionSet { state: String },

    /// State was never enumerated into the value table
    #[error("Unknown state: {state} (state space declared incompletely?)")]
    UnknownState { state: String },

    /// Action was never enumerated for the given state
    #[error("Unknown action {action} at state {state}")]
    UnknownAction { state: String, action: String },

    /// An agent was asked to choose from an empty candidate set
    #[error("Cannot select an action from an empty candidate set")]
    EmptyCandidates,

    /// Joint action length does not match the number of participants
    #[error("Joint action arity mismatch: expected {expected}, got {actual}")]
    JointActionArity { expected: usize, actual: usize },

    /// Invalid configuration parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Environment-related errors
    #[error("Environment error: {0}")]
    Environment(String),

    /// Computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl MarlError {
    /// Lookup failure for a state key
    pub fn unknown_state(state: &impl std::fmt::Debug) -> Self {
        Self::UnknownState {
            state: format!("{state:?}"),
        }
    }

    /// Lookup failure for a (state, action) key
    pub fn unknown_action(state: &impl std::fmt::Debug, action: &impl std::fmt::Debug) -> Self {
        Self::UnknownAction {
            state: format!("{state:?}"),
            action: format!("{action:?}"),
        }
    }

    /// Whether this error signals a setup defect rather than a runtime failure
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::FixedActionOutOfSpace { .. }
                | Self::EmptyActionSet { .. }
                | Self::InvalidParameter(_)
                | Self::JointActionArity { .. }
        )
    }
}

/// Result type alias for MARL operations
pub type Result<T> = std::result::Result<T, MarlError>;
