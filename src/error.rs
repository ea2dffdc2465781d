//! Error types for the smartcab learning agent.

use thiserror::Error;

/// A specialized `Result` type for agent operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while configuring or running a [`LearningAgent`](crate::algo::LearningAgent).
///
/// `UnknownState`, `UnknownAction` and `NoActions` signal a broken decision cycle
/// (a table entry read before it was created, or an environment without actions)
/// and should be treated as bugs rather than recovered from.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The Q-table was queried for a state that was never created.
    #[error("state {0} has no entry in the Q-table")]
    UnknownState(String),

    /// The Q-table entry for a state has no value for the requested action.
    #[error("action {action} is not recorded for state {state}")]
    UnknownAction { state: String, action: String },

    /// The environment offered an empty set of valid actions.
    #[error("the environment has no valid actions")]
    NoActions,

    /// A parameter was outside of its allowed interval.
    #[error("invalid value for `{name}`: {value} is not in the interval [{min}, {max}]")]
    OutOfInterval {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A decay schedule was constructed with inconsistent parameters.
    #[error("invalid decay schedule: {0}")]
    InvalidDecay(String),
}
