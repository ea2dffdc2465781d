/// The learning agent and its Q-table
pub mod algo;

/// The contract between an agent and the simulator driving it
pub mod agent;

/// Implementations of strategies for time-decaying hyperparameters
pub mod decay;

/// The traffic environment and route planner the agent depends on
pub mod env;

/// Error types
pub mod error;

/// Exploration policies
pub mod exploration;

/// The agent's view of an intersection
pub mod state;

mod util;

pub use agent::Agent;
pub use algo::{LearningAgent, LearningAgentConfig};
pub use error::{Error, Result};
