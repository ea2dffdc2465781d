use crate::{env::Environment, error::Result};

/// What a simulator needs from an agent driving in an [`Environment`]
///
/// The simulator calls [`reset`](Agent::reset) at the start of every trial and
/// [`update`](Agent::update) once per tick. It never learns on the agent's behalf.
pub trait Agent<E: Environment> {
    /// Begin a new trial heading for `destination`
    ///
    /// `testing` is set once training is over and evaluation trials are being run.
    fn reset(&mut self, env: &E, destination: E::Location, testing: bool);

    /// Run one decision cycle: sense, act, and learn from the reward
    fn update(&mut self, env: &mut E) -> Result<()>;
}
