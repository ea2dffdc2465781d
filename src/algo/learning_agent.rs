use log::{debug, info, trace};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::{
    agent::Agent,
    decay::{Cosine, Decay},
    ensure_interval,
    env::{Action, Direction, Environment, RoutePlanner},
    error::{Error, Result},
    exploration::{Choice, EpsilonGreedy},
    state::State,
};

use super::QTable;

/// Configuration for the [`LearningAgent`]
#[derive(Debug, Clone)]
pub struct LearningAgentConfig<D: Decay> {
    /// Whether the agent keeps a Q-table and learns from rewards
    ///
    /// When `false` the agent drives at random and never touches its table.
    ///
    /// **Default**: `false`
    pub learning: bool,
    /// Learning rate, must be in `[0,1]`
    ///
    /// **Default**: `0.5`
    pub alpha: f64,
    /// Starting epsilon and the schedule it decays along, one step per training trial
    ///
    /// **Default**: epsilon `1.0`, [`Cosine`] decay reaching zero after 10 000 trials
    pub exploration: EpsilonGreedy<D>,
    /// Seed for every random draw the agent makes, or `None` to seed from the OS
    ///
    /// **Default**: `None`
    pub seed: Option<u64>,
}

impl Default for LearningAgentConfig<Cosine> {
    fn default() -> Self {
        Self {
            learning: false,
            alpha: 0.5,
            exploration: EpsilonGreedy::default(),
            seed: None,
        }
    }
}

impl LearningAgentConfig<Cosine> {
    /// Config with the default cosine schedule and the given starting parameters
    pub fn new(learning: bool, epsilon: f64, alpha: f64) -> Result<Self> {
        Ok(Self {
            learning,
            alpha,
            exploration: EpsilonGreedy::new(epsilon, Cosine::default())?,
            seed: None,
        })
    }
}

impl<D: Decay> LearningAgentConfig<D> {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// A smartcab driver that learns which action pays off in each [`State`]
///
/// Each tick the agent builds its state, makes sure the state has a row in the
/// Q-table, picks an action epsilon-greedily (breaking ties at random), and moves the
/// value of that action toward the reward it received:
///
/// Q(s,a) &larr; (1 - &alpha;) Q(s,a) + &alpha; r
///
/// Future rewards are not considered. Each training trial decays epsilon along the
/// configured schedule; the first testing trial sets epsilon and alpha to zero for the
/// rest of the run.
///
/// ### Generics
/// - `P` - The [`RoutePlanner`] that supplies the next waypoint
/// - `D` - The [`Decay`] schedule for epsilon
pub struct LearningAgent<P, D: Decay = Cosine> {
    planner: P,
    q_table: QTable<State, Action>,
    exploration: EpsilonGreedy<D>,
    learning: bool,
    alpha: f64,
    trial: u32,
    testing: bool,
    state: Option<State>,
    next_waypoint: Option<Direction>,
    rng: StdRng,
}

impl<P, D: Decay> LearningAgent<P, D> {
    /// Initialize a new `LearningAgent` that follows `planner`
    ///
    /// **Errors** if `alpha` is not in the interval `[0,1]`
    pub fn new(config: LearningAgentConfig<D>, planner: P) -> Result<Self> {
        let LearningAgentConfig {
            learning,
            alpha,
            exploration,
            seed,
        } = config;
        ensure_interval!(alpha, 0.0, 1.0);

        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Ok(Self {
            planner,
            q_table: QTable::new(),
            exploration,
            learning,
            alpha,
            trial: 0,
            testing: false,
            state: None,
            next_waypoint: None,
            rng,
        })
    }

    pub fn is_learning(&self) -> bool {
        self.learning
    }

    pub fn is_testing(&self) -> bool {
        self.testing
    }

    pub fn epsilon(&self) -> f64 {
        self.exploration.epsilon()
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Number of training trials started so far
    pub fn trial(&self) -> u32 {
        self.trial
    }

    pub fn q_table(&self) -> &QTable<State, Action> {
        &self.q_table
    }

    pub fn planner(&self) -> &P {
        &self.planner
    }

    /// The state the last action was chosen in
    pub fn state(&self) -> Option<State> {
        self.state
    }

    /// The planner's waypoint when the last action was chosen
    pub fn next_waypoint(&self) -> Option<Direction> {
        self.next_waypoint
    }

    /// Whether epsilon has decayed to `tolerance`, at which point training can stop
    pub fn is_exploring_done(&self, tolerance: f64) -> bool {
        self.epsilon() <= tolerance
    }

    /// Build the current state from the planner and the environment's sensors
    ///
    /// The deadline is read for tracing only and never becomes part of the state.
    pub fn build_state<E>(&self, env: &E) -> State
    where
        E: Environment,
        P: RoutePlanner<E>,
    {
        let waypoint = self.planner.next_waypoint(env);
        let inputs = env.sense();
        let deadline = env.deadline();

        let state = State::observe(waypoint, &inputs);
        trace!("state {state}, deadline {deadline}");
        state
    }

    /// Add `state` to the Q-table with every action valued at `0.0`
    ///
    /// Does nothing when the agent is not learning or the state is already known.
    pub fn create_q(&mut self, state: State, actions: &[Action]) {
        if self.learning && self.q_table.ensure(state, actions) {
            trace!("new state {state}, {} states known", self.q_table.len());
        }
    }

    /// The highest Q-value of any action in `state`
    ///
    /// **Errors** if `state` was never created with [`create_q`](LearningAgent::create_q)
    pub fn max_q(&self, state: &State) -> Result<f64> {
        self.q_table.max_value(state)
    }

    /// Pick an action for `state`
    ///
    /// A non-learning agent picks uniformly at random. A learning agent explores with
    /// probability epsilon, and otherwise picks uniformly among the actions with the
    /// highest Q-value.
    pub fn choose_action<E>(&mut self, env: &E, state: State) -> Result<Action>
    where
        E: Environment,
        P: RoutePlanner<E>,
    {
        self.state = Some(state);
        self.next_waypoint = self.planner.next_waypoint(env);

        let actions = env.valid_actions();
        if !self.learning {
            return actions.choose(&mut self.rng).copied().ok_or(Error::NoActions);
        }

        match self.exploration.choose(&mut self.rng) {
            Choice::Explore => {
                trace!("exploring from {state}");
                actions.choose(&mut self.rng).copied().ok_or(Error::NoActions)
            }
            Choice::Exploit => {
                let ties = self.q_table.greedy_actions(&state)?;
                ties.choose(&mut self.rng).copied().ok_or(Error::NoActions)
            }
        }
    }

    /// Move the value of `action` in `state` toward `reward`
    ///
    /// Does nothing when the agent is not learning.
    ///
    /// **Errors** if the state or action has no entry in the Q-table
    pub fn learn(&mut self, state: &State, action: Action, reward: f64) -> Result<()> {
        if !self.learning {
            return Ok(());
        }
        let q_value = self.q_table.get(state, action)?;
        let updated = (1.0 - self.alpha) * q_value + self.alpha * reward;
        self.q_table.set(state, action, updated)
    }
}

impl<E, P, D> Agent<E> for LearningAgent<P, D>
where
    E: Environment,
    P: RoutePlanner<E>,
    D: Decay,
{
    fn reset(&mut self, env: &E, destination: E::Location, testing: bool) {
        self.planner.route_to(env, destination);

        if testing || self.testing {
            if !self.testing {
                info!(
                    "switching to testing after {} trials, {} states learned",
                    self.trial,
                    self.q_table.len()
                );
            }
            self.testing = true;
            self.exploration.disable();
            self.alpha = 0.0;
        } else {
            self.trial += 1;
            self.exploration.step(self.trial);
        }

        debug!(
            "trial {} (testing: {}): epsilon {:.4}, alpha {}",
            self.trial,
            self.testing,
            self.epsilon(),
            self.alpha
        );
    }

    fn update(&mut self, env: &mut E) -> Result<()> {
        let state = self.build_state(env);
        self.create_q(state, env.valid_actions());
        let action = self.choose_action(env, state)?;
        let reward = env.act(action);
        trace!("{state}: took {action}, reward {reward}");
        self.learn(&state, action, reward)
    }
}
