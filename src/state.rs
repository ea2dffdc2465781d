use std::fmt;

use crate::env::{Direction, Inputs, Light};

/// The smartcab's view of the world, used as the key of the Q-table
///
/// Only the next waypoint, the light and the oncoming and left traffic are kept. Two
/// observations that agree on these four features are the same state, even if the
/// deadline or the traffic on the right differ.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct State {
    pub waypoint: Option<Direction>,
    pub light: Light,
    pub oncoming: Option<Direction>,
    pub left: Option<Direction>,
}

impl State {
    pub fn new(
        waypoint: Option<Direction>,
        light: Light,
        oncoming: Option<Direction>,
        left: Option<Direction>,
    ) -> Self {
        Self {
            waypoint,
            light,
            oncoming,
            left,
        }
    }

    /// Build a state from the planner's waypoint and the sensed inputs
    pub fn observe(waypoint: Option<Direction>, inputs: &Inputs) -> Self {
        Self::new(waypoint, inputs.light, inputs.oncoming, inputs.left)
    }
}

struct Feature(Option<Direction>);

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(d) => write!(f, "{d}"),
            None => f.write_str("None"),
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            Feature(self.waypoint),
            self.light,
            Feature(self.oncoming),
            Feature(self.left)
        )
    }
}
