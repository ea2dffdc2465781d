use strum::{Display, VariantArray};

/// A heading relative to the smartcab's current orientation
///
/// Used both for the planner's next waypoint and for the intended movement of
/// other cars at the intersection.
#[derive(VariantArray, Display, Clone, Copy, Debug, Hash, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Forward,
    Left,
    Right,
}

/// An action the smartcab can take at an intersection
#[derive(VariantArray, Display, Clone, Copy, Debug, Hash, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum Action {
    /// Stay put for this tick
    #[strum(serialize = "None")]
    Idle,
    Forward,
    Left,
    Right,
}

impl From<Option<Direction>> for Action {
    fn from(direction: Option<Direction>) -> Self {
        match direction {
            None => Action::Idle,
            Some(Direction::Forward) => Action::Forward,
            Some(Direction::Left) => Action::Left,
            Some(Direction::Right) => Action::Right,
        }
    }
}

/// Traffic light color facing the smartcab
#[derive(VariantArray, Display, Clone, Copy, Debug, Hash, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum Light {
    Green,
    Red,
}

/// What the smartcab senses at its current intersection
///
/// Each traffic field holds the intended direction of the car coming from that side,
/// or `None` if there is no car or it is not moving.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Inputs {
    pub light: Light,
    pub oncoming: Option<Direction>,
    pub left: Option<Direction>,
    pub right: Option<Direction>,
}

/// The traffic world the smartcab drives in, seen from the smartcab's seat
///
/// Grid topology, traffic lights and the other cars all live behind this trait; the
/// learning agent only senses, checks its deadline and acts.
pub trait Environment {
    /// A position in the world that a trip can be routed to
    type Location;

    /// The fixed set of actions available to the smartcab
    ///
    /// The returned slice should never be empty and must not change over a run.
    fn valid_actions(&self) -> &[Action];

    /// Sense the light and surrounding traffic at the current intersection
    fn sense(&self) -> Inputs;

    /// Number of ticks left before the current trial's deadline
    fn deadline(&self) -> i32;

    /// Carry out `action` and return the reward it earned
    ///
    /// Traffic violations and accidents produce negative rewards.
    fn act(&mut self, action: Action) -> f64;
}

/// Plans a route for the smartcab through an [`Environment`]
pub trait RoutePlanner<E: Environment> {
    /// Set the destination of the current trip
    fn route_to(&mut self, env: &E, destination: E::Location);

    /// The direction to head in next, or `None` if the destination has been reached
    fn next_waypoint(&self, env: &E) -> Option<Direction>;
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;

    use super::*;

    /// A single intersection with fixed inputs and a per-action reward table
    pub(crate) struct MockEnv {
        pub actions: Vec<Action>,
        pub inputs: Inputs,
        pub deadline: i32,
        pub rewards: HashMap<Action, f64>,
        pub taken: Vec<Action>,
    }

    impl MockEnv {
        pub fn new(inputs: Inputs) -> Self {
            Self {
                actions: Action::VARIANTS.to_vec(),
                inputs,
                deadline: 20,
                rewards: HashMap::new(),
                taken: Vec::new(),
            }
        }

        pub fn with_reward(mut self, action: Action, reward: f64) -> Self {
            self.rewards.insert(action, reward);
            self
        }
    }

    impl Environment for MockEnv {
        type Location = (i32, i32);

        fn valid_actions(&self) -> &[Action] {
            &self.actions
        }

        fn sense(&self) -> Inputs {
            self.inputs
        }

        fn deadline(&self) -> i32 {
            self.deadline
        }

        fn act(&mut self, action: Action) -> f64 {
            self.taken.push(action);
            self.deadline -= 1;
            self.rewards.get(&action).copied().unwrap_or(0.0)
        }
    }

    /// Always points the same way
    pub(crate) struct MockPlanner {
        pub destination: Option<(i32, i32)>,
        pub waypoint: Option<Direction>,
    }

    impl MockPlanner {
        pub fn new(waypoint: Option<Direction>) -> Self {
            Self {
                destination: None,
                waypoint,
            }
        }
    }

    impl RoutePlanner<MockEnv> for MockPlanner {
        fn route_to(&mut self, _env: &MockEnv, destination: (i32, i32)) {
            self.destination = Some(destination);
        }

        fn next_waypoint(&self, _env: &MockEnv) -> Option<Direction> {
            self.waypoint
        }
    }

    pub(crate) fn red_light() -> Inputs {
        Inputs {
            light: Light::Red,
            oncoming: None,
            left: None,
            right: None,
        }
    }

    #[test]
    fn action_from_waypoint() {
        assert_eq!(Action::from(None), Action::Idle);
        assert_eq!(Action::from(Some(Direction::Left)), Action::Left);
        assert_eq!(Action::from(Some(Direction::Forward)), Action::Forward);
    }

    #[test]
    fn action_display() {
        let names = Action::VARIANTS
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, ["None", "forward", "left", "right"]);
        assert_eq!(Light::Red.to_string(), "red");
    }
}
