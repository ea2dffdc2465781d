use std::{collections::HashMap, fmt::Display};

use crate::error::{Error, Result};

use super::Hashable;

/// A lazily populated table of action values
///
/// A state is added with [`ensure`](QTable::ensure), which records a value of `0.0` for every
/// action it is given. Reads and writes of a state or action that was never added fail
/// instead of falling back to a default, so a decision cycle that reads before it creates
/// is reported rather than hidden. Entries are never removed.
///
/// ### Generics
/// - `S` - The state type used as a key
/// - `A` - The action type
#[derive(Debug, Clone)]
pub struct QTable<S, A>
where
    S: Hashable,
    A: Hashable,
{
    // actions keep the order they were given in so seeded runs are reproducible
    table: HashMap<S, Vec<(A, f64)>>,
}

impl<S, A> Default for QTable<S, A>
where
    S: Hashable,
    A: Hashable,
{
    fn default() -> Self {
        Self {
            table: HashMap::new(),
        }
    }
}

impl<S, A> QTable<S, A>
where
    S: Hashable + Display,
    A: Hashable + Display,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `state` with a value of `0.0` for each of `actions`, unless it is already present
    ///
    /// **Returns** `true` if the state was added
    pub fn ensure(&mut self, state: S, actions: &[A]) -> bool {
        if self.table.contains_key(&state) {
            return false;
        }
        let mut values = Vec::with_capacity(actions.len());
        for &action in actions {
            if !values.iter().any(|&(a, _)| a == action) {
                values.push((action, 0.0));
            }
        }
        self.table.insert(state, values);
        true
    }

    pub fn contains(&self, state: &S) -> bool {
        self.table.contains_key(state)
    }

    /// The values of every action for `state`, in the order the actions were added
    pub fn values(&self, state: &S) -> Result<&[(A, f64)]> {
        self.table
            .get(state)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::UnknownState(state.to_string()))
    }

    pub fn get(&self, state: &S, action: A) -> Result<f64> {
        self.values(state)?
            .iter()
            .find(|&&(a, _)| a == action)
            .map(|&(_, value)| value)
            .ok_or_else(|| unknown_action(state, action))
    }

    pub fn set(&mut self, state: &S, action: A, value: f64) -> Result<()> {
        let values = self
            .table
            .get_mut(state)
            .ok_or_else(|| Error::UnknownState(state.to_string()))?;
        let entry = values
            .iter_mut()
            .find(|(a, _)| *a == action)
            .ok_or_else(|| unknown_action(state, action))?;
        entry.1 = value;
        Ok(())
    }

    /// The highest action value recorded for `state`
    pub fn max_value(&self, state: &S) -> Result<f64> {
        let values = self.values(state)?;
        if values.is_empty() {
            return Err(Error::NoActions);
        }
        Ok(values
            .iter()
            .map(|&(_, value)| value)
            .fold(f64::NEG_INFINITY, f64::max))
    }

    /// Every action whose value is exactly the maximum for `state`
    pub fn greedy_actions(&self, state: &S) -> Result<Vec<A>> {
        let max = self.max_value(state)?;
        Ok(self
            .values(state)?
            .iter()
            .filter(|&&(_, value)| value == max)
            .map(|&(action, _)| action)
            .collect())
    }

    /// Number of states in the table
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&S, &[(A, f64)])> {
        self.table.iter().map(|(s, v)| (s, v.as_slice()))
    }
}

fn unknown_action<S: Display, A: Display>(state: &S, action: A) -> Error {
    Error::UnknownAction {
        state: state.to_string(),
        action: action.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use strum::VariantArray;

    use super::*;
    use crate::{
        env::{Action, Direction, Light},
        state::State,
    };

    fn state() -> State {
        State::new(Some(Direction::Forward), Light::Red, None, None)
    }

    #[test]
    fn ensure_functional() {
        let mut q = QTable::new();
        assert!(q.is_empty(), "initialized empty");

        assert!(q.ensure(state(), Action::VARIANTS), "state added");
        assert_eq!(q.len(), 1);
        assert_eq!(
            q.values(&state()).unwrap(),
            [
                (Action::Idle, 0.0),
                (Action::Forward, 0.0),
                (Action::Left, 0.0),
                (Action::Right, 0.0)
            ],
            "every action starts at zero"
        );

        q.set(&state(), Action::Left, 3.0).unwrap();
        assert!(!q.ensure(state(), Action::VARIANTS), "second ensure is a no-op");
        assert_eq!(q.get(&state(), Action::Left), Ok(3.0), "values survive");
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn unknown_entries_are_errors() {
        let mut q = QTable::new();
        assert!(matches!(q.get(&state(), Action::Idle), Err(Error::UnknownState(_))));
        assert!(matches!(q.max_value(&state()), Err(Error::UnknownState(_))));
        assert!(q.set(&state(), Action::Idle, 1.0).is_err());
        assert!(q.is_empty(), "failed reads and writes do not insert");

        q.ensure(state(), &[Action::Forward, Action::Idle]);
        assert!(matches!(
            q.get(&state(), Action::Right),
            Err(Error::UnknownAction { .. })
        ));
    }

    #[test]
    fn max_and_greedy() {
        let mut q = QTable::new();
        q.ensure(state(), Action::VARIANTS);
        q.set(&state(), Action::Forward, -1.0).unwrap();
        q.set(&state(), Action::Left, 0.5).unwrap();
        q.set(&state(), Action::Right, 0.5).unwrap();

        assert_eq!(q.max_value(&state()), Ok(0.5));
        assert_eq!(
            q.greedy_actions(&state()),
            Ok(vec![Action::Left, Action::Right]),
            "ties are all returned"
        );
    }

    #[test]
    fn empty_action_set() {
        let mut q: QTable<State, Action> = QTable::new();
        q.ensure(state(), &[]);
        assert_eq!(q.max_value(&state()), Err(Error::NoActions));
    }
}
