use rand::Rng;

use crate::{
    decay::{Cosine, Decay},
    ensure_interval,
    error::Result,
};

use super::Choice;

/// Epsilon greedy exploration policy with a per-trial decaying epsilon threshold
///
/// Epsilon starts at the value given to [`new`](EpsilonGreedy::new) and is recomputed from the
/// decay schedule every time a training trial begins. Once [`disable`](EpsilonGreedy::disable)d
/// it stays at zero regardless of later decay steps.
#[derive(Debug, Clone)]
pub struct EpsilonGreedy<D: Decay> {
    schedule: D,
    epsilon: f64,
    disabled: bool,
}

impl Default for EpsilonGreedy<Cosine> {
    fn default() -> Self {
        Self {
            schedule: Cosine::default(),
            epsilon: 1.0,
            disabled: false,
        }
    }
}

impl<D: Decay> EpsilonGreedy<D> {
    /// Initialize epsilon greedy policy with a starting epsilon and a decay strategy
    ///
    /// **Errors** if `epsilon` is not in the interval `[0,1]`
    pub fn new(epsilon: f64, schedule: D) -> Result<Self> {
        ensure_interval!(epsilon, 0.0, 1.0);
        Ok(Self {
            schedule,
            epsilon,
            disabled: false,
        })
    }

    /// Current exploration probability
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn schedule(&self) -> &D {
        &self.schedule
    }

    /// Set epsilon from the decay schedule for trial `t`
    ///
    /// Values produced by the schedule are clamped to `[0,1]`.
    pub fn step(&mut self, t: u32) -> f64 {
        if !self.disabled {
            self.epsilon = self.schedule.evaluate(t as f64).clamp(0.0, 1.0);
        }
        self.epsilon
    }

    /// Stop exploring for good
    pub fn disable(&mut self) {
        self.disabled = true;
        self.epsilon = 0.0;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Invoke epsilon greedy policy with a uniform draw from `rng`
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Choice {
        if rng.gen::<f64>() < self.epsilon {
            Choice::Explore
        } else {
            Choice::Exploit
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::decay::{Constant, Linear};

    #[test]
    fn rejects_bad_epsilon() {
        assert!(EpsilonGreedy::new(1.5, Constant::new(0.1)).is_err());
        assert!(EpsilonGreedy::new(-0.1, Constant::new(0.1)).is_err());
    }

    #[test]
    fn extremes_are_deterministic() {
        let mut rng = StdRng::seed_from_u64(7);
        let always = EpsilonGreedy::new(1.0, Constant::new(1.0)).unwrap();
        let never = EpsilonGreedy::new(0.0, Constant::new(0.0)).unwrap();
        for _ in 0..1000 {
            assert_eq!(always.choose(&mut rng), Choice::Explore);
            assert_eq!(never.choose(&mut rng), Choice::Exploit);
        }
    }

    #[test]
    fn explore_rate_tracks_epsilon() {
        let mut rng = StdRng::seed_from_u64(42);
        let policy = EpsilonGreedy::new(0.3, Constant::new(0.3)).unwrap();
        let n = 10_000;
        let explored = (0..n)
            .filter(|_| policy.choose(&mut rng) == Choice::Explore)
            .count();
        let rate = explored as f64 / n as f64;
        assert!((rate - 0.3).abs() < 0.03, "explore rate {rate}");
    }

    #[test]
    fn step_and_disable() {
        let mut policy = EpsilonGreedy::new(1.0, Linear::new(0.25, 1.0, 0.0).unwrap()).unwrap();
        assert_eq!(policy.step(1), 0.75);
        assert_eq!(policy.step(2), 0.5);

        policy.disable();
        assert_eq!(policy.epsilon(), 0.0);
        assert_eq!(policy.step(3), 0.0, "stays disabled");
        assert!(policy.is_disabled());
    }
}
