use std::f64::consts::FRAC_PI_2;

use crate::error::{Error, Result};

/// An implementation of a time-decaying value
///
/// Schedules used for exploration must be non-increasing in `t` so that the agent
/// moves steadily from exploring to exploiting.
pub trait Decay {
    /// Calculate value at time `t`
    fn evaluate(&self, t: f64) -> f64;
}

// schedules only ever decay epsilon, so they must fall from `vi` toward `vf`
fn validate(rate: f64, vi: f64, vf: f64) -> Result<()> {
    (rate >= 0.0 && vi > vf)
        .then_some(())
        .ok_or_else(|| {
            Error::InvalidDecay(format!(
                "expected `rate >= 0` and `vi > vf`, got rate {rate}, vi {vi}, vf {vf}"
            ))
        })
}

/// A constant value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constant {
    value: f64,
}

impl Constant {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl Decay for Constant {
    fn evaluate(&self, _t: f64) -> f64 {
        self.value
    }
}

/// v(t) = v<sub>f</sub> + (v<sub>i</sub> - v<sub>f</sub>) * e<sup>-rt</sup>
///
/// The power schedule v(t) = a<sup>t</sup> is `Exponential::new(-a.ln(), 1.0, 0.0)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Exponential {
    rate: f64,
    vi: f64,
    vf: f64,
}

impl Exponential {
    pub fn new(rate: f64, vi: f64, vf: f64) -> Result<Self> {
        validate(rate, vi, vf)?;
        Ok(Self { rate, vi, vf })
    }
}

impl Decay for Exponential {
    fn evaluate(&self, t: f64) -> f64 {
        let &Self { rate, vi, vf } = self;
        vf + (vi - vf) * (-rate * t).exp()
    }
}

/// v(t) = max(v<sub>i</sub> - rt, v<sub>f</sub>)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Linear {
    rate: f64,
    vi: f64,
    vf: f64,
}

impl Linear {
    pub fn new(rate: f64, vi: f64, vf: f64) -> Result<Self> {
        validate(rate, vi, vf)?;
        Ok(Self { rate, vi, vf })
    }
}

impl Decay for Linear {
    fn evaluate(&self, t: f64) -> f64 {
        let &Self { rate, vi, vf } = self;
        (vi - rate * t).max(vf)
    }
}

/// v(t) = cos(&pi;t / 2K) for t &lt; K, otherwise 0
///
/// Starts at 1, stays flat early on, and reaches exactly 0 at the horizon `K`.
#[derive(Debug, Clone, PartialEq)]
pub struct Cosine {
    horizon: f64,
}

impl Cosine {
    /// Cosine schedule reaching zero after `horizon` trials
    pub fn new(horizon: f64) -> Result<Self> {
        if horizon.is_finite() && horizon > 0.0 {
            Ok(Self { horizon })
        } else {
            Err(Error::InvalidDecay(format!(
                "cosine horizon must be positive and finite, got {horizon}"
            )))
        }
    }

    pub fn horizon(&self) -> f64 {
        self.horizon
    }
}

impl Default for Cosine {
    fn default() -> Self {
        Self { horizon: 10_000.0 }
    }
}

impl Decay for Cosine {
    fn evaluate(&self, t: f64) -> f64 {
        if t >= self.horizon {
            return 0.0;
        }
        (FRAC_PI_2 * t.max(0.0) / self.horizon).cos().max(0.0)
    }
}
