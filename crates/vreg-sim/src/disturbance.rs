//! Load disturbance schedule.

use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};
use vreg_core::ensure_positive;

/// Single step change in load resistance.
///
/// `before_ohms` applies up to and including `switch_time_s`, `after_ohms` once
/// `t` is past it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepLoad {
    /// Switch instant (seconds)
    pub switch_time_s: f64,
    /// Load before the switch (ohms)
    pub before_ohms: f64,
    /// Load after the switch (ohms)
    pub after_ohms: f64,
}

impl Default for StepLoad {
    fn default() -> Self {
        Self {
            switch_time_s: 0.025,
            before_ohms: 100.0,
            after_ohms: 10.0,
        }
    }
}

impl StepLoad {
    pub fn validate(&self) -> SimResult<()> {
        if !self.switch_time_s.is_finite() || self.switch_time_s < 0.0 {
            return Err(SimError::InvalidArg {
                what: "switch_time_s must be finite and non-negative",
            });
        }
        ensure_positive(self.before_ohms, "load before switch")?;
        ensure_positive(self.after_ohms, "load after switch")?;
        Ok(())
    }

    pub fn is_switched(&self, t: f64) -> bool {
        t > self.switch_time_s
    }

    pub fn load_at(&self, t: f64) -> f64 {
        if self.is_switched(t) {
            self.after_ohms
        } else {
            self.before_ohms
        }
    }
}
