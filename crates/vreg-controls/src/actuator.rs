//! Actuator limits for the inverter bridge.
//!
//! The bridge can only synthesise voltages between its rails, so every control
//! command is clamped to `[min_v, max_v]` before it reaches the plant.

use crate::error::{ControlError, ControlResult};
use serde::{Deserialize, Serialize};

/// Closed voltage interval the actuator can realise.
///
/// # Example
///
/// ```
/// use vreg_controls::ActuatorLimits;
///
/// let limits = ActuatorLimits::new(0.0, 400.0).unwrap();
/// assert_eq!(limits.clamp(1010.0), 400.0);
/// assert_eq!(limits.clamp(-3.0), 0.0);
/// assert!(limits.is_saturated(400.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActuatorLimits {
    /// Lower rail (volts)
    pub min_v: f64,
    /// Upper rail (volts)
    pub max_v: f64,
}

impl Default for ActuatorLimits {
    fn default() -> Self {
        Self {
            min_v: 0.0,
            max_v: 400.0,
        }
    }
}

impl ActuatorLimits {
    /// Create actuator limits.
    ///
    /// # Errors
    ///
    /// Returns error if either bound is not finite or `min_v >= max_v`.
    pub fn new(min_v: f64, max_v: f64) -> ControlResult<Self> {
        let limits = Self { min_v, max_v };
        limits.validate()?;
        Ok(limits)
    }

    /// Check bounds loaded from configuration.
    pub fn validate(&self) -> ControlResult<()> {
        if !self.min_v.is_finite() || !self.max_v.is_finite() {
            return Err(ControlError::InvalidArg {
                what: "actuator limits must be finite",
            });
        }
        if self.min_v >= self.max_v {
            return Err(ControlError::InvalidArg {
                what: "actuator min_v must be less than max_v",
            });
        }
        Ok(())
    }

    /// Clamp a raw command into the realisable range.
    pub fn clamp(&self, command: f64) -> f64 {
        command.clamp(self.min_v, self.max_v)
    }

    /// True when the command sits on (or beyond) either rail.
    pub fn is_saturated(&self, command: f64) -> bool {
        command <= self.min_v || command >= self.max_v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rails() {
        let limits = ActuatorLimits::default();
        assert_eq!(limits.min_v, 0.0);
        assert_eq!(limits.max_v, 400.0);
        assert!(limits.validate().is_ok());
    }

    #[test]
    fn clamp_inside_is_identity() {
        let limits = ActuatorLimits::default();
        assert_eq!(limits.clamp(311.0), 311.0);
        assert!(!limits.is_saturated(311.0));
    }

    #[test]
    fn saturation_detected_on_both_rails() {
        let limits = ActuatorLimits::default();
        assert!(limits.is_saturated(limits.clamp(-50.0)));
        assert!(limits.is_saturated(limits.clamp(900.0)));
    }

    #[test]
    fn invalid_parameters() {
        assert!(ActuatorLimits::new(400.0, 0.0).is_err());
        assert!(ActuatorLimits::new(10.0, 10.0).is_err());
        assert!(ActuatorLimits::new(f64::NAN, 400.0).is_err());
    }
}
