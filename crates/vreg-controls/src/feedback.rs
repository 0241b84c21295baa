//! Static state-feedback voltage controller.
//!
//! Control law: `u = V_ref - K·(x - x_ref)` with `x = [i_L, v_C]` and
//! `x_ref = [i_ref, V_ref]`, followed by actuator clamping.

use crate::actuator::ActuatorLimits;
use crate::error::{ControlError, ControlResult};
use crate::gain::FeedbackGain;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// How the inductor-current component of `x_ref` is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrentReference {
    /// `i_ref = V_ref / R_load`: the current that holds the setpoint across the present load.
    #[default]
    LoadMatched,
    /// `i_ref = 0`. Leaves a steady-state voltage offset under any resistive load.
    Zero,
}

impl CurrentReference {
    pub fn current(&self, setpoint_v: f64, load_ohms: f64) -> f64 {
        match self {
            Self::LoadMatched => setpoint_v / load_ohms,
            Self::Zero => 0.0,
        }
    }
}

/// State-feedback controller with a fixed gain and actuator saturation.
#[derive(Debug, Clone, PartialEq)]
pub struct StateFeedbackController {
    gain: FeedbackGain,
    setpoint_v: f64,
    limits: ActuatorLimits,
    current_reference: CurrentReference,
}

impl StateFeedbackController {
    pub fn new(
        gain: FeedbackGain,
        setpoint_v: f64,
        limits: ActuatorLimits,
        current_reference: CurrentReference,
    ) -> ControlResult<Self> {
        if !setpoint_v.is_finite() {
            return Err(ControlError::InvalidArg {
                what: "setpoint must be finite",
            });
        }
        limits.validate()?;
        Ok(Self {
            gain,
            setpoint_v,
            limits,
            current_reference,
        })
    }

    pub fn gain(&self) -> &FeedbackGain {
        &self.gain
    }

    pub fn limits(&self) -> &ActuatorLimits {
        &self.limits
    }

    /// Reference state `x_ref` for the given load.
    pub fn reference_state(&self, load_ohms: f64) -> Vector2<f64> {
        Vector2::new(
            self.current_reference.current(self.setpoint_v, load_ohms),
            self.setpoint_v,
        )
    }

    /// Unsaturated command.
    pub fn raw_command(&self, x: &Vector2<f64>, load_ohms: f64) -> f64 {
        let error = x - self.reference_state(load_ohms);
        self.setpoint_v - (self.gain.row() * error)[0]
    }

    /// Command actually applied to the plant.
    pub fn command(&self, x: &Vector2<f64>, load_ohms: f64) -> f64 {
        self.limits.clamp(self.raw_command(x, load_ohms))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn applied_command_respects_rails(
            i in -200.0_f64..200.0,
            v in -1000.0_f64..1000.0,
            load in 0.5_f64..1000.0,
        ) {
            let gain = FeedbackGain::new(25.0, 0.1).unwrap();
            let ctrl = StateFeedbackController::new(
                gain,
                311.0,
                ActuatorLimits::default(),
                CurrentReference::LoadMatched,
            )
            .unwrap();
            let u = ctrl.command(&Vector2::new(i, v), load);
            prop_assert!((0.0..=400.0).contains(&u));
        }
    }
}
