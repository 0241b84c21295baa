//! Droop reference regulator.
//!
//! A simple PI-style voltage loop used as the comparison baseline.
//! It runs on its own scalar voltage, decoupled from the plant state, and
//! applies the fixed update rule
//!
//! ```text
//! e  = V_ref - v
//! I += e·dt
//! v += (kp·e + ki·I)·dt·rate_scale - droop·V_ref / R_load
//! ```

use serde::{Deserialize, Serialize};

/// Heuristic coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DroopReference {
    /// Proportional weight.
    pub kp: f64,
    /// Integral weight.
    pub ki: f64,
    /// Multiplier applied to `dt` in the voltage update.
    pub rate_scale: f64,
    /// Fraction of the load current subtracted from the voltage each step.
    pub droop: f64,
}

impl Default for DroopReference {
    fn default() -> Self {
        Self {
            kp: 0.5,
            ki: 10.0,
            rate_scale: 100.0,
            droop: 0.1,
        }
    }
}

/// Regulator state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DroopReferenceState {
    /// Regulated output voltage.
    pub voltage: f64,
    /// Time-weighted error accumulator.
    pub integral: f64,
}

impl DroopReferenceState {
    /// Output sitting on the setpoint with an empty integrator.
    pub fn at_setpoint(setpoint_v: f64) -> Self {
        Self {
            voltage: setpoint_v,
            integral: 0.0,
        }
    }
}

impl DroopReference {
    /// Advance the regulator by one step of length `dt` against `load_ohms`.
    pub fn update(
        &self,
        state: &DroopReferenceState,
        setpoint_v: f64,
        load_ohms: f64,
        dt: f64,
    ) -> DroopReferenceState {
        let error = setpoint_v - state.voltage;
        let integral = state.integral + error * dt;
        let correction = (error * self.kp + integral * self.ki) * dt * self.rate_scale;
        let droop = (setpoint_v / load_ohms) * self.droop;

        DroopReferenceState {
            voltage: state.voltage + correction - droop,
            integral,
        }
    }
}
