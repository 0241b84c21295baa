//! Simulation options.

use crate::disturbance::StepLoad;
use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};
use vreg_controls::{ActuatorLimits, CurrentReference, DroopReference};
use vreg_core::constants::GRID_PEAK_V;

/// Integrator selection for simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorType {
    /// Forward Euler (1st-order, 1 rhs call per step).
    #[default]
    ForwardEuler,
    /// 4th-order Runge-Kutta (4 rhs calls per step).
    #[serde(rename = "rk4")]
    RK4,
}

/// Options for a load-step comparison run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimOptions {
    /// Number of fixed steps (and samples per output sequence)
    pub steps: usize,
    /// Fixed time step (seconds)
    pub dt_s: f64,
    /// Output voltage setpoint (volts)
    pub setpoint_v: f64,
    /// Load disturbance
    pub load: StepLoad,
    /// Bridge voltage rails
    pub actuator: ActuatorLimits,
    /// Current component of the state-feedback reference
    pub current_reference: CurrentReference,
    /// Baseline regulator coefficients
    pub reference: DroopReference,
    /// Integrator type (default: forward Euler)
    pub integrator: IntegratorType,
    /// Decimal places kept on the millisecond time stamps
    pub time_decimals: u32,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            steps: 1000,
            dt_s: 50e-6,
            setpoint_v: GRID_PEAK_V,
            load: StepLoad::default(),
            actuator: ActuatorLimits::default(),
            current_reference: CurrentReference::default(),
            reference: DroopReference::default(),
            integrator: IntegratorType::default(),
            time_decimals: 2,
        }
    }
}

impl SimOptions {
    pub fn validate(&self) -> SimResult<()> {
        if self.steps == 0 {
            return Err(SimError::InvalidArg {
                what: "steps must be positive",
            });
        }
        if !self.dt_s.is_finite() || self.dt_s <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "dt must be positive",
            });
        }
        if !self.setpoint_v.is_finite() {
            return Err(SimError::InvalidArg {
                what: "setpoint must be finite",
            });
        }
        if self.time_decimals > 9 {
            return Err(SimError::InvalidArg {
                what: "time_decimals must be at most 9",
            });
        }
        // Coarser stamps than dt would repeat time values.
        let dt_in_stamp_units = self.dt_s * 1000.0 * 10f64.powi(self.time_decimals as i32);
        if dt_in_stamp_units < 1.0 - 1e-9 {
            return Err(SimError::InvalidArg {
                what: "dt is finer than the time stamp resolution",
            });
        }
        self.load.validate()?;
        self.actuator.validate()?;
        Ok(())
    }

    /// Simulated span (seconds).
    pub fn duration_s(&self) -> f64 {
        self.steps as f64 * self.dt_s
    }
}
