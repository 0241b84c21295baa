//! LC output filter feeding a resistive load.
//!
//! State `x = [i_L, v_C]`, input `u` = bridge voltage:
//!
//! ```text
//! A = | 0      -1/L      |     B = | 1/L |
//!     | 1/C    -1/(C·R)  |         | 0   |
//! ```
//!
//! Only `A[1,1]` depends on the load, so a load change touches a single entry.

use crate::error::SimResult;
use crate::model::TransientModel;
use nalgebra::{Matrix2, Vector2};
use serde::{Deserialize, Serialize};
use vreg_core::{Capacitance, Inductance, ensure_positive, to_farad, to_henry};

/// Passive components of the output filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlantParams {
    /// Filter inductance (H)
    pub inductance_h: f64,
    /// Filter capacitance (F)
    pub capacitance_f: f64,
}

impl Default for PlantParams {
    fn default() -> Self {
        Self {
            inductance_h: 2.5e-3,
            capacitance_f: 5e-5,
        }
    }
}

impl PlantParams {
    pub fn new(inductance_h: f64, capacitance_f: f64) -> SimResult<Self> {
        let params = Self {
            inductance_h,
            capacitance_f,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn from_quantities(inductance: Inductance, capacitance: Capacitance) -> SimResult<Self> {
        Self::new(to_henry(inductance), to_farad(capacitance))
    }

    /// Both components finite and strictly positive.
    pub fn validate(&self) -> SimResult<()> {
        ensure_positive(self.inductance_h, "inductance")?;
        ensure_positive(self.capacitance_f, "capacitance")?;
        Ok(())
    }
}

/// Continuous-time state-space model of the filter at its present load.
#[derive(Debug, Clone, PartialEq)]
pub struct LcPlant {
    params: PlantParams,
    a: Matrix2<f64>,
    b: Vector2<f64>,
    load_ohms: f64,
}

impl LcPlant {
    pub fn new(params: PlantParams, load_ohms: f64) -> SimResult<Self> {
        params.validate()?;
        let load_ohms = ensure_positive(load_ohms, "load resistance")?;
        let l = params.inductance_h;
        let c = params.capacitance_f;

        Ok(Self {
            params,
            a: Matrix2::new(0.0, -1.0 / l, 1.0 / c, -1.0 / (c * load_ohms)),
            b: Vector2::new(1.0 / l, 0.0),
            load_ohms,
        })
    }

    pub fn a(&self) -> &Matrix2<f64> {
        &self.a
    }

    pub fn b(&self) -> &Vector2<f64> {
        &self.b
    }

    pub fn load_ohms(&self) -> f64 {
        self.load_ohms
    }

    /// Switch the load. Callers guarantee `load_ohms > 0`.
    pub fn set_load(&mut self, load_ohms: f64) {
        if load_ohms != self.load_ohms {
            self.load_ohms = load_ohms;
            self.a[(1, 1)] = -1.0 / (self.params.capacitance_f * load_ohms);
        }
    }

    /// `A·x + B·u`
    pub fn derivative(&self, x: &Vector2<f64>, u: f64) -> Vector2<f64> {
        self.a * x + self.b * u
    }

    /// Steady state holding `voltage` across the present load.
    pub fn equilibrium(&self, voltage: f64) -> Vector2<f64> {
        Vector2::new(voltage / self.load_ohms, voltage)
    }
}

/// Plant with a zero-order-held bridge voltage, ready for an [`Integrator`](crate::Integrator).
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedLoopPlant {
    plant: LcPlant,
    initial_voltage: f64,
    input_v: f64,
}

impl ClosedLoopPlant {
    /// Starts at the equilibrium for `initial_voltage`, with that voltage applied.
    pub fn new(plant: LcPlant, initial_voltage: f64) -> Self {
        Self {
            plant,
            initial_voltage,
            input_v: initial_voltage,
        }
    }

    pub fn set_load(&mut self, load_ohms: f64) {
        self.plant.set_load(load_ohms);
    }

    /// Bridge voltage held until the next call.
    pub fn set_input(&mut self, input_v: f64) {
        self.input_v = input_v;
    }
}

impl TransientModel for ClosedLoopPlant {
    type State = Vector2<f64>;

    fn initial_state(&self) -> Vector2<f64> {
        self.plant.equilibrium(self.initial_voltage)
    }

    fn rhs(&mut self, _t: f64, x: &Vector2<f64>) -> SimResult<Vector2<f64>> {
        Ok(self.plant.derivative(x, self.input_v))
    }

    fn add(&self, a: &Vector2<f64>, b: &Vector2<f64>) -> Vector2<f64> {
        a + b
    }

    fn scale(&self, a: &Vector2<f64>, scale: f64) -> Vector2<f64> {
        a * scale
    }
}
