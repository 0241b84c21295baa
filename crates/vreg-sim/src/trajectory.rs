//! Side-by-side load-step trajectory of both controllers.

use crate::error::{SimError, SimResult};
use crate::integrator::{ForwardEuler, Integrator, RK4};
use crate::model::TransientModel;
use crate::plant::{ClosedLoopPlant, LcPlant, PlantParams};
use crate::sim::{IntegratorType, SimOptions};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use vreg_controls::{DroopReferenceState, GainStrategy, LiftedSpaceGain, StateFeedbackController};
use vreg_core::{round_to, s, to_millis};

/// Index-aligned time series produced by one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryRecord {
    /// Sample times (milliseconds, rounded)
    pub time_ms: Vec<f64>,
    /// Droop reference regulator output (volts)
    pub reference_v: Vec<f64>,
    /// Capacitor voltage under state feedback (volts)
    pub feedback_v: Vec<f64>,
    /// Load resistance in effect at each sample (ohms)
    pub load_ohms: Vec<f64>,
    /// Saturated bridge voltage applied over each step (volts)
    pub control_v: Vec<f64>,
    /// Gain summary, e.g. `[25.00, 0.10] (lifted-space placeholder)`
    pub gain_label: String,
}

impl TrajectoryRecord {
    fn with_capacity(steps: usize, gain_label: String) -> Self {
        Self {
            time_ms: Vec::with_capacity(steps),
            reference_v: Vec::with_capacity(steps),
            feedback_v: Vec::with_capacity(steps),
            load_ohms: Vec::with_capacity(steps),
            control_v: Vec::with_capacity(steps),
            gain_label,
        }
    }

    pub fn len(&self) -> usize {
        self.time_ms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_ms.is_empty()
    }
}

/// Run the default scenario with the placeholder lifted-space gain.
pub fn simulate(params: &PlantParams, options: &SimOptions) -> SimResult<TrajectoryRecord> {
    simulate_with_gain(params, options, &LiftedSpaceGain::default())
}

/// Run the load-step scenario with a caller-supplied gain strategy.
///
/// Per step `i` at `t = i·dt`:
/// 1. the load is looked up and `A` updated,
/// 2. the state-feedback command is computed from the state at `t` and clamped,
/// 3. the plant advances one step with the command held,
/// 4. the droop reference regulator advances (it holds the setpoint until the load step).
///
/// The feedback sample for step `i` is the capacitor voltage after that step's
/// integration. Any non-finite value aborts the whole run.
pub fn simulate_with_gain<G: GainStrategy + ?Sized>(
    params: &PlantParams,
    options: &SimOptions,
    strategy: &G,
) -> SimResult<TrajectoryRecord> {
    params.validate()?;
    options.validate()?;

    let gain = strategy.compute_gain(params.inductance_h, params.capacitance_f)?;
    let gain_label = gain.label(strategy.name());
    let controller = StateFeedbackController::new(
        gain,
        options.setpoint_v,
        options.actuator,
        options.current_reference,
    )?;

    let plant = LcPlant::new(*params, options.load.load_at(0.0))?;
    let mut model = ClosedLoopPlant::new(plant, options.setpoint_v);
    let mut x = model.initial_state();
    let mut reference = DroopReferenceState::at_setpoint(options.setpoint_v);
    let mut record = TrajectoryRecord::with_capacity(options.steps, gain_label);

    info!(
        inductance_h = params.inductance_h,
        capacitance_f = params.capacitance_f,
        steps = options.steps,
        dt_s = options.dt_s,
        duration_s = options.duration_s(),
        gain = %record.gain_label,
        "starting load-step simulation"
    );

    let dt = options.dt_s;
    let mut switched = false;
    for step in 0..options.steps {
        let t = step as f64 * dt;
        let load_ohms = options.load.load_at(t);
        let disturbed = options.load.is_switched(t);
        if disturbed && !switched {
            switched = true;
            debug!(step, t_s = t, load_ohms, "load step applied");
        }

        model.set_load(load_ohms);
        let u = controller.command(&x, load_ohms);
        model.set_input(u);

        x = advance(options.integrator, &mut model, t, &x, dt)?;
        ensure_state_finite(&x, step)?;
        let feedback_v = x[1];

        reference = if disturbed {
            options
                .reference
                .update(&reference, options.setpoint_v, load_ohms, dt)
        } else {
            DroopReferenceState::at_setpoint(options.setpoint_v)
        };
        if !reference.voltage.is_finite() {
            debug!(step, "reference regulator diverged");
            return Err(SimError::NonFinite {
                what: "reference voltage",
                step,
            });
        }

        record
            .time_ms
            .push(round_to(to_millis(s(t)), options.time_decimals));
        record.reference_v.push(reference.voltage);
        record.feedback_v.push(feedback_v);
        record.load_ohms.push(load_ohms);
        record.control_v.push(u);
    }

    info!(
        samples = record.len(),
        final_feedback_v = record.feedback_v.last().copied().unwrap_or_default(),
        final_reference_v = record.reference_v.last().copied().unwrap_or_default(),
        "simulation complete"
    );

    Ok(record)
}

fn advance(
    integrator: IntegratorType,
    model: &mut ClosedLoopPlant,
    t: f64,
    x: &Vector2<f64>,
    dt: f64,
) -> SimResult<Vector2<f64>> {
    match integrator {
        IntegratorType::ForwardEuler => ForwardEuler.step(model, t, x, dt),
        IntegratorType::RK4 => RK4.step(model, t, x, dt),
    }
}

fn ensure_state_finite(x: &Vector2<f64>, step: usize) -> SimResult<()> {
    if !x[0].is_finite() {
        debug!(step, "inductor current diverged");
        return Err(SimError::NonFinite {
            what: "inductor current",
            step,
        });
    }
    if !x[1].is_finite() {
        debug!(step, "capacitor voltage diverged");
        return Err(SimError::NonFinite {
            what: "capacitor voltage",
            step,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vreg_controls::{ControlResult, FeedbackGain};

    #[test]
    fn single_step_holds_initial_condition() {
        let opts = SimOptions {
            steps: 1,
            ..SimOptions::default()
        };
        let record = simulate(&PlantParams::default(), &opts).unwrap();
        assert_eq!(record.len(), 1);
        assert_eq!(record.time_ms, vec![0.0]);
        assert!((record.feedback_v[0] - 311.0).abs() < 1e-9);
        assert_eq!(record.reference_v, vec![311.0]);
        assert_eq!(record.load_ohms, vec![100.0]);
        assert_eq!(record.control_v, vec![311.0]);
    }

    #[test]
    fn feedback_sample_follows_the_step_it_labels() {
        let opts = SimOptions {
            steps: 503,
            ..SimOptions::default()
        };
        let record = simulate(&PlantParams::default(), &opts).unwrap();
        // Step 500 still runs at 100 Ω, step 501 is the first at 10 Ω.
        assert!((record.feedback_v[500] - 311.0).abs() < 1e-9);
        assert_eq!(record.load_ohms[501], 10.0);
        // One Euler step from [3.11, 311] into 10 Ω: dv = dt/C·(3.11 - 31.1).
        assert!((record.feedback_v[501] - 283.01).abs() < 1e-9);
        assert!((record.feedback_v[502] - 259.599).abs() < 1e-9);
    }

    #[test]
    fn default_gain_label() {
        let record = simulate(&PlantParams::default(), &SimOptions::default()).unwrap();
        assert_eq!(record.gain_label, "[25.00, 0.10] (lifted-space placeholder)");
    }

    struct FixedGain;

    impl GainStrategy for FixedGain {
        fn name(&self) -> &str {
            "fixed"
        }

        fn compute_gain(&self, _l: f64, _c: f64) -> ControlResult<FeedbackGain> {
            FeedbackGain::new(10.0, 0.5)
        }
    }

    #[test]
    fn custom_gain_strategy_is_used() {
        let record =
            simulate_with_gain(&PlantParams::default(), &SimOptions::default(), &FixedGain)
                .unwrap();
        assert_eq!(record.gain_label, "[10.00, 0.50] (fixed)");
        assert_eq!(record.len(), 1000);
    }

    #[test]
    fn zero_parameters_fail_fast() {
        let opts = SimOptions::default();
        let zero_l = PlantParams {
            inductance_h: 0.0,
            capacitance_f: 5e-5,
        };
        assert!(matches!(
            simulate(&zero_l, &opts),
            Err(SimError::Parameter(_))
        ));

        let zero_c = PlantParams {
            inductance_h: 2.5e-3,
            capacitance_f: 0.0,
        };
        assert!(simulate(&zero_c, &opts).is_err());
    }

    #[test]
    fn divergence_is_reported_not_recorded() {
        // Step far beyond the forward Euler stability limit of this filter.
        let opts = SimOptions {
            dt_s: 5e-3,
            steps: 2000,
            ..SimOptions::default()
        };
        let params = PlantParams::new(1e-4, 1e-6).unwrap();
        assert!(matches!(
            simulate(&params, &opts),
            Err(SimError::NonFinite { .. })
        ));
    }
}
