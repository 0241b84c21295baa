//! Feedback gain strategies.
//!
//! The state-feedback law only needs a 1×2 gain. Where that gain comes from is a
//! strategy: today a scaled placeholder stands in for a gain solved in a lifted
//! (Koopman) basis, and a principled derivation can replace it by implementing
//! [`GainStrategy`].

use crate::error::{ControlError, ControlResult};
use nalgebra::RowVector2;
use serde::{Deserialize, Serialize};
use vreg_core::ensure_positive;

/// Static state-feedback gain `K = [k_current, k_voltage]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedbackGain {
    /// Gain on inductor current error (V/A).
    pub k_current: f64,
    /// Gain on capacitor voltage error (V/V).
    pub k_voltage: f64,
}

impl FeedbackGain {
    pub fn new(k_current: f64, k_voltage: f64) -> ControlResult<Self> {
        if !k_current.is_finite() || !k_voltage.is_finite() {
            return Err(ControlError::InvalidArg {
                what: "feedback gain must be finite",
            });
        }
        Ok(Self {
            k_current,
            k_voltage,
        })
    }

    /// Gain as a row vector, ready to multiply a state error.
    pub fn row(&self) -> RowVector2<f64> {
        RowVector2::new(self.k_current, self.k_voltage)
    }

    /// Human-readable summary, e.g. `[25.00, 0.10] (lifted-space placeholder)`.
    pub fn label(&self, strategy: &str) -> String {
        format!("[{:.2}, {:.2}] ({})", self.k_current, self.k_voltage, strategy)
    }
}

/// Produces a feedback gain from the plant's passive components.
pub trait GainStrategy {
    /// Short name used in gain labels and logs.
    fn name(&self) -> &str;

    /// Compute the gain for inductance `inductance_h` (H) and capacitance `capacitance_f` (F).
    fn compute_gain(&self, inductance_h: f64, capacitance_f: f64) -> ControlResult<FeedbackGain>;
}

/// Placeholder lifted-space gain: `K = [L·current_scale, C·voltage_scale]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiftedSpaceGain {
    pub current_scale: f64,
    pub voltage_scale: f64,
}

impl Default for LiftedSpaceGain {
    fn default() -> Self {
        Self {
            current_scale: 10_000.0,
            voltage_scale: 2_000.0,
        }
    }
}

impl GainStrategy for LiftedSpaceGain {
    fn name(&self) -> &str {
        "lifted-space placeholder"
    }

    fn compute_gain(&self, inductance_h: f64, capacitance_f: f64) -> ControlResult<FeedbackGain> {
        let l = ensure_positive(inductance_h, "inductance")?;
        let c = ensure_positive(capacitance_f, "capacitance")?;
        FeedbackGain::new(l * self.current_scale, c * self.voltage_scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vreg_core::CoreError;

    #[test]
    fn placeholder_gain_for_default_plant() {
        let gain = LiftedSpaceGain::default()
            .compute_gain(2.5e-3, 5e-5)
            .unwrap();
        assert!((gain.k_current - 25.0).abs() < 1e-12);
        assert!((gain.k_voltage - 0.1).abs() < 1e-12);
    }

    #[test]
    fn label_uses_two_decimals_and_strategy_name() {
        let strategy = LiftedSpaceGain::default();
        let gain = strategy.compute_gain(2.5e-3, 5e-5).unwrap();
        assert_eq!(
            gain.label(strategy.name()),
            "[25.00, 0.10] (lifted-space placeholder)"
        );
    }

    #[test]
    fn row_vector_layout() {
        let gain = FeedbackGain::new(3.0, 0.5).unwrap();
        let row = gain.row();
        assert_eq!(row[0], 3.0);
        assert_eq!(row[1], 0.5);
    }

    #[test]
    fn zero_components_rejected() {
        let strategy = LiftedSpaceGain::default();
        assert!(matches!(
            strategy.compute_gain(0.0, 5e-5),
            Err(ControlError::Numeric(CoreError::NotPositive {
                what: "inductance",
                ..
            }))
        ));
        assert!(strategy.compute_gain(2.5e-3, -1.0).is_err());
        assert!(FeedbackGain::new(f64::NAN, 1.0).is_err());
    }
}
