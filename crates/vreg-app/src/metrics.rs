//! Load-step recovery metrics.
//!
//! Summarises how each controller rides through the load step: worst deviation
//! from the setpoint, lowest voltage, settling time into a ±band and final error.

use serde::{Deserialize, Serialize};
use vreg_sim::{SimOptions, TrajectoryRecord};

use crate::error::{AppError, AppResult};

/// Recovery metrics for one controller output.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RecoveryMetrics {
    /// Largest |v - setpoint| over the run (volts)
    pub max_deviation_v: Option<f64>,
    /// Lowest voltage witnessed (volts)
    pub min_voltage_v: Option<f64>,
    /// Time from the load step until the output enters the band and stays there (ms)
    pub settling_time_ms: Option<f64>,
    /// Final measured - setpoint (volts)
    pub final_error_v: Option<f64>,
}

impl RecoveryMetrics {
    /// Returns true if at least some metrics were computed
    pub fn has_data(&self) -> bool {
        self.max_deviation_v.is_some()
            || self.min_voltage_v.is_some()
            || self.settling_time_ms.is_some()
            || self.final_error_v.is_some()
    }

    /// Output ended inside the band.
    pub fn settled(&self) -> bool {
        self.settling_time_ms.is_some()
    }
}

/// Side-by-side metrics for both controllers of one run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonSummary {
    pub gain_label: String,
    /// Settling band half-width (volts)
    pub band_v: f64,
    /// Load step instant (ms)
    pub disturbance_ms: f64,
    pub feedback: RecoveryMetrics,
    pub reference: RecoveryMetrics,
    /// Steps where the bridge command sat on a rail
    pub saturated_steps: usize,
}

impl ComparisonSummary {
    /// State feedback settles, and does so sooner and with a smaller excursion than the reference.
    pub fn feedback_recovers_faster(&self) -> bool {
        let Some(fb_settle) = self.feedback.settling_time_ms else {
            return false;
        };
        let settles_first = match self.reference.settling_time_ms {
            Some(ref_settle) => fb_settle < ref_settle,
            None => true,
        };
        let smaller_excursion = match (self.feedback.max_deviation_v, self.reference.max_deviation_v)
        {
            (Some(fb), Some(reference)) => fb < reference,
            _ => false,
        };
        settles_first && smaller_excursion
    }
}

/// Compute recovery metrics for a (time_ms, volts) series.
pub fn compute_recovery_metrics(
    series: &[(f64, f64)],
    setpoint_v: f64,
    disturbance_ms: f64,
    band_v: f64,
) -> RecoveryMetrics {
    if series.is_empty() {
        return RecoveryMetrics::default();
    }

    let mut metrics = RecoveryMetrics {
        max_deviation_v: Some(
            series
                .iter()
                .map(|(_, v)| (v - setpoint_v).abs())
                .fold(0.0, f64::max),
        ),
        min_voltage_v: Some(
            series
                .iter()
                .map(|(_, v)| *v)
                .fold(f64::INFINITY, f64::min),
        ),
        final_error_v: series.last().map(|(_, v)| v - setpoint_v),
        ..RecoveryMetrics::default()
    };

    metrics.settling_time_ms = compute_settling_time(series, setpoint_v, disturbance_ms, band_v);
    metrics
}

/// Time after `disturbance_ms` at which the series enters the band
/// `(setpoint - band, setpoint + band)` strictly and never leaves it again.
fn compute_settling_time(
    series: &[(f64, f64)],
    setpoint_v: f64,
    disturbance_ms: f64,
    band_v: f64,
) -> Option<f64> {
    let mut entry: Option<f64> = None;

    for (time, val) in series.iter().filter(|(t, _)| *t >= disturbance_ms) {
        let in_band = (val - setpoint_v).abs() < band_v;
        match (entry, in_band) {
            (None, true) => entry = Some(*time),
            (Some(_), false) => entry = None,
            _ => {}
        }
    }

    entry.map(|t| t - disturbance_ms)
}

/// Compare both controllers of a finished run.
pub fn compare_controllers(
    record: &TrajectoryRecord,
    options: &SimOptions,
    band_v: f64,
) -> AppResult<ComparisonSummary> {
    if !band_v.is_finite() || band_v <= 0.0 {
        return Err(AppError::InvalidInput(
            "settling band must be positive".to_string(),
        ));
    }
    let n = record.len();
    if record.feedback_v.len() != n || record.reference_v.len() != n || record.control_v.len() != n
    {
        return Err(AppError::InvalidInput(
            "trajectory sequences differ in length".to_string(),
        ));
    }

    let disturbance_ms = options.load.switch_time_s * 1000.0;
    let pair = |values: &[f64]| -> Vec<(f64, f64)> {
        record
            .time_ms
            .iter()
            .copied()
            .zip(values.iter().copied())
            .collect()
    };

    Ok(ComparisonSummary {
        gain_label: record.gain_label.clone(),
        band_v,
        disturbance_ms,
        feedback: compute_recovery_metrics(
            &pair(&record.feedback_v),
            options.setpoint_v,
            disturbance_ms,
            band_v,
        ),
        reference: compute_recovery_metrics(
            &pair(&record.reference_v),
            options.setpoint_v,
            disturbance_ms,
            band_v,
        ),
        saturated_steps: record
            .control_v
            .iter()
            .filter(|u| options.actuator.is_saturated(**u))
            .count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settling_time() {
        let series = vec![
            (0.0, 311.0),
            (1.0, 311.0),
            (2.0, 250.0), // step hits
            (3.0, 300.0),
            (4.0, 318.0), // overshoot outside ±5
            (5.0, 313.0), // enters for good
            (6.0, 311.5),
            (7.0, 311.0),
        ];
        let metrics = compute_recovery_metrics(&series, 311.0, 2.0, 5.0);
        assert_eq!(metrics.settling_time_ms, Some(3.0));
        assert_eq!(metrics.min_voltage_v, Some(250.0));
        assert_eq!(metrics.max_deviation_v, Some(61.0));
        assert_eq!(metrics.final_error_v, Some(0.0));
    }

    #[test]
    fn test_never_settles() {
        let series = vec![(0.0, 311.0), (1.0, 200.0), (2.0, 100.0)];
        let metrics = compute_recovery_metrics(&series, 311.0, 1.0, 5.0);
        assert!(!metrics.settled());
        assert!(metrics.has_data());
    }

    #[test]
    fn test_empty_series() {
        let metrics = compute_recovery_metrics(&[], 311.0, 0.0, 5.0);
        assert!(!metrics.has_data());
    }

    #[test]
    fn test_ordering_requires_feedback_to_settle() {
        let summary = ComparisonSummary {
            gain_label: String::new(),
            band_v: 5.0,
            disturbance_ms: 25.0,
            feedback: RecoveryMetrics {
                max_deviation_v: Some(10.0),
                ..RecoveryMetrics::default()
            },
            reference: RecoveryMetrics {
                max_deviation_v: Some(100.0),
                ..RecoveryMetrics::default()
            },
            saturated_steps: 0,
        };
        assert!(!summary.feedback_recovers_faster());
    }
}
