//! Request and response bodies.
//!
//! Request: `{"L": 0.0025, "C": 0.00005}`, both optional. Numbers may also be
//! sent as numeric strings (`"2.5e-3"`).
//!
//! Response: `{"time": [...], "pid": [...], "kks": [...], "k_gain": "..."}`.

use serde::{Deserialize, Deserializer, Serialize};
use vreg_sim::{PlantParams, TrajectoryRecord};

use crate::error::AppResult;

pub const DEFAULT_INDUCTANCE_H: f64 = 2.5e-3;
pub const DEFAULT_CAPACITANCE_F: f64 = 5e-5;

/// Plant parameters requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulateRequest {
    #[serde(
        rename = "L",
        default = "default_inductance",
        deserialize_with = "number_or_string"
    )]
    pub inductance_h: f64,
    #[serde(
        rename = "C",
        default = "default_capacitance",
        deserialize_with = "number_or_string"
    )]
    pub capacitance_f: f64,
}

impl Default for SimulateRequest {
    fn default() -> Self {
        Self {
            inductance_h: DEFAULT_INDUCTANCE_H,
            capacitance_f: DEFAULT_CAPACITANCE_F,
        }
    }
}

impl SimulateRequest {
    pub fn to_params(&self) -> AppResult<PlantParams> {
        Ok(PlantParams::new(self.inductance_h, self.capacitance_f)?)
    }
}

fn default_inductance() -> f64 {
    DEFAULT_INDUCTANCE_H
}

fn default_capacitance() -> f64 {
    DEFAULT_CAPACITANCE_F
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(v) => Ok(v),
        NumberOrString::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("'{text}' is not a number"))),
    }
}

/// Comparison dataset returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulateResponse {
    /// Sample times (ms)
    pub time: Vec<f64>,
    /// Droop reference ("PID") voltages
    pub pid: Vec<f64>,
    /// State-feedback voltages
    pub kks: Vec<f64>,
    /// Gain summary
    pub k_gain: String,
}

impl From<TrajectoryRecord> for SimulateResponse {
    fn from(record: TrajectoryRecord) -> Self {
        Self {
            time: record.time_ms,
            pid: record.reference_v,
            kks: record.feedback_v,
            k_gain: record.gain_label,
        }
    }
}
