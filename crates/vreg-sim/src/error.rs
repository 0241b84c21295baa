//! Error types for simulation operations.

use thiserror::Error;
use vreg_controls::ControlError;
use vreg_core::CoreError;

/// Errors encountered during transient simulation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Invalid parameter: {0}")]
    Parameter(#[from] CoreError),

    #[error("Non-finite {what} at step {step}")]
    NonFinite { what: &'static str, step: usize },

    #[error("Controller error: {0}")]
    Control(#[from] ControlError),
}

pub type SimResult<T> = Result<T, SimError>;
