//! Error types for the vreg-app service layer.

use serde::Serialize;
use std::path::PathBuf;
use vreg_sim::SimError;

/// Application error type shared by every front end.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Failed to read options file: {path}")]
    ConfigFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write options file: {path}")]
    ConfigFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Options error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for vreg-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Stable machine-readable failure code.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::Simulation(_) => "simulation_failed",
            AppError::ConfigFileRead { .. }
            | AppError::ConfigFileWrite { .. }
            | AppError::Config(_) => "config_error",
            AppError::Serialize(_) | AppError::Io(_) => "internal",
        }
    }
}

// Bad plant parameters or options are the caller's fault; divergence is not.
impl From<SimError> for AppError {
    fn from(err: SimError) -> Self {
        match err {
            SimError::InvalidArg { .. } | SimError::Parameter(_) => {
                AppError::InvalidInput(err.to_string())
            }
            SimError::NonFinite { .. } | SimError::Control(_) => {
                AppError::Simulation(err.to_string())
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    message: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse<'a> {
    error: ErrorBody<'a>,
}

/// JSON failure payload: `{"error": {"code": ..., "message": ...}}`.
pub fn error_body(err: &AppError) -> String {
    let response = ErrorResponse {
        error: ErrorBody {
            code: err.code(),
            message: err.to_string(),
        },
    };
    serde_json::to_string(&response).unwrap_or_else(|_| {
        format!(
            "{{\"error\":{{\"code\":\"{}\",\"message\":\"unserializable error\"}}}}",
            err.code()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use vreg_core::CoreError;

    #[test]
    fn parameter_errors_are_invalid_input() {
        let err: AppError = SimError::Parameter(CoreError::NotPositive {
            what: "inductance",
            value: 0.0,
        })
        .into();
        assert_eq!(err.code(), "invalid_input");
        assert!(err.to_string().contains("inductance"));
    }

    #[test]
    fn divergence_is_simulation_failure() {
        let err: AppError = SimError::NonFinite {
            what: "capacitor voltage",
            step: 42,
        }
        .into();
        assert_eq!(err.code(), "simulation_failed");
    }

    #[test]
    fn error_body_is_json() {
        let err = AppError::InvalidInput("L must be a number".to_string());
        let body: serde_json::Value = serde_json::from_str(&error_body(&err)).unwrap();
        assert_eq!(body["error"]["code"], "invalid_input");
        assert_eq!(
            body["error"]["message"],
            "Invalid input: L must be a number"
        );
    }
}
