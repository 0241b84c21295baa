//! Request adapter and application services for vreg.
//!
//! Transport-neutral glue between callers (the CLI, or any JSON front end) and
//! the trajectory simulator: request/response bodies, options files and
//! controller comparison metrics. No simulation logic lives here.

pub mod error;
pub mod metrics;
pub mod options_service;
pub mod request;
pub mod simulation_service;

// Re-export key types for convenience
pub use error::{AppError, AppResult, error_body};
pub use metrics::{ComparisonSummary, RecoveryMetrics, compare_controllers};
pub use options_service::{load_options, options_yaml, parse_options, save_options};
pub use request::{SimulateRequest, SimulateResponse};
pub use simulation_service::{handle_request_json, parse_request, run_request, run_trajectory};
