//! Request handling: parse, simulate, serialise.

use tracing::{debug, warn};
use vreg_sim::{SimOptions, TrajectoryRecord, simulate};

use crate::error::{AppError, AppResult};
use crate::request::{SimulateRequest, SimulateResponse};

/// Parse a JSON request body. An empty body means "all defaults".
pub fn parse_request(body: &str) -> AppResult<SimulateRequest> {
    if body.trim().is_empty() {
        return Ok(SimulateRequest::default());
    }
    serde_json::from_str(body).map_err(|e| AppError::InvalidInput(e.to_string()))
}

/// Full trajectory record for a request, including the diagnostic series.
pub fn run_trajectory(
    request: &SimulateRequest,
    options: &SimOptions,
) -> AppResult<TrajectoryRecord> {
    let params = request.to_params()?;
    debug!(
        inductance_h = params.inductance_h,
        capacitance_f = params.capacitance_f,
        "running request"
    );
    Ok(simulate(&params, options)?)
}

/// Response body for a request.
pub fn run_request(request: &SimulateRequest, options: &SimOptions) -> AppResult<SimulateResponse> {
    run_trajectory(request, options).map(SimulateResponse::from)
}

/// JSON in, JSON out. Failures come back as `Err`, never as a partial body.
pub fn handle_request_json(body: &str, options: &SimOptions) -> AppResult<String> {
    let result = parse_request(body)
        .and_then(|request| run_request(&request, options))
        .and_then(|response| {
            serde_json::to_string(&response).map_err(|e| AppError::Serialize(e.to_string()))
        });
    if let Err(err) = &result {
        warn!(code = err.code(), error = %err, "request failed");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_runs_defaults() {
        let request = parse_request("  \n").unwrap();
        assert_eq!(request, SimulateRequest::default());
    }

    #[test]
    fn malformed_json_is_invalid_input() {
        let err = parse_request("{\"L\": ").unwrap_err();
        assert_eq!(err.code(), "invalid_input");
        let err = parse_request("[1, 2]").unwrap_err();
        assert_eq!(err.code(), "invalid_input");
    }

    #[test]
    fn response_sequences_match_step_count() {
        let options = SimOptions {
            steps: 240,
            ..SimOptions::default()
        };
        let response = run_request(&SimulateRequest::default(), &options).unwrap();
        assert_eq!(response.time.len(), 240);
        assert_eq!(response.pid.len(), 240);
        assert_eq!(response.kks.len(), 240);
        assert_eq!(response.k_gain, "[25.00, 0.10] (lifted-space placeholder)");
    }

    #[test]
    fn zero_capacitance_is_rejected() {
        let err = handle_request_json(r#"{"C": 0}"#, &SimOptions::default()).unwrap_err();
        assert_eq!(err.code(), "invalid_input");
    }
}
