//! Simulation options files (YAML).

use std::path::Path;
use vreg_sim::SimOptions;

use crate::error::{AppError, AppResult};

/// Parse and validate options from YAML text. Absent fields take their defaults.
pub fn parse_options(content: &str) -> AppResult<SimOptions> {
    let options: SimOptions = serde_yaml::from_str(content)
        .map_err(|e| AppError::Config(format!("Failed to parse options YAML: {}", e)))?;
    options
        .validate()
        .map_err(|e| AppError::Config(e.to_string()))?;
    Ok(options)
}

/// Load options from a YAML file.
pub fn load_options(path: &Path) -> AppResult<SimOptions> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::ConfigFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_options(&content)
}

/// Render options as YAML text.
pub fn options_yaml(options: &SimOptions) -> AppResult<String> {
    serde_yaml::to_string(options)
        .map_err(|e| AppError::Config(format!("Failed to serialize options: {}", e)))
}

/// Save options to a YAML file.
pub fn save_options(path: &Path, options: &SimOptions) -> AppResult<()> {
    let content = options_yaml(options)?;

    std::fs::write(path, content).map_err(|e| AppError::ConfigFileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
