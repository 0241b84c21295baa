//! Load-step transient simulation for an LC-filtered inverter.
//!
//! Provides:
//! - LC plant model with load-dependent state matrices
//! - Step load disturbance
//! - Fixed-step forward Euler and RK4 integrators
//! - Side-by-side trajectory of the state-feedback and droop reference controllers

pub mod disturbance;
pub mod error;
pub mod integrator;
pub mod model;
pub mod plant;
pub mod sim;
pub mod trajectory;

// Re-exports for public API
pub use disturbance::StepLoad;
pub use error::{SimError, SimResult};
pub use integrator::{ForwardEuler, Integrator, RK4};
pub use model::TransientModel;
pub use plant::{ClosedLoopPlant, LcPlant, PlantParams};
pub use sim::{IntegratorType, SimOptions};
pub use trajectory::{TrajectoryRecord, simulate, simulate_with_gain};
