//! vreg-core: shared foundation for the voltage regulation workspace.
//!
//! Contains:
//! - units (uom SI types for the electrical plant + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use units::*;
