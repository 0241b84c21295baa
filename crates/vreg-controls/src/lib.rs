//! Controllers for the LC output-voltage regulation loop.
//!
//! Two strategies regulate the same plant side by side:
//! - **State feedback**: a static 1×2 gain acting on `[inductor_current, capacitor_voltage]`,
//!   produced by a pluggable [`GainStrategy`] and saturated by [`ActuatorLimits`]
//! - **Droop reference**: a fixed heuristic PI-style regulator with load droop, evolved on its
//!   own scalar voltage and used as the comparison baseline
//!
//! # Design Principles
//!
//! - **Gain isolation**: the gain formula sits behind [`GainStrategy::compute_gain`], so the
//!   placeholder can be replaced without touching any integration loop
//! - **Stateless laws**: controllers take state in and hand state back; nothing is cached

pub mod actuator;
pub mod error;
pub mod feedback;
pub mod gain;
pub mod reference;

pub use actuator::ActuatorLimits;
pub use error::{ControlError, ControlResult};
pub use feedback::{CurrentReference, StateFeedbackController};
pub use gain::{FeedbackGain, GainStrategy, LiftedSpaceGain};
pub use reference::{DroopReference, DroopReferenceState};
