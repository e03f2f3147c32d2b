//! Common utilities module
//!
//! This module contains the error taxonomy, structural warnings and the run
//! report shared by every asset step.

pub mod error;
pub mod report;
pub mod warning;

pub use error::{ConversionError, FailureReason, Result};
pub use report::{RunReport, StepOutcome, StepReport, Timer};
pub use warning::StructuralWarning;
