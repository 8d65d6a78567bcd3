//! Rule evaluators
//!
//! Per-domain threshold rules that turn condition snapshots into
//! multi-factor assessments:
//! - Flight: six sub-checks against configurable aircraft limits
//! - Farm: spray, field access, and hay assessments sharing one
//!   conditions record
//!
//! Every evaluator folds its sub-decisions with the same first-worst
//! aggregation, so the overall verdict always matches the worst sub-check.

pub mod farm;
pub mod flight;

// Re-export commonly used types from submodules
pub use farm::{
    FarmConditions, FieldAccessAssessment, HayAssessment, SprayAssessment, SprayLimits,
    assess_field_access, assess_hay, assess_spray,
};
pub use flight::{
    FlightAssessment, FlightConditions, FlightDetails, FlightLimits, assess_flight,
};
