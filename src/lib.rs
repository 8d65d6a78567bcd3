//! `Skypaddock` - GO / CAUTION / NO-GO decisions for farm strip flying and paddock work
//!
//! This library provides the core functionality for weather-driven
//! operational decisions: pure derivations (crosswind, density altitude,
//! cloud base), rule evaluators for flight and farm operations, weather
//! warning classification, and workable-window scanning over hourly
//! forecast series.

pub mod decision;
pub mod derive;
pub mod error;
pub mod rules;
pub mod series;
pub mod warnings;
pub mod window;

// Re-export core types for public API
pub use decision::{Decision, RiskAssessment, RiskLevel, Verdict, worst_of};
pub use derive::{Runway, RunwayWind, best_runway};
pub use error::ParseError;
pub use rules::{
    FarmConditions, FieldAccessAssessment, FlightAssessment, FlightConditions, FlightLimits,
    HayAssessment, SprayAssessment, SprayLimits, assess_field_access, assess_flight, assess_hay,
    assess_spray,
};
pub use series::{HourlySlot, sum_next_hours, sum_past_hours};
pub use warnings::{ActiveWarning, WarningKind, WarningSeverity, assess_threat, highest_severity};
pub use window::{Window, find_flight_windows, find_spray_windows};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
