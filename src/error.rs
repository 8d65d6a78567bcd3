//! Error types for the `skypaddock` decision engine
//!
//! Evaluation itself never fails: abnormal input is absorbed into
//! decisions and sentinel values. The only fallible surface is parsing
//! wire-format names back into engine enums.

use thiserror::Error;

/// Parse failures at the string boundary of the engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Verdict name not recognized
    #[error("Unknown verdict: {value}")]
    Verdict { value: String },

    /// Risk level name not recognized
    #[error("Unknown risk level: {value}")]
    RiskLevel { value: String },
}

impl ParseError {
    /// Create a verdict parse error
    pub fn verdict<S: Into<String>>(value: S) -> Self {
        Self::Verdict {
            value: value.into(),
        }
    }

    /// Create a risk level parse error
    pub fn risk_level<S: Into<String>>(value: S) -> Self {
        Self::RiskLevel {
            value: value.into(),
        }
    }
}
