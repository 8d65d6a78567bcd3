//! Verdict and decision primitives
//!
//! Every evaluator in the engine speaks the same three-value language:
//! GO, CAUTION, or NO-GO, always paired with a human-readable reason.
//! This module holds that vocabulary plus the two aggregation helpers the
//! rule evaluators share.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Overall judgement for an operation, ordered by severity
///
/// The derived ordering puts `NoGo` above `Caution` above `Go`, so the
/// worst of two verdicts is simply their maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// Conditions are inside every limit
    Go,
    /// Workable but degraded; the reason says what to watch
    Caution,
    /// At least one hard limit is breached
    NoGo,
}

impl Verdict {
    /// Wire-format name, matching the serialized form
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Go => "GO",
            Verdict::Caution => "CAUTION",
            Verdict::NoGo => "NO_GO",
        }
    }

    /// Human-facing label (`NO-GO` rather than `NO_GO`)
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Go => "GO",
            Verdict::Caution => "CAUTION",
            Verdict::NoGo => "NO-GO",
        }
    }

    /// True only for [`Verdict::NoGo`]
    #[must_use]
    pub fn is_no_go(self) -> bool {
        self == Verdict::NoGo
    }

    /// The more severe of two verdicts
    #[must_use]
    pub fn worst(self, other: Self) -> Self {
        self.max(other)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Verdict {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GO" => Ok(Verdict::Go),
            "CAUTION" => Ok(Verdict::Caution),
            "NO_GO" | "NO-GO" => Ok(Verdict::NoGo),
            other => Err(ParseError::verdict(other)),
        }
    }
}

/// A verdict plus the reason behind it
///
/// The atomic output unit of the engine: every sub-check and every overall
/// assessment is one of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    /// The judgement
    pub verdict: Verdict,
    /// Human-readable explanation shown to the operator
    pub reason: String,
}

impl Decision {
    /// Create a decision with an explicit verdict
    pub fn new<S: Into<String>>(verdict: Verdict, reason: S) -> Self {
        Self {
            verdict,
            reason: reason.into(),
        }
    }

    /// Create a GO decision
    pub fn go<S: Into<String>>(reason: S) -> Self {
        Self::new(Verdict::Go, reason)
    }

    /// Create a CAUTION decision
    pub fn caution<S: Into<String>>(reason: S) -> Self {
        Self::new(Verdict::Caution, reason)
    }

    /// Create a NO-GO decision
    pub fn no_go<S: Into<String>>(reason: S) -> Self {
        Self::new(Verdict::NoGo, reason)
    }
}

/// Fold an ordered list of sub-decisions into one overall decision.
///
/// Returns the first NO-GO in the list; failing that, the first CAUTION;
/// failing that, the supplied all-clear decision. Callers pass their
/// sub-checks in the fixed evaluation order, which is what determines the
/// reason string the operator ends up seeing.
#[must_use]
pub fn worst_of(checks: &[&Decision], all_clear: Decision) -> Decision {
    if let Some(no_go) = checks.iter().find(|d| d.verdict == Verdict::NoGo) {
        return (*no_go).clone();
    }
    if let Some(caution) = checks.iter().find(|d| d.verdict == Verdict::Caution) {
        return (*caution).clone();
    }
    all_clear
}

/// Categorical risk shared by the fog, spray-drift, and bog derivations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    High,
    Moderate,
    Low,
}

impl RiskLevel {
    /// Wire-format name, matching the serialized form
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "HIGH",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::Low => "LOW",
        }
    }

    /// Map the risk tier onto the verdict scale
    #[must_use]
    pub fn verdict(self) -> Verdict {
        match self {
            RiskLevel::High => Verdict::NoGo,
            RiskLevel::Moderate => Verdict::Caution,
            RiskLevel::Low => Verdict::Go,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HIGH" => Ok(RiskLevel::High),
            "MODERATE" => Ok(RiskLevel::Moderate),
            "LOW" => Ok(RiskLevel::Low),
            other => Err(ParseError::risk_level(other)),
        }
    }
}

/// A risk tier plus the reason behind it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Categorical tier
    pub level: RiskLevel,
    /// Human-readable explanation
    pub reason: String,
}

/// Ordered first-match rule ladder producing a [`Decision`].
///
/// Steps are declared in evaluation order; the first triggered step fixes
/// the decision and every later step is ignored. Each threshold table in
/// the rule evaluators reads as one flat ladder.
#[derive(Debug, Default)]
pub(crate) struct Cascade {
    hit: Option<Decision>,
}

impl Cascade {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add one (condition, verdict, reason) step
    pub(crate) fn step<S: Into<String>>(
        mut self,
        triggered: bool,
        verdict: Verdict,
        reason: S,
    ) -> Self {
        if self.hit.is_none() && triggered {
            self.hit = Some(Decision::new(verdict, reason));
        }
        self
    }

    /// Close the ladder with a GO fallback
    pub(crate) fn otherwise<S: Into<String>>(self, reason: S) -> Decision {
        self.hit.unwrap_or_else(|| Decision::go(reason))
    }
}
