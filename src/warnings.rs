//! Weather warning classification and threat assessment
//!
//! Warning feeds carry free-text headlines, so severity and kind are
//! classified by keyword. Ladders run top to bottom, first match wins:
//! "Severe Thunderstorm Warning" classifies as severe, not as a plain
//! warning. The threat check turns the active set into a single
//! [`Decision`] for the dashboard.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decision::Decision;

/// Warning severity tier, ordered least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningSeverity {
    /// Could not be classified from the headline
    Unknown,
    /// Watch or advisory
    Minor,
    /// Plain warning
    Moderate,
    /// Severe or dangerous conditions
    Severe,
    /// Extreme or emergency level
    Extreme,
}

impl WarningSeverity {
    /// Wire name, e.g. `SEVERE`
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningSeverity::Unknown => "UNKNOWN",
            WarningSeverity::Minor => "MINOR",
            WarningSeverity::Moderate => "MODERATE",
            WarningSeverity::Severe => "SEVERE",
            WarningSeverity::Extreme => "EXTREME",
        }
    }

    /// Severe and extreme warnings ground the aircraft and park the rig.
    #[must_use]
    pub fn is_dangerous(&self) -> bool {
        matches!(self, WarningSeverity::Severe | WarningSeverity::Extreme)
    }
}

impl fmt::Display for WarningSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a warning is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningKind {
    Storm,
    Flood,
    Fire,
    Wind,
    Heat,
    Frost,
    Other,
}

/// A currently active weather warning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveWarning {
    /// Classified severity tier
    pub severity: WarningSeverity,
    /// Classified subject
    pub kind: WarningKind,
    /// Headline text as received from the feed
    pub headline: String,
}

impl ActiveWarning {
    /// Build a warning from a feed headline, classifying severity and kind.
    #[must_use]
    pub fn from_headline<S: Into<String>>(headline: S) -> Self {
        let headline = headline.into();
        Self {
            severity: classify_severity(&headline),
            kind: classify_kind(&headline),
            headline,
        }
    }
}

/// Classify warning severity from a headline.
#[must_use]
pub fn classify_severity(headline: &str) -> WarningSeverity {
    let h = headline.to_lowercase();
    if h.contains("extreme") || h.contains("emergency") {
        return WarningSeverity::Extreme;
    }
    if h.contains("severe") || h.contains("dangerous") {
        return WarningSeverity::Severe;
    }
    if h.contains("warning") {
        return WarningSeverity::Moderate;
    }
    if h.contains("watch") || h.contains("advisory") {
        return WarningSeverity::Minor;
    }
    WarningSeverity::Unknown
}

/// Classify what a warning is about from its headline.
#[must_use]
pub fn classify_kind(headline: &str) -> WarningKind {
    let h = headline.to_lowercase();
    if h.contains("storm") || h.contains("thunder") {
        return WarningKind::Storm;
    }
    if h.contains("flood") {
        return WarningKind::Flood;
    }
    if h.contains("fire") {
        return WarningKind::Fire;
    }
    if h.contains("wind") || h.contains("gale") {
        return WarningKind::Wind;
    }
    if h.contains("heat") {
        return WarningKind::Heat;
    }
    if h.contains("frost") {
        return WarningKind::Frost;
    }
    WarningKind::Other
}

/// The worst severity among the active warnings, if any.
#[must_use]
pub fn highest_severity(warnings: &[ActiveWarning]) -> Option<WarningSeverity> {
    warnings.iter().map(|w| w.severity).max()
}

/// Collapse the active warning set to one decision.
///
/// A severe or extreme warning anywhere in the set is a NO_GO; anything
/// milder is a CAUTION; an empty set is all clear.
#[must_use]
pub fn assess_threat(warnings: &[ActiveWarning]) -> Decision {
    let count = warnings.len();
    let plural = if count == 1 { "" } else { "s" };
    let decision = match highest_severity(warnings) {
        Some(highest) if highest.is_dangerous() => Decision::no_go(format!(
            "{count} active warning{plural} — {}",
            highest.as_str()
        )),
        Some(_) => Decision::caution(format!("{count} minor warning{plural}")),
        None => Decision::go("No active warnings"),
    };
    debug!("threat assessment: {} ({})", decision.verdict, decision.reason);
    decision
}
