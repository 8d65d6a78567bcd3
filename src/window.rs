//! GO / CAUTION window scanning
//!
//! Walks an hourly series, assesses every slot, and folds consecutive
//! flyable or workable hours into [`Window`]s. A NO_GO hour closes the
//! current run at the previous slot; a CAUTION hour inside a GO run
//! downgrades the whole window to CAUTION. The same scan drives both
//! the flight and the spray finder, they differ only in evaluator and
//! summary line.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decision::{Decision, Verdict};
use crate::derive::fmt_value;
use crate::rules::farm::{FarmConditions, SprayAssessment, SprayLimits, assess_spray};
use crate::rules::flight::{FlightAssessment, FlightConditions, FlightLimits, assess_flight};
use crate::series::HourlySlot;

/// A contiguous run of non-NO_GO hours
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Window {
    /// First hour of the run, UTC
    pub start: DateTime<Utc>,
    /// Last hour of the run, UTC
    pub end: DateTime<Utc>,
    /// Worst verdict seen inside the run, GO or CAUTION
    pub verdict: Verdict,
    /// One line describing the run
    pub summary: String,
}

/// Per-slot result the window scan can read an overall decision from
pub trait Assessment {
    /// The aggregate decision for the slot
    fn overall(&self) -> &Decision;
}

impl Assessment for FlightAssessment {
    fn overall(&self) -> &Decision {
        &self.overall
    }
}

impl Assessment for SprayAssessment {
    fn overall(&self) -> &Decision {
        &self.overall
    }
}

/// A window still being extended by the scan
struct OpenRun<A> {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    verdict: Verdict,
    assessments: Vec<A>,
}

impl<A> OpenRun<A> {
    fn close(self, summary: String) -> Window {
        Window {
            start: self.start,
            end: self.end,
            verdict: self.verdict,
            summary,
        }
    }
}

fn scan_windows<C, A, E, S>(slots: &[HourlySlot<C>], evaluate: E, summarize: S) -> Vec<Window>
where
    A: Assessment,
    E: Fn(&C) -> A,
    S: Fn(&OpenRun<A>) -> String,
{
    let mut windows = Vec::new();
    let mut run: Option<OpenRun<A>> = None;

    for slot in slots {
        let assessment = evaluate(&slot.conditions);
        let verdict = assessment.overall().verdict;

        if verdict.is_no_go() {
            if let Some(open) = run.take() {
                let summary = summarize(&open);
                windows.push(open.close(summary));
            }
        } else {
            match run.as_mut() {
                Some(open) => {
                    open.end = slot.time;
                    open.verdict = open.verdict.worst(verdict);
                    open.assessments.push(assessment);
                }
                None => {
                    run = Some(OpenRun {
                        start: slot.time,
                        end: slot.time,
                        verdict,
                        assessments: vec![assessment],
                    });
                }
            }
        }
    }

    if let Some(open) = run {
        let summary = summarize(&open);
        windows.push(open.close(summary));
    }

    windows
}

/// Find flyable windows in an hourly forecast series.
#[must_use]
pub fn find_flight_windows(
    slots: &[HourlySlot<FlightConditions>],
    limits: &FlightLimits,
) -> Vec<Window> {
    let windows = scan_windows(
        slots,
        |conditions| assess_flight(conditions, limits),
        flight_summary,
    );
    debug!(
        "found {} flight window(s) in {} slot(s)",
        windows.len(),
        slots.len()
    );
    windows
}

/// Find sprayable windows in an hourly forecast series.
#[must_use]
pub fn find_spray_windows(
    slots: &[HourlySlot<FarmConditions>],
    limits: &SprayLimits,
) -> Vec<Window> {
    let windows = scan_windows(
        slots,
        |conditions| assess_spray(conditions, limits),
        spray_summary,
    );
    debug!(
        "found {} spray window(s) in {} slot(s)",
        windows.len(),
        slots.len()
    );
    windows
}

fn flight_summary(run: &OpenRun<FlightAssessment>) -> String {
    let Some(first) = run.assessments.first() else {
        return String::new();
    };
    let count = run.assessments.len() as f64;
    let avg_crosswind = run
        .assessments
        .iter()
        .map(|a| a.runway.crosswind_kts)
        .sum::<f64>()
        / count;
    let max_gust_factor = run
        .assessments
        .iter()
        .map(|a| a.details.gust_factor)
        .fold(f64::NEG_INFINITY, f64::max);
    format!(
        "RWY {}, avg crosswind {}kt, max gust factor {}",
        first.runway.id,
        avg_crosswind.round() as i64,
        fmt_value(max_gust_factor)
    )
}

fn spray_summary(run: &OpenRun<SprayAssessment>) -> String {
    format!(
        "Spray window {}–{}",
        run.start.format("%H:%M"),
        run.end.format("%H:%M")
    )
}
