//! Hourly series helpers
//!
//! Forecast feeds arrive as flat hourly arrays. [`HourlySlot`] pairs each
//! hour with its conditions record, and the summation helpers aggregate a
//! numeric field over a bounded span of the series, e.g. rain over the
//! next six hours when filling in a farm conditions record per slot.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// One hour of a forecast or observation series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlySlot<C> {
    /// Start of the hour, UTC
    pub time: DateTime<Utc>,
    /// Conditions for that hour
    pub conditions: C,
}

/// Sum a value over the slots up to `hours` after `from`.
///
/// Both endpoints are inclusive. Slots outside the span contribute
/// nothing; an empty series sums to zero.
#[must_use]
pub fn sum_next_hours<C, F>(
    slots: &[HourlySlot<C>],
    from: DateTime<Utc>,
    hours: i64,
    value: F,
) -> f64
where
    F: Fn(&C) -> f64,
{
    let until = from + Duration::hours(hours);
    slots
        .iter()
        .filter(|slot| slot.time >= from && slot.time <= until)
        .map(|slot| value(&slot.conditions))
        .sum()
}

/// Sum a value over the slots up to `hours` before `until`.
///
/// Both endpoints are inclusive, mirroring [`sum_next_hours`].
#[must_use]
pub fn sum_past_hours<C, F>(
    slots: &[HourlySlot<C>],
    until: DateTime<Utc>,
    hours: i64,
    value: F,
) -> f64
where
    F: Fn(&C) -> f64,
{
    let from = until - Duration::hours(hours);
    slots
        .iter()
        .filter(|slot| slot.time >= from && slot.time <= until)
        .map(|slot| value(&slot.conditions))
        .sum()
}
