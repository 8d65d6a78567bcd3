//! Farm operation rules
//!
//! Spray, field access, and hay assessments, all binary-first and all
//! driven by one shared conditions record. Spray folds three sub-checks
//! (wind, drift, rain washoff) the same way the flight evaluator does;
//! field access and hay are single ladders.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decision::{Cascade, Decision, RiskLevel, Verdict, worst_of};
use crate::derive::{field_bog_risk, spray_drift_risk};

/// Snapshot of measured or forecast conditions for farm work
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarmConditions {
    /// Sustained wind speed in km/h
    pub wind_speed_kmh: f64,
    /// Gust speed in km/h
    pub wind_gust_kmh: f64,
    /// Air temperature in °C
    pub temp_c: f64,
    /// Dewpoint in °C
    pub dewpoint_c: f64,
    /// Precipitation in the current hour, mm
    pub precipitation_mm: f64,
    /// Trailing 24-hour rainfall total, mm
    pub rainfall_24h_mm: f64,
    /// Forecast rainfall over the next 6 hours, mm
    pub forecast_rain_next_6h_mm: f64,
    /// Total cloud cover, percent
    pub cloud_cover_pct: f64,
    /// Relative humidity, percent
    pub humidity_pct: f64,
}

/// Tunable limits for the spray evaluator
///
/// Deserializes with per-field defaults, so a persisted override may name
/// only the fields it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SprayLimits {
    /// Maximum wind speed in km/h
    pub max_wind_kmh: f64,
    /// Minimum wind speed in km/h; below this, inversion risk
    pub min_wind_kmh: f64,
    /// Upper delta-T bound for spraying, °C
    pub max_delta_t: f64,
    /// Lower delta-T bound for spraying, °C
    pub min_delta_t: f64,
    /// Rain-free hours wanted after application; not consumed by any
    /// current rule
    pub rain_free_hours: u32,
}

impl Default for SprayLimits {
    fn default() -> Self {
        Self {
            max_wind_kmh: 15.0,
            min_wind_kmh: 3.0,
            max_delta_t: 10.0,
            min_delta_t: 2.0,
            rain_free_hours: 4,
        }
    }
}

/// Derived figures carried alongside the spray sub-decisions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SprayDetails {
    /// Delta-T approximated as the temperature/dewpoint spread, °C
    pub delta_t: f64,
    /// Drift risk tier
    pub drift_risk: RiskLevel,
}

/// Multi-factor spray assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SprayAssessment {
    /// Aggregate decision
    pub overall: Decision,
    /// Wind speed and gust check
    pub wind: Decision,
    /// Drift risk check
    pub drift: Decision,
    /// Rain washoff check
    pub rain: Decision,
    /// Derived numeric details
    pub details: SprayDetails,
}

/// Assess spraying conditions against the given limits.
///
/// Sub-checks run in wind, drift, rain order; the overall verdict is the
/// worst of them with the first worst reason.
#[must_use]
pub fn assess_spray(conditions: &FarmConditions, limits: &SprayLimits) -> SprayAssessment {
    let drift_risk = spray_drift_risk(
        conditions.wind_speed_kmh,
        conditions.temp_c,
        conditions.dewpoint_c,
    );
    let delta_t = conditions.temp_c - conditions.dewpoint_c;

    let wind = check_spray_wind(conditions, limits);
    let drift = Decision::new(drift_risk.level.verdict(), drift_risk.reason.clone());
    let rain = check_spray_rain(conditions);

    let overall = worst_of(
        &[&wind, &drift, &rain],
        Decision::go("Spray conditions are good — get it done"),
    );
    debug!("spray assessment: {} ({})", overall.verdict, overall.reason);

    SprayAssessment {
        overall,
        wind,
        drift,
        rain,
        details: SprayDetails {
            delta_t,
            drift_risk: drift_risk.level,
        },
    }
}

fn check_spray_wind(conditions: &FarmConditions, limits: &SprayLimits) -> Decision {
    let wind = conditions.wind_speed_kmh;
    let gust = conditions.wind_gust_kmh;
    Cascade::new()
        .step(
            wind > limits.max_wind_kmh || gust > limits.max_wind_kmh * 1.3,
            Verdict::NoGo,
            format!("Wind {wind} km/h (gusts {gust}) — too windy to spray"),
        )
        .step(
            wind < limits.min_wind_kmh,
            Verdict::NoGo,
            format!("Wind {wind} km/h — inversion conditions, spray will hang"),
        )
        .step(
            wind > limits.max_wind_kmh * 0.8,
            Verdict::Caution,
            format!("Wind {wind} km/h — approaching limit"),
        )
        .otherwise(format!("Wind {wind} km/h within spray window"))
}

fn check_spray_rain(conditions: &FarmConditions) -> Decision {
    let forecast = conditions.forecast_rain_next_6h_mm;
    Cascade::new()
        .step(
            conditions.precipitation_mm > 0.5,
            Verdict::NoGo,
            "Active rain — spray will wash off",
        )
        .step(
            forecast > 5.0,
            Verdict::NoGo,
            format!("{forecast}mm forecast in 6h — spray won't hold"),
        )
        .step(
            forecast > 1.0,
            Verdict::Caution,
            format!("{forecast}mm possible in 6h — check timing"),
        )
        .otherwise("No rain expected in spray window")
}

/// Derived figures carried alongside the field access decision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldAccessDetails {
    /// Trailing 24-hour rainfall total, mm
    pub rainfall_24h_mm: f64,
    /// Bog risk tier
    pub bog_risk: RiskLevel,
}

/// Whether paddocks will take machinery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldAccessAssessment {
    /// Aggregate decision
    pub overall: Decision,
    /// Derived numeric details
    pub details: FieldAccessDetails,
}

/// Assess whether paddocks will carry machinery, from recent rainfall.
#[must_use]
pub fn assess_field_access(conditions: &FarmConditions) -> FieldAccessAssessment {
    let bog = field_bog_risk(conditions.rainfall_24h_mm);
    let overall = match bog.level {
        RiskLevel::High => Decision::no_go(bog.reason),
        RiskLevel::Moderate => Decision::caution(bog.reason),
        RiskLevel::Low => Decision::go("Ground firm — drive on"),
    };
    debug!("field access: {} ({})", overall.verdict, overall.reason);

    FieldAccessAssessment {
        overall,
        details: FieldAccessDetails {
            rainfall_24h_mm: conditions.rainfall_24h_mm,
            bog_risk: bog.level,
        },
    }
}

/// Hay-cutting assessment: an overall decision plus a short label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HayAssessment {
    /// Aggregate decision
    pub overall: Decision,
    /// Short label for compact display
    pub reason: String,
}

/// Assess hay cutting and curing conditions.
///
/// An ordered ladder evaluated top to bottom; the first matching clause
/// wins.
#[must_use]
pub fn assess_hay(conditions: &FarmConditions) -> HayAssessment {
    let assessment = check_hay(conditions);
    debug!(
        "hay assessment: {} ({})",
        assessment.overall.verdict, assessment.overall.reason
    );
    assessment
}

fn check_hay(conditions: &FarmConditions) -> HayAssessment {
    let ladder = [
        (
            conditions.precipitation_mm > 0.0 || conditions.forecast_rain_next_6h_mm > 2.0,
            Verdict::NoGo,
            "Rain active or imminent — hay will spoil".to_string(),
            "Rain active or imminent",
        ),
        (
            conditions.humidity_pct > 70.0,
            Verdict::Caution,
            format!(
                "Humidity {}% — hay may not dry properly",
                conditions.humidity_pct
            ),
            "High humidity",
        ),
        (
            conditions.forecast_rain_next_6h_mm > 0.5,
            Verdict::Caution,
            "Light rain possible — monitor closely".to_string(),
            "Light rain possible",
        ),
    ];

    for (triggered, verdict, reason, label) in ladder {
        if triggered {
            return HayAssessment {
                overall: Decision::new(verdict, reason),
                reason: label.to_string(),
            };
        }
    }
    HayAssessment {
        overall: Decision::go("Dry and clear — good hay conditions"),
        reason: "Conditions clear".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_conditions() -> FarmConditions {
        FarmConditions {
            wind_speed_kmh: 8.0,
            wind_gust_kmh: 10.0,
            temp_c: 18.0,
            dewpoint_c: 14.0,
            precipitation_mm: 0.0,
            rainfall_24h_mm: 0.0,
            forecast_rain_next_6h_mm: 0.0,
            cloud_cover_pct: 30.0,
            humidity_pct: 60.0,
        }
    }

    #[test]
    fn test_good_spray_day() {
        let assessment = assess_spray(&create_test_conditions(), &SprayLimits::default());

        assert_eq!(assessment.overall.verdict, Verdict::Go);
        assert_eq!(
            assessment.overall.reason,
            "Spray conditions are good — get it done"
        );
        assert_eq!(assessment.wind.reason, "Wind 8 km/h within spray window");
        assert_eq!(assessment.drift.reason, "Conditions within ideal spray window");
        assert_eq!(assessment.rain.reason, "No rain expected in spray window");
        assert_eq!(assessment.details.delta_t, 4.0);
        assert_eq!(assessment.details.drift_risk, RiskLevel::Low);
    }

    #[test]
    fn test_too_windy_to_spray() {
        let mut conditions = create_test_conditions();
        conditions.wind_speed_kmh = 16.0;

        let assessment = assess_spray(&conditions, &SprayLimits::default());

        assert_eq!(assessment.wind.verdict, Verdict::NoGo);
        assert_eq!(
            assessment.wind.reason,
            "Wind 16 km/h (gusts 10) — too windy to spray"
        );
        // drift flags the same wind, but the wind check comes first
        assert_eq!(assessment.drift.verdict, Verdict::NoGo);
        assert_eq!(assessment.overall.reason, assessment.wind.reason);
    }

    #[test]
    fn test_gusts_alone_stop_spraying() {
        let mut conditions = create_test_conditions();
        conditions.wind_speed_kmh = 10.0;
        conditions.wind_gust_kmh = 21.0; // over 1.3x the 15 km/h limit

        let assessment = assess_spray(&conditions, &SprayLimits::default());

        assert_eq!(assessment.wind.verdict, Verdict::NoGo);
        assert_eq!(
            assessment.wind.reason,
            "Wind 10 km/h (gusts 21) — too windy to spray"
        );
    }

    #[test]
    fn test_inversion_conditions() {
        let mut conditions = create_test_conditions();
        conditions.wind_speed_kmh = 2.0;

        let assessment = assess_spray(&conditions, &SprayLimits::default());

        assert_eq!(assessment.overall.verdict, Verdict::NoGo);
        assert_eq!(
            assessment.overall.reason,
            "Wind 2 km/h — inversion conditions, spray will hang"
        );
    }

    #[test]
    fn test_wind_approaching_limit_is_caution() {
        let mut conditions = create_test_conditions();
        conditions.wind_speed_kmh = 13.0;

        let assessment = assess_spray(&conditions, &SprayLimits::default());

        assert_eq!(assessment.wind.verdict, Verdict::Caution);
        assert_eq!(assessment.overall.verdict, Verdict::Caution);
        assert_eq!(assessment.overall.reason, "Wind 13 km/h — approaching limit");
    }

    #[test]
    fn test_rain_washoff_tiers() {
        let mut conditions = create_test_conditions();

        conditions.precipitation_mm = 1.0;
        let assessment = assess_spray(&conditions, &SprayLimits::default());
        assert_eq!(assessment.rain.verdict, Verdict::NoGo);
        assert_eq!(assessment.rain.reason, "Active rain — spray will wash off");

        conditions.precipitation_mm = 0.0;
        conditions.forecast_rain_next_6h_mm = 6.0;
        let assessment = assess_spray(&conditions, &SprayLimits::default());
        assert_eq!(assessment.rain.verdict, Verdict::NoGo);
        assert_eq!(assessment.rain.reason, "6mm forecast in 6h — spray won't hold");

        conditions.forecast_rain_next_6h_mm = 3.0;
        let assessment = assess_spray(&conditions, &SprayLimits::default());
        assert_eq!(assessment.rain.verdict, Verdict::Caution);
        assert_eq!(assessment.rain.reason, "3mm possible in 6h — check timing");
    }

    #[test]
    fn test_spray_overall_is_worst_sub_decision() {
        let mut conditions = create_test_conditions();
        conditions.wind_speed_kmh = 13.0; // wind CAUTION, drift MODERATE
        conditions.forecast_rain_next_6h_mm = 6.0; // rain NO_GO

        let assessment = assess_spray(&conditions, &SprayLimits::default());

        let worst = [&assessment.wind, &assessment.drift, &assessment.rain]
            .iter()
            .map(|d| d.verdict)
            .max()
            .unwrap();
        assert_eq!(assessment.overall.verdict, worst);
        assert_eq!(assessment.overall.reason, assessment.rain.reason);
    }

    #[test]
    fn test_field_access_tiers() {
        let mut conditions = create_test_conditions();

        conditions.rainfall_24h_mm = 25.0;
        let assessment = assess_field_access(&conditions);
        assert_eq!(assessment.overall.verdict, Verdict::NoGo);
        assert_eq!(
            assessment.overall.reason,
            "25mm in 24h — paddocks will be boggy"
        );
        assert_eq!(assessment.details.bog_risk, RiskLevel::High);

        conditions.rainfall_24h_mm = 15.0;
        let assessment = assess_field_access(&conditions);
        assert_eq!(assessment.overall.verdict, Verdict::Caution);
        assert_eq!(
            assessment.overall.reason,
            "15mm in 24h — soft patches likely"
        );

        conditions.rainfall_24h_mm = 5.0;
        let assessment = assess_field_access(&conditions);
        assert_eq!(assessment.overall.verdict, Verdict::Go);
        // firm ground gets the drive-on message, not the risk reason
        assert_eq!(assessment.overall.reason, "Ground firm — drive on");
    }

    #[test]
    fn test_hay_rain_blocks() {
        let mut conditions = create_test_conditions();
        conditions.precipitation_mm = 0.2;

        let assessment = assess_hay(&conditions);
        assert_eq!(assessment.overall.verdict, Verdict::NoGo);
        assert_eq!(
            assessment.overall.reason,
            "Rain active or imminent — hay will spoil"
        );
        assert_eq!(assessment.reason, "Rain active or imminent");

        conditions.precipitation_mm = 0.0;
        conditions.forecast_rain_next_6h_mm = 3.0;
        let assessment = assess_hay(&conditions);
        assert_eq!(assessment.overall.verdict, Verdict::NoGo);
    }

    #[test]
    fn test_hay_humidity_before_light_rain() {
        let mut conditions = create_test_conditions();
        conditions.humidity_pct = 80.0;
        conditions.forecast_rain_next_6h_mm = 1.0; // both clauses apply

        let assessment = assess_hay(&conditions);
        assert_eq!(assessment.overall.verdict, Verdict::Caution);
        assert_eq!(
            assessment.overall.reason,
            "Humidity 80% — hay may not dry properly"
        );
        assert_eq!(assessment.reason, "High humidity");
    }

    #[test]
    fn test_hay_light_rain_watch() {
        let mut conditions = create_test_conditions();
        conditions.forecast_rain_next_6h_mm = 1.0;

        let assessment = assess_hay(&conditions);
        assert_eq!(assessment.overall.verdict, Verdict::Caution);
        assert_eq!(assessment.reason, "Light rain possible");
    }

    #[test]
    fn test_hay_clear_day() {
        let assessment = assess_hay(&create_test_conditions());
        assert_eq!(assessment.overall.verdict, Verdict::Go);
        assert_eq!(
            assessment.overall.reason,
            "Dry and clear — good hay conditions"
        );
        assert_eq!(assessment.reason, "Conditions clear");
    }

    #[test]
    fn test_spray_limits_default() {
        let limits = SprayLimits::default();
        assert_eq!(limits.max_wind_kmh, 15.0);
        assert_eq!(limits.min_wind_kmh, 3.0);
        assert_eq!(limits.max_delta_t, 10.0);
        assert_eq!(limits.min_delta_t, 2.0);
        assert_eq!(limits.rain_free_hours, 4);
    }

    #[test]
    fn test_spray_limits_partial_override() {
        let limits: SprayLimits = serde_json::from_str(r#"{"max_wind_kmh": 12.0}"#).unwrap();
        assert_eq!(limits.max_wind_kmh, 12.0);
        assert_eq!(limits.min_wind_kmh, 3.0);
        assert_eq!(limits.rain_free_hours, 4);
    }
}
