//! Flight operation rules
//!
//! Assesses a snapshot of flight conditions against configurable limits.
//! Six sub-checks run in a fixed order (wind, visibility, ceiling, density
//! altitude, fog, precipitation), each a three-tier threshold ladder, and
//! the overall verdict is the worst of them with the first worst reason.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decision::{Cascade, Decision, RiskLevel, Verdict, worst_of};
use crate::derive::{
    Runway, RunwayWind, best_runway, density_altitude, estimate_cloud_base, fmt_value, fog_risk,
    gust_factor,
};

/// Snapshot of measured or forecast conditions for one flight assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightConditions {
    /// Wind direction in degrees true (0-359)
    pub wind_dir_deg: f64,
    /// Sustained wind speed in knots
    pub wind_speed_kts: f64,
    /// Gust speed in knots; at least the sustained speed by convention
    pub gust_speed_kts: f64,
    /// Air temperature in °C
    pub temp_c: f64,
    /// Dewpoint in °C
    pub dewpoint_c: f64,
    /// QNH in hPa
    pub qnh_hpa: f64,
    /// Horizontal visibility in km
    pub visibility_km: f64,
    /// Precipitation in the current hour, mm
    pub precipitation_mm: f64,
    /// Total cloud cover, percent
    pub cloud_cover_pct: f64,
    /// Runways available at the field, in preference order
    pub runways: Vec<Runway>,
    /// Field elevation in metres
    pub field_elevation_m: f64,
}

/// Tunable limits for the flight evaluator, defaulting to figures for a
/// typical light GA aircraft.
///
/// Deserializes with per-field defaults, so a persisted override may name
/// only the fields it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightLimits {
    /// Maximum crosswind component in knots
    pub max_crosswind_kts: f64,
    /// Maximum gust speed in knots
    pub max_gust_kts: f64,
    /// Maximum gust factor before turbulence becomes a concern
    pub max_gust_factor: f64,
    /// Minimum VFR visibility in km
    pub min_visibility_km: f64,
    /// Minimum VFR cloud base in feet
    pub min_cloud_base_ft: i32,
    /// Maximum density altitude in feet
    pub max_density_alt_ft: i32,
    /// Maximum tailwind component in knots
    pub max_tailwind_kts: f64,
}

impl Default for FlightLimits {
    fn default() -> Self {
        Self {
            max_crosswind_kts: 12.0,
            max_gust_kts: 25.0,
            max_gust_factor: 1.5,
            min_visibility_km: 5.0,
            min_cloud_base_ft: 1500,
            max_density_alt_ft: 3000,
            max_tailwind_kts: 5.0,
        }
    }
}

/// Derived figures carried alongside the sub-decisions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightDetails {
    /// Estimated cloud base in feet AGL
    pub cloud_base_ft: i32,
    /// Density altitude in feet
    pub density_alt_ft: i32,
    /// Gust factor; infinite when the wind is calm but gusting
    pub gust_factor: f64,
    /// Fog formation risk
    pub fog_risk: RiskLevel,
}

/// Multi-factor flight assessment
///
/// `overall` always carries the worst verdict among the six named
/// sub-decisions, with the first worst reason in evaluation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightAssessment {
    /// Aggregate decision
    pub overall: Decision,
    /// Best runway chosen for this evaluation
    pub runway: RunwayWind,
    /// Crosswind, tailwind, and gust check
    pub wind: Decision,
    /// Visibility check
    pub visibility: Decision,
    /// Cloud ceiling check
    pub ceiling: Decision,
    /// Density altitude check
    pub density_alt: Decision,
    /// Fog risk check
    pub fog: Decision,
    /// Precipitation check
    pub precipitation: Decision,
    /// Derived numeric details
    pub details: FlightDetails,
}

/// Assess flight conditions against the given limits.
///
/// Deterministic and infallible: with no runway data every decision
/// short-circuits to the same NO-GO, while the derived details are still
/// computed from temperature, dewpoint, QNH, and wind.
#[must_use]
pub fn assess_flight(conditions: &FlightConditions, limits: &FlightLimits) -> FlightAssessment {
    let details = FlightDetails {
        cloud_base_ft: estimate_cloud_base(conditions.temp_c, conditions.dewpoint_c),
        density_alt_ft: density_altitude(
            conditions.field_elevation_m,
            conditions.temp_c,
            conditions.qnh_hpa,
        ),
        gust_factor: gust_factor(conditions.wind_speed_kts, conditions.gust_speed_kts),
        fog_risk: fog_risk(conditions.temp_c, conditions.dewpoint_c),
    };

    let runway = match best_runway(
        conditions.wind_dir_deg,
        conditions.wind_speed_kts,
        &conditions.runways,
    ) {
        Some(runway) => runway,
        None => return no_runway_assessment(details),
    };

    let wind = check_wind(&runway, conditions.gust_speed_kts, details.gust_factor, limits);
    let visibility = check_visibility(conditions.visibility_km, limits);
    let ceiling = check_ceiling(details.cloud_base_ft, limits);
    let density_alt = check_density_alt(details.density_alt_ft, limits);
    let fog = check_fog(details.fog_risk);
    let precipitation = check_precipitation(conditions.precipitation_mm);

    let overall = worst_of(
        &[&wind, &visibility, &ceiling, &density_alt, &fog, &precipitation],
        Decision::go("All checks passed — conditions are good"),
    );
    debug!(
        "flight assessment on RWY {}: {} ({})",
        runway.id, overall.verdict, overall.reason
    );

    FlightAssessment {
        overall,
        runway,
        wind,
        visibility,
        ceiling,
        density_alt,
        fog,
        precipitation,
        details,
    }
}

fn no_runway_assessment(details: FlightDetails) -> FlightAssessment {
    let no_data = Decision::no_go("No runway data available");
    debug!("flight assessment: no runway data");
    FlightAssessment {
        overall: no_data.clone(),
        runway: RunwayWind {
            id: "UNKNOWN".to_string(),
            headwind_kts: 0.0,
            crosswind_kts: 0.0,
        },
        wind: no_data.clone(),
        visibility: no_data.clone(),
        ceiling: no_data.clone(),
        density_alt: no_data.clone(),
        fog: no_data.clone(),
        precipitation: no_data,
        details,
    }
}

fn check_wind(
    runway: &RunwayWind,
    gust_speed_kts: f64,
    gust_factor: f64,
    limits: &FlightLimits,
) -> Decision {
    let crosswind = runway.crosswind_kts;
    let tailwind = -runway.headwind_kts;
    Cascade::new()
        .step(
            crosswind > limits.max_crosswind_kts || gust_speed_kts > limits.max_gust_kts,
            Verdict::NoGo,
            format!("Crosswind {crosswind}kt / gusts {gust_speed_kts}kt exceed limits"),
        )
        .step(
            tailwind > limits.max_tailwind_kts,
            Verdict::NoGo,
            format!("Tailwind {tailwind}kt on best runway {}", runway.id),
        )
        .step(
            crosswind > limits.max_crosswind_kts * 0.75 || gust_factor > limits.max_gust_factor,
            Verdict::Caution,
            format!(
                "Crosswind {crosswind}kt on RWY {}, gust factor {}",
                runway.id,
                fmt_value(gust_factor)
            ),
        )
        .otherwise(format!(
            "RWY {}: {}kt headwind, {crosswind}kt crosswind",
            runway.id,
            fmt_value(runway.headwind_kts)
        ))
}

fn check_visibility(visibility_km: f64, limits: &FlightLimits) -> Decision {
    Cascade::new()
        .step(
            visibility_km < limits.min_visibility_km,
            Verdict::NoGo,
            format!("Visibility {visibility_km}km below VFR minimum"),
        )
        .step(
            visibility_km < limits.min_visibility_km * 1.5,
            Verdict::Caution,
            format!("Visibility {visibility_km}km — marginal VFR"),
        )
        .otherwise(format!("Visibility {visibility_km}km"))
}

fn check_ceiling(cloud_base_ft: i32, limits: &FlightLimits) -> Decision {
    Cascade::new()
        .step(
            cloud_base_ft < limits.min_cloud_base_ft,
            Verdict::NoGo,
            format!("Estimated cloud base {cloud_base_ft}ft below minimum"),
        )
        .step(
            f64::from(cloud_base_ft) < f64::from(limits.min_cloud_base_ft) * 1.5,
            Verdict::Caution,
            format!("Cloud base ~{cloud_base_ft}ft — watch for lowering"),
        )
        .otherwise(format!("Cloud base ~{cloud_base_ft}ft"))
}

fn check_density_alt(density_alt_ft: i32, limits: &FlightLimits) -> Decision {
    Cascade::new()
        .step(
            density_alt_ft > limits.max_density_alt_ft,
            Verdict::NoGo,
            format!("Density altitude {density_alt_ft}ft — performance degraded"),
        )
        .step(
            f64::from(density_alt_ft) > f64::from(limits.max_density_alt_ft) * 0.75,
            Verdict::Caution,
            format!("Density altitude {density_alt_ft}ft — be aware"),
        )
        .otherwise(format!("Density altitude {density_alt_ft}ft"))
}

fn check_fog(risk: RiskLevel) -> Decision {
    match risk {
        RiskLevel::High => Decision::no_go("High fog risk — temp/dewpoint spread < 2°C"),
        RiskLevel::Moderate => Decision::caution("Moderate fog risk — spread narrowing"),
        RiskLevel::Low => Decision::go("Fog risk low"),
    }
}

fn check_precipitation(precipitation_mm: f64) -> Decision {
    Cascade::new()
        .step(
            precipitation_mm > 2.0,
            Verdict::NoGo,
            format!("Active precipitation {precipitation_mm}mm"),
        )
        .step(
            precipitation_mm > 0.0,
            Verdict::Caution,
            format!("Light precipitation {precipitation_mm}mm"),
        )
        .otherwise("No precipitation")
}
