//! Pure physics and meteorology derivations
//!
//! Stateless functions of their inputs, no I/O, no shared state. Abnormal
//! input produces sentinel values (a clamped cloud base, an infinite gust
//! factor) rather than errors, so every caller gets a number it can
//! compare against a limit.

use serde::{Deserialize, Serialize};

use crate::decision::{RiskAssessment, RiskLevel};

/// A runway available at the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Runway {
    /// Runway designator, e.g. "17"
    pub id: String,
    /// Magnetic heading in degrees (0-360)
    pub heading_deg: f64,
}

/// Wind resolved into components for one runway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunwayWind {
    /// Runway designator
    pub id: String,
    /// Headwind component in knots; negative means tailwind
    pub headwind_kts: f64,
    /// Magnitude of the crosswind component in knots
    pub crosswind_kts: f64,
}

/// Crosswind component in knots, rounded to one decimal.
///
/// Positive means the wind comes from the right of the runway axis.
#[must_use]
pub fn crosswind_component(wind_dir_deg: f64, wind_speed_kts: f64, runway_heading_deg: f64) -> f64 {
    let angle = (wind_dir_deg - runway_heading_deg).to_radians();
    round1(wind_speed_kts * angle.sin())
}

/// Headwind component in knots, rounded to one decimal.
///
/// Positive means headwind, negative means tailwind.
#[must_use]
pub fn headwind_component(wind_dir_deg: f64, wind_speed_kts: f64, runway_heading_deg: f64) -> f64 {
    let angle = (wind_dir_deg - runway_heading_deg).to_radians();
    round1(wind_speed_kts * angle.cos())
}

/// Pick the runway with the strongest headwind component.
///
/// Ties on headwind break toward the smaller crosswind magnitude; only a
/// strict improvement replaces the running best, so among true ties the
/// earliest runway in the list wins. Returns `None` for an empty list.
#[must_use]
pub fn best_runway(
    wind_dir_deg: f64,
    wind_speed_kts: f64,
    runways: &[Runway],
) -> Option<RunwayWind> {
    let mut best: Option<RunwayWind> = None;
    for runway in runways {
        let headwind = headwind_component(wind_dir_deg, wind_speed_kts, runway.heading_deg);
        let crosswind = crosswind_component(wind_dir_deg, wind_speed_kts, runway.heading_deg).abs();
        // components are rounded to 0.1 kt, so exact headwind ties do occur
        let improves = match &best {
            Some(current) => {
                headwind > current.headwind_kts
                    || (headwind == current.headwind_kts && crosswind < current.crosswind_kts)
            }
            None => true,
        };
        if improves {
            best = Some(RunwayWind {
                id: runway.id.clone(),
                headwind_kts: headwind,
                crosswind_kts: crosswind,
            });
        }
    }
    best
}

/// Estimated cloud base in feet AGL from the temperature/dewpoint spread.
///
/// Henley's spread method: roughly 1000 ft of cloud base per 2.5 °C of
/// spread. A negative spread clamps to 0 rather than going below ground.
#[must_use]
pub fn estimate_cloud_base(temp_c: f64, dewpoint_c: f64) -> i32 {
    let spread = temp_c - dewpoint_c;
    if spread < 0.0 {
        return 0;
    }
    ((spread / 2.5) * 1000.0).round() as i32
}

/// Density altitude in feet.
///
/// Pressure altitude from the QNH deviation at 30 ft/hPa plus field
/// elevation, then corrected 120 ft per degree of deviation from the ISA
/// temperature model `15 - 1.98 * (pressure_alt / 1000)`.
#[must_use]
pub fn density_altitude(field_elevation_m: f64, temp_c: f64, qnh_hpa: f64) -> i32 {
    let field_elevation_ft = field_elevation_m * 3.28084;
    let pressure_alt = (1013.25 - qnh_hpa) * 30.0 + field_elevation_ft;
    let isa_temp = 15.0 - (pressure_alt / 1000.0) * 1.98;
    (pressure_alt + 120.0 * (temp_c - isa_temp)).round() as i32
}

/// Gust factor: ratio of gust speed to mean wind speed, two decimals.
///
/// Calm wind with gusts yields positive infinity; calm wind without gusts
/// yields exactly 1.
#[must_use]
pub fn gust_factor(wind_speed: f64, gust_speed: f64) -> f64 {
    if wind_speed <= 0.0 {
        return if gust_speed > 0.0 { f64::INFINITY } else { 1.0 };
    }
    round2(gust_speed / wind_speed)
}

/// Fog formation risk from the temperature/dewpoint spread
#[must_use]
pub fn fog_risk(temp_c: f64, dewpoint_c: f64) -> RiskLevel {
    let spread = temp_c - dewpoint_c;
    match spread {
        s if s < 2.0 => RiskLevel::High,
        s if s < 4.0 => RiskLevel::Moderate,
        _ => RiskLevel::Low,
    }
}

/// Spray drift risk from wind speed and delta-T.
///
/// Delta-T is approximated as the temperature/dewpoint spread, close
/// enough for field use. The ladder is evaluated top to bottom and the
/// first matching clause wins; ideal spraying sits at delta-T 2-8 °C with
/// wind 3-15 km/h.
#[must_use]
pub fn spray_drift_risk(wind_speed_kmh: f64, temp_c: f64, dewpoint_c: f64) -> RiskAssessment {
    let delta_t = temp_c - dewpoint_c;

    if wind_speed_kmh > 15.0 {
        return RiskAssessment {
            level: RiskLevel::High,
            reason: format!("Wind {wind_speed_kmh} km/h exceeds 15 km/h spray limit"),
        };
    }
    if wind_speed_kmh < 3.0 {
        return RiskAssessment {
            level: RiskLevel::High,
            reason: "Wind below 3 km/h — inversion likely, spray will hang".to_string(),
        };
    }
    if delta_t > 10.0 {
        return RiskAssessment {
            level: RiskLevel::High,
            reason: format!("Delta-T {delta_t:.1}°C — rapid evaporation, droplets won't reach target"),
        };
    }
    if delta_t < 2.0 {
        return RiskAssessment {
            level: RiskLevel::Moderate,
            reason: format!("Delta-T {delta_t:.1}°C — too humid, slow drying"),
        };
    }
    if delta_t > 8.0 {
        return RiskAssessment {
            level: RiskLevel::Moderate,
            reason: format!("Delta-T {delta_t:.1}°C — getting dry, watch for drift"),
        };
    }
    if wind_speed_kmh > 12.0 {
        return RiskAssessment {
            level: RiskLevel::Moderate,
            reason: format!("Wind {wind_speed_kmh} km/h approaching limit"),
        };
    }
    RiskAssessment {
        level: RiskLevel::Low,
        reason: "Conditions within ideal spray window".to_string(),
    }
}

/// Paddock bog risk from trailing 24-hour rainfall
#[must_use]
pub fn field_bog_risk(rainfall_24h_mm: f64) -> RiskAssessment {
    if rainfall_24h_mm > 20.0 {
        return RiskAssessment {
            level: RiskLevel::High,
            reason: format!("{rainfall_24h_mm}mm in 24h — paddocks will be boggy"),
        };
    }
    if rainfall_24h_mm > 10.0 {
        return RiskAssessment {
            level: RiskLevel::Moderate,
            reason: format!("{rainfall_24h_mm}mm in 24h — soft patches likely"),
        };
    }
    RiskAssessment {
        level: RiskLevel::Low,
        reason: "Ground should be firm".to_string(),
    }
}

/// Convert knots to km/h, one decimal
#[must_use]
pub fn kts_to_kmh(kts: f64) -> f64 {
    round1(kts * 1.852)
}

/// Convert km/h to knots, one decimal
#[must_use]
pub fn kmh_to_kts(kmh: f64) -> f64 {
    round1(kmh / 1.852)
}

/// Convert metres to feet, nearest foot
#[must_use]
pub fn m_to_ft(m: f64) -> i32 {
    (m * 3.28084).round() as i32
}

/// Convert feet to metres, nearest metre
#[must_use]
pub fn ft_to_m(ft: f64) -> i32 {
    (ft / 3.28084).round() as i32
}

/// Render a derived figure for a reason string: the `-0.0` that rounding
/// can leave behind prints as a plain `0`, and an infinity prints as
/// `Infinity`.
pub(crate) fn fmt_value(value: f64) -> String {
    if value.is_infinite() {
        let rendered = if value.is_sign_positive() {
            "Infinity"
        } else {
            "-Infinity"
        };
        return rendered.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn runway(id: &str, heading_deg: f64) -> Runway {
        Runway {
            id: id.to_string(),
            heading_deg,
        }
    }

    #[test]
    fn test_wind_components_resolve_and_round() {
        // 10 kt from 220 onto runway 17: 50 degrees off the nose
        assert_eq!(crosswind_component(220.0, 10.0, 170.0), 7.7);
        assert_eq!(headwind_component(220.0, 10.0, 170.0), 6.4);
    }

    #[test]
    fn test_wind_component_signs() {
        // wind from the left of the axis gives a negative crosswind
        assert_eq!(crosswind_component(120.0, 10.0, 170.0), -7.7);
        // direct tailwind gives a negative headwind
        assert_eq!(headwind_component(350.0, 10.0, 170.0), -10.0);
    }

    #[test]
    fn test_best_runway_prefers_headwind() {
        let runways = vec![runway("17", 170.0), runway("35", 350.0)];
        let best = best_runway(170.0, 10.0, &runways).unwrap();
        assert_eq!(best.id, "17");
        assert_eq!(best.headwind_kts, 10.0);
        assert_eq!(best.crosswind_kts, 0.0);
    }

    #[test]
    fn test_best_runway_tie_breaks_on_crosswind() {
        // 2 kt from 100: both runways round to a 2.0 kt headwind, the
        // better-aligned one carries less crosswind
        let runways = vec![runway("07", 88.0), runway("09", 90.0)];
        let best = best_runway(100.0, 2.0, &runways).unwrap();
        assert_eq!(best.id, "09");
        assert_eq!(best.headwind_kts, 2.0);
        assert_eq!(best.crosswind_kts, 0.3);
    }

    #[test]
    fn test_best_runway_empty_list() {
        assert!(best_runway(170.0, 10.0, &[]).is_none());
    }

    #[test]
    fn test_cloud_base_spread_method() {
        assert_eq!(estimate_cloud_base(20.0, 15.0), 2000);
        assert_eq!(estimate_cloud_base(20.0, 13.0), 2800);
    }

    #[test]
    fn test_cloud_base_clamps_at_zero() {
        assert_eq!(estimate_cloud_base(8.0, 10.0), 0);
        assert_eq!(estimate_cloud_base(10.0, 10.0), 0);
    }

    #[test]
    fn test_density_altitude() {
        // standard atmosphere at sea level
        assert_eq!(density_altitude(0.0, 15.0, 1013.25), 0);
        // warm day at a low field
        assert_eq!(density_altitude(27.0, 20.0, 1013.0), 719);
    }

    #[test]
    fn test_gust_factor_sentinels() {
        assert_eq!(gust_factor(0.0, 0.0), 1.0);
        assert_eq!(gust_factor(0.0, 5.0), f64::INFINITY);
        assert_eq!(gust_factor(10.0, 15.0), 1.5);
        assert_eq!(gust_factor(8.0, 10.0), 1.25);
    }

    #[rstest]
    #[case(20.0, 19.0, RiskLevel::High)]
    #[case(20.0, 17.0, RiskLevel::Moderate)]
    #[case(20.0, 15.0, RiskLevel::Low)]
    #[case(12.0, 10.0, RiskLevel::Moderate)] // spread exactly 2
    #[case(14.0, 10.0, RiskLevel::Low)] // spread exactly 4
    fn test_fog_risk_tiers(#[case] temp: f64, #[case] dewpoint: f64, #[case] expected: RiskLevel) {
        assert_eq!(fog_risk(temp, dewpoint), expected);
    }

    #[rstest]
    #[case(16.0, 20.0, 15.0, RiskLevel::High)] // too windy
    #[case(2.0, 20.0, 15.0, RiskLevel::High)] // inversion
    #[case(8.0, 30.0, 18.0, RiskLevel::High)] // delta-T 12
    #[case(8.0, 15.0, 14.0, RiskLevel::Moderate)] // delta-T 1
    #[case(8.0, 24.0, 15.0, RiskLevel::Moderate)] // delta-T 9
    #[case(13.0, 20.0, 15.0, RiskLevel::Moderate)] // wind approaching limit
    #[case(8.0, 18.0, 14.0, RiskLevel::Low)]
    fn test_spray_drift_ladder(
        #[case] wind: f64,
        #[case] temp: f64,
        #[case] dewpoint: f64,
        #[case] expected: RiskLevel,
    ) {
        assert_eq!(spray_drift_risk(wind, temp, dewpoint).level, expected);
    }

    #[test]
    fn test_spray_drift_first_match_wins() {
        // both the wind clause and the delta-T clause apply; wind is listed
        // first and supplies the reason
        let risk = spray_drift_risk(16.0, 30.0, 18.0);
        assert_eq!(risk.level, RiskLevel::High);
        assert_eq!(risk.reason, "Wind 16 km/h exceeds 15 km/h spray limit");
    }

    #[test]
    fn test_spray_drift_reasons() {
        assert_eq!(
            spray_drift_risk(8.0, 15.0, 14.0).reason,
            "Delta-T 1.0°C — too humid, slow drying"
        );
        assert_eq!(
            spray_drift_risk(8.0, 18.0, 14.0).reason,
            "Conditions within ideal spray window"
        );
    }

    #[rstest]
    #[case(25.0, RiskLevel::High)]
    #[case(15.0, RiskLevel::Moderate)]
    #[case(20.0, RiskLevel::Moderate)] // boundary: strictly greater only
    #[case(10.0, RiskLevel::Low)]
    #[case(0.0, RiskLevel::Low)]
    fn test_bog_risk_tiers(#[case] rainfall: f64, #[case] expected: RiskLevel) {
        assert_eq!(field_bog_risk(rainfall).level, expected);
    }

    #[test]
    fn test_bog_risk_reasons() {
        assert_eq!(
            field_bog_risk(25.0).reason,
            "25mm in 24h — paddocks will be boggy"
        );
        assert_eq!(field_bog_risk(5.0).reason, "Ground should be firm");
    }

    #[test]
    fn test_unit_conversions() {
        assert_eq!(kts_to_kmh(10.0), 18.5);
        assert_eq!(kmh_to_kts(15.0), 8.1);
        assert_eq!(m_to_ft(27.0), 89);
        assert_eq!(ft_to_m(1000.0), 305);
    }

    #[test]
    fn test_fmt_value_normalizes_zero_and_infinity() {
        assert_eq!(fmt_value(-0.0), "0");
        assert_eq!(fmt_value(0.0), "0");
        assert_eq!(fmt_value(f64::INFINITY), "Infinity");
        assert_eq!(fmt_value(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(fmt_value(5.0), "5");
        assert_eq!(fmt_value(1.2), "1.2");
        assert_eq!(fmt_value(-7.7), "-7.7");
    }
}
