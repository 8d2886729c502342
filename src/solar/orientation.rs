//! Heliographic orientation of the solar disk for an observation time.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::constants::grid::DELTA_T_SECONDS;

/// Inclination of the solar equator to the ecliptic, degrees.
const SOLAR_INCLINATION_DEG: f64 = 7.25;
/// Sidereal rotation period used for the Carrington longitude, days.
const CARRINGTON_PERIOD_DAYS: f64 = 25.38;
const J2000: f64 = 2451545.0;

/// Orientation of the visible disk, all angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarOrientation {
    /// Heliographic latitude of the disk center
    pub b0: f64,
    /// Position angle of the rotation axis, measured east from celestial north
    pub p0: f64,
    /// Carrington longitude of the central meridian, in `[0, 360)`
    pub l0: f64,
}

/// Julian ephemeris day for a UTC timestamp, with `delta_t_seconds` = TD - UT.
pub fn julian_ephemeris_day(dt: NaiveDateTime, delta_t_seconds: f64) -> f64 {
    let (mut year, mut month) = (dt.year() as f64, dt.month() as f64);
    if month <= 2.0 {
        year -= 1.0;
        month += 12.0;
    }
    let a = (year / 100.0).trunc();
    let b = 2.0 - a + (a / 4.0).trunc();
    let day_fraction =
        (dt.hour() as f64 + dt.minute() as f64 / 60.0 + dt.second() as f64 / 3600.0) / 24.0;

    (365.25 * (year + 4716.0)).floor()
        + (30.6001 * (month + 1.0)).floor()
        + dt.day() as f64
        + day_fraction
        + b
        - 1524.5
        + delta_t_seconds / 86400.0
}

/// Apparent ecliptic longitude of the Sun and the true obliquity, degrees.
fn sun_position(jde: f64) -> (f64, f64) {
    let t = (jde - J2000) / 36525.0;

    let mean_longitude = 280.46645 + 36000.76983 * t + 0.0003032 * t * t;
    let mean_anomaly =
        (357.52910 + 35999.05030 * t - 0.0001559 * t * t - 0.00000048 * t * t * t).rem_euclid(360.0);
    let m = mean_anomaly.to_radians();

    let center = (1.914600 - 0.004817 * t - 0.000014 * t * t) * m.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m).sin()
        + 0.000290 * (3.0 * m).sin();
    let true_longitude = mean_longitude + center;

    // Nutation, arcseconds
    let omega = (125.04452 - 1934.136261 * t).to_radians();
    let sun_mean = (280.4665 + 36000.7698 * t).to_radians();
    let moon_mean = (218.3165 + 481267.8813 * t).to_radians();
    let delta_psi = -17.20 * omega.sin() - 1.32 * (2.0 * sun_mean).sin() - 0.23 * (2.0 * moon_mean).sin()
        + 0.21 * (2.0 * omega).sin();
    let delta_epsilon = 9.20 * omega.cos() + 0.57 * (2.0 * sun_mean).cos() + 0.10 * (2.0 * moon_mean).cos()
        - 0.09 * (2.0 * omega).cos();

    let mean_obliquity = (84381.448 - 46.8150 * t - 0.00059 * t * t + 0.001813 * t * t * t) / 3600.0;
    let obliquity = mean_obliquity + delta_epsilon / 3600.0;
    let apparent_longitude = (true_longitude + delta_psi / 3600.0).rem_euclid(360.0);

    (apparent_longitude, obliquity)
}

impl SolarOrientation {
    /// Orientation at a Julian ephemeris day.
    pub fn from_jde(jde: f64) -> Self {
        let (longitude, obliquity) = sun_position(jde);
        let lambda = longitude.to_radians();
        let epsilon = obliquity.to_radians();
        let inclination = SOLAR_INCLINATION_DEG.to_radians();

        let node = (73.6667 + 1.3958333 * (jde - 2396758.0) / 36525.0).to_radians();
        let theta = ((jde - 2398220.0) * 360.0 / CARRINGTON_PERIOD_DAYS).rem_euclid(360.0);

        let x = (-lambda.cos() * epsilon.tan()).atan();
        let y = (-(lambda - node).cos() * inclination.tan()).atan();
        let p0 = (x + y).to_degrees();

        let b0 = ((lambda - node).sin() * inclination.sin()).asin().to_degrees();

        // eta lies in the quadrant of (-sin(lambda - node) cos i, -cos(lambda - node)).
        let eta = (-(lambda - node).sin() * inclination.cos())
            .atan2(-(lambda - node).cos())
            .to_degrees();
        let l0 = (eta - theta).rem_euclid(360.0);

        Self { b0, p0, l0 }
    }

    /// Orientation for a UTC observation time.
    pub fn from_datetime(dt: NaiveDateTime) -> Self {
        let jde = julian_ephemeris_day(dt, DELTA_T_SECONDS);
        let orientation = Self::from_jde(jde);
        log::debug!(
            "Solar orientation at {}: B0={:.3} P0={:.3} L0={:.3}",
            dt,
            orientation.b0,
            orientation.p0,
            orientation.l0
        );
        orientation
    }

    /// Disk seen exactly equator-on with the axis pointing straight up.
    pub fn face_on() -> Self {
        Self {
            b0: 0.0,
            p0: 0.0,
            l0: 0.0,
        }
    }
}
