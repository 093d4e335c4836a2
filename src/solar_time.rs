//! Conversion from civil clock time into apparent solar time.
//!
//! Two corrections are added to the clock reading: the offset of the birth
//! longitude from the timezone's reference meridian, and the Equation of
//! Time.

use std::f64::consts::PI;

use chrono::{Datelike, NaiveDateTime, TimeDelta};
use serde::Serialize;

use crate::config::Config;
use crate::date::day_of_year;
use crate::error::InputError;
use crate::input::CivilMoment;

/// Apparent solar time at the birth longitude.
///
/// Always derived from a [`CivilMoment`] by [`civil_to_apparent_solar`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
pub struct SolarMoment(pub NaiveDateTime);

/// Result of [`civil_to_apparent_solar`], keeping the correction breakdown
/// for display.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct SolarConversion {
    pub solar: SolarMoment,
    /// Longitude correction in minutes.
    pub longitude_correction: f64,
    /// Equation of Time in minutes.
    pub equation_of_time: f64,
}

impl SolarConversion {
    /// Sum of both corrections, in minutes.
    pub fn total_correction(&self) -> f64 {
        self.longitude_correction + self.equation_of_time
    }
}

/// Approximates the Equation of Time, in minutes, for day-of-year
/// `day_of_year` (`1..=366`).
///
/// Positive values mean the apparent sun runs ahead of mean time.
///
/// # Example
///
/// ```
/// use bazi::solar_time::equation_of_time;
///
/// let eot = equation_of_time(1);
/// assert!((eot + 3.607).abs() < 1e-3);
/// ```
pub fn equation_of_time(day_of_year: u32) -> f64 {
    let b = 2.0 * PI * (day_of_year as f64 - 81.0) / 364.0;
    9.87 * (2.0 * b).sin() - 7.53 * b.cos() - 1.5 * b.sin()
}

/// Minutes between local solar position at `longitude` (degrees east) and the
/// reference meridian of a timezone `timezone_offset_hours` ahead of GMT.
///
/// ```
/// use bazi::solar_time::longitude_correction;
///
/// assert_eq!(0.0, longitude_correction(120.0, 8.0));
/// assert_eq!(-4.0, longitude_correction(119.0, 8.0));
/// ```
pub fn longitude_correction(longitude: f64, timezone_offset_hours: f64) -> f64 {
    let tz_meridian = timezone_offset_hours * 15.0;
    (longitude - tz_meridian) / 15.0 * 60.0
}

/// Shifts a civil moment to apparent solar time.
///
/// The Equation of Time is taken for the civil date's day of the year. The
/// combined correction is applied at nanosecond resolution. Fails only when
/// the shifted moment leaves the range `chrono` can represent.
///
/// # Example
///
/// ```
/// use bazi::{BirthInput, Config};
/// use bazi::solar_time::civil_to_apparent_solar;
///
/// let input = BirthInput::new(1990, 1, 1, 12, 0, 8.0, Some(114.1694));
/// let civil = input.civil_moment(&Config::default()).unwrap();
/// let conv = civil_to_apparent_solar(&civil).unwrap();
///
/// assert_eq!("1990-01-01 11:33:04", conv.solar.0.format("%F %T").to_string());
/// ```
pub fn civil_to_apparent_solar(civil: &CivilMoment) -> Result<SolarConversion, InputError> {
    let date = civil.datetime.date();
    let eot = equation_of_time(day_of_year(date.year(), date.month(), date.day()));
    let long_corr = longitude_correction(civil.longitude, civil.tz_offset_hours);
    let solar = civil
        .datetime
        .checked_add_signed(minutes(long_corr + eot))
        .map(SolarMoment)
        .ok_or(InputError::SolarTimeOutOfRange(civil.datetime))?;
    tracing::debug!(
        civil = %civil.datetime,
        solar = %solar.0,
        longitude_correction = long_corr,
        equation_of_time = eot,
        "converted to apparent solar time"
    );
    Ok(SolarConversion {
        solar,
        longitude_correction: long_corr,
        equation_of_time: eot,
    })
}

/// Converts fractional minutes into a `TimeDelta`, rounded to the nanosecond.
pub fn minutes(minutes: f64) -> TimeDelta {
    TimeDelta::nanoseconds((minutes * 60e9).round() as i64)
}

/// How far the solar-time correction moved the clock reading.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub enum CorrectionScale {
    Minor,
    Moderate,
    Large,
}

impl CorrectionScale {
    /// Classifies the absolute total correction against the configured
    /// thresholds. The thresholds themselves still count as the lower scale.
    pub fn of(conversion: &SolarConversion, config: &Config) -> Self {
        let total = conversion.total_correction().abs();
        if total > config.large_correction_minutes {
            Self::Large
        } else if total > config.moderate_correction_minutes {
            Self::Moderate
        } else {
            Self::Minor
        }
    }

    /// Note shown alongside the correction breakdown, if any.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Self::Minor => None,
            Self::Moderate => Some(
                "Moderate time correction applied; this improves accuracy for BaZi analysis.",
            ),
            Self::Large => Some(
                "Large time correction applied; results may differ significantly from clock-time calculations.",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::BirthInput;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn civil(input: BirthInput) -> CivilMoment {
        input.civil_moment(&Config::default()).unwrap()
    }

    #[test]
    fn hong_kong() {
        let conv = civil_to_apparent_solar(&civil(BirthInput::new(
            1990,
            1,
            1,
            12,
            0,
            8.0,
            Some(114.1694),
        )))
        .unwrap();
        assert!((conv.longitude_correction + 23.3224).abs() < 1e-9);
        assert!((conv.equation_of_time + 3.606873).abs() < 1e-6);
        assert_eq!(
            "1990-01-01 11:33:04.243601",
            conv.solar.0.format("%F %T%.6f").to_string()
        );
    }

    #[test]
    fn meridian_only() {
        let conv = civil_to_apparent_solar(&civil(BirthInput::new(2000, 3, 21, 6, 0, 0.0, None))).unwrap();
        assert_eq!(0.0, conv.longitude_correction);
        assert_eq!(equation_of_time(81), conv.equation_of_time);
    }

    #[test]
    fn crosses_midnight() {
        // 30 min east of the zone meridian outweighs the late-December EoT
        let conv = civil_to_apparent_solar(&civil(BirthInput::new(
            2000,
            12,
            31,
            23,
            50,
            -5.0,
            Some(-67.5),
        )))
        .unwrap();
        assert!(conv.total_correction() > 10.0);
        assert_eq!("2001-01-01", conv.solar.0.format("%F").to_string());
    }

    #[test]
    fn out_of_range_is_an_error() {
        let config = Config {
            max_year: Some(262142),
            ..Config::default()
        };
        let civil = BirthInput::new(262142, 12, 31, 23, 59, 0.0, Some(180.0))
            .civil_moment(&config)
            .unwrap();
        assert_eq!(
            Err(InputError::SolarTimeOutOfRange(civil.datetime)),
            civil_to_apparent_solar(&civil)
        );
    }

    #[test]
    fn correction_scale() {
        let config = Config::default();
        let at = |long_corr| SolarConversion {
            solar: SolarMoment(
                NaiveDate::from_ymd_opt(2000, 1, 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
            ),
            longitude_correction: long_corr,
            equation_of_time: 0.0,
        };
        assert_eq!(CorrectionScale::Minor, CorrectionScale::of(&at(-15.0), &config));
        assert_eq!(CorrectionScale::Moderate, CorrectionScale::of(&at(15.5), &config));
        assert_eq!(CorrectionScale::Moderate, CorrectionScale::of(&at(-30.0), &config));
        assert_eq!(CorrectionScale::Large, CorrectionScale::of(&at(-31.0), &config));
        assert!(CorrectionScale::Minor.notice().is_none());
        assert!(CorrectionScale::Large.notice().is_some());
    }

    proptest! {
        #[test]
        fn eot_bounded(doy in 1u32..=366) {
            let eot = equation_of_time(doy);
            prop_assert!((-15.0..=17.0).contains(&eot), "{doy}: {eot}");
        }

        #[test]
        fn eot_periodic(doy in 1u32..=366) {
            prop_assert!((equation_of_time(doy) - equation_of_time(doy + 364)).abs() < 1e-9);
        }

        #[test]
        fn meridian_has_no_correction(half_hours in -24i32..=28) {
            let offset = half_hours as f64 / 2.0;
            prop_assert_eq!(0.0, longitude_correction(offset * 15.0, offset));
        }

        #[test]
        fn round_trip(
            (year, month, day) in (1900i32..=2025, 1u32..=12, 1u32..=28),
            hour in 0u32..24,
            minute in 0u32..60,
            half_hours in -24i32..=28,
            longitude in -180.0f64..=180.0,
        ) {
            let input = BirthInput::new(year, month, day, hour, minute, half_hours as f64 / 2.0, Some(longitude));
            let civil = civil(input);
            let conv = civil_to_apparent_solar(&civil).unwrap();
            prop_assert_eq!(civil.datetime, conv.solar.0 - minutes(conv.total_correction()));
        }
    }
}
