//! Birth input: validation, timezone labels and the civil moment.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::config::Config;
use crate::date::{days_in_month, month_name};
use crate::error::InputError;

/// Checks a birth date and time before any calculation.
///
/// Fields are checked in order (year, month, day, hour, minute, longitude)
/// and the first failure is returned.
///
/// # Example
///
/// ```
/// use bazi::{Config, InputError};
/// use bazi::input::validate;
///
/// let config = Config::default();
/// assert_eq!(Ok(()), validate(2000, 2, 29, 23, 59, None, &config));
/// assert_eq!(
///     "Day must be between 1 and 28 for February",
///     validate(1900, 2, 29, 0, 0, None, &config).unwrap_err().to_string(),
/// );
/// ```
pub fn validate(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    longitude: Option<f64>,
    config: &Config,
) -> Result<(), InputError> {
    let (min, max) = (config.min_year, config.max_year());
    if !(min..=max).contains(&year) {
        return Err(InputError::Year { min, max });
    }
    let (Some(max_day), Some(month_name)) = (days_in_month(year, month), month_name(month)) else {
        return Err(InputError::Month);
    };
    if !(1..=max_day).contains(&day) {
        return Err(InputError::Day {
            max: max_day,
            month_name,
        });
    }
    if hour > 23 {
        return Err(InputError::Hour);
    }
    if minute > 59 {
        return Err(InputError::Minute);
    }
    if longitude.is_some_and(|lon| !(-180.0..=180.0).contains(&lon)) {
        return Err(InputError::Longitude);
    }
    Ok(())
}

/// Checks that a timezone offset lies on the half-hour grid in `-12..=14`.
pub fn validate_tz_offset(offset_hours: f64) -> Result<(), InputError> {
    if (-12.0..=14.0).contains(&offset_hours) && (offset_hours * 2.0).fract() == 0.0 {
        Ok(())
    } else {
        Err(InputError::TimezoneOffset(offset_hours))
    }
}

/// Parses a label such as `GMT`, `GMT+8` or `GMT-3.5` into hours ahead of
/// GMT.
///
/// ```
/// use bazi::input::parse_gmt_offset;
///
/// assert_eq!(Ok(8.0), parse_gmt_offset("GMT+8"));
/// assert_eq!(Ok(-3.5), parse_gmt_offset("GMT-3.5"));
/// assert_eq!(Ok(0.0), parse_gmt_offset("GMT"));
/// assert!(parse_gmt_offset("PST").is_err());
/// ```
pub fn parse_gmt_offset(label: &str) -> Result<f64, InputError> {
    let label = label.trim();
    let rest = label
        .strip_prefix("GMT")
        .ok_or_else(|| InputError::TimezoneLabel(label.to_owned()))?;
    if rest.is_empty() {
        return Ok(0.0);
    }
    if !rest.starts_with(['+', '-']) {
        return Err(InputError::TimezoneLabel(label.to_owned()));
    }
    let offset: f64 = rest
        .parse()
        .map_err(|_| InputError::TimezoneLabel(label.to_owned()))?;
    validate_tz_offset(offset)?;
    Ok(offset)
}

/// Formats hours ahead of GMT as a label, the inverse of [`parse_gmt_offset`].
///
/// ```
/// use bazi::input::format_gmt_offset;
///
/// assert_eq!("GMT", format_gmt_offset(0.0));
/// assert_eq!("GMT+8", format_gmt_offset(8.0));
/// assert_eq!("GMT-9.5", format_gmt_offset(-9.5));
/// ```
pub fn format_gmt_offset(offset_hours: f64) -> String {
    if offset_hours == 0.0 {
        "GMT".to_owned()
    } else if offset_hours.fract() == 0.0 {
        format!("GMT{:+}", offset_hours as i32)
    } else {
        format!("GMT{:+.1}", offset_hours)
    }
}

/// Birth date and time as entered, before validation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BirthInput {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    /// Hours ahead of GMT.
    pub tz_offset_hours: f64,
    /// Decimal degrees east. Defaults to the timezone meridian when absent.
    pub longitude: Option<f64>,
}

impl BirthInput {
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        tz_offset_hours: f64,
        longitude: Option<f64>,
    ) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            tz_offset_hours,
            longitude,
        }
    }

    /// Validates all fields, timezone offset included.
    pub fn validate(&self, config: &Config) -> Result<(), InputError> {
        validate(
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.longitude,
            config,
        )?;
        validate_tz_offset(self.tz_offset_hours)
    }

    /// Validates the input and builds the civil moment from it.
    pub fn civil_moment(&self, config: &Config) -> Result<CivilMoment, InputError> {
        self.validate(config)?;
        let datetime = NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .and_then(|date| date.and_hms_opt(self.hour, self.minute, 0))
            .ok_or(InputError::Year {
                min: config.min_year,
                max: config.max_year(),
            })?;
        Ok(CivilMoment {
            datetime,
            tz_offset_hours: self.tz_offset_hours,
            longitude: self.longitude.unwrap_or(self.tz_offset_hours * 15.0),
        })
    }
}

/// A validated civil clock reading with its timezone and longitude.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct CivilMoment {
    pub datetime: NaiveDateTime,
    /// Hours ahead of GMT.
    pub tz_offset_hours: f64,
    /// Decimal degrees east.
    pub longitude: f64,
}
