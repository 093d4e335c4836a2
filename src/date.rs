//! Gregorian calendar arithmetic and Julian dates.

/// Indicates whether a year is a leap year or common year.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum YearType {
    Common,
    Leap,
}

impl YearType {
    /// Determines if `year` is a leap year in Gregorian calendar.
    pub fn from_gregorian(year: i32) -> Self {
        if year % 4 == 0 && year % 100 != 0 || year % 400 == 0 {
            Self::Leap
        } else {
            Self::Common
        }
    }
    /// Returns `true` if `self` is `Leap`, otherwise `false`.
    pub fn is_leap(&self) -> bool {
        matches!(self, YearType::Leap)
    }
}

/// Returns the number of days in `month` of `year`, or `None` if `month` is
/// not in `1..=12`.
///
/// # Example
///
/// ```
/// use bazi::date::days_in_month;
///
/// assert_eq!(Some(29), days_in_month(2000, 2));
/// assert_eq!(Some(28), days_in_month(1900, 2));
/// assert_eq!(None, days_in_month(2000, 13));
/// ```
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    Some(match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => 28 + YearType::from_gregorian(year).is_leap() as u32,
        _ => return None,
    })
}

/// English name of `month`, or `None` if `month` is not in `1..=12`.
pub fn month_name(month: u32) -> Option<&'static str> {
    const NAMES: &[&str] = &[
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    NAMES.get(month.checked_sub(1)? as usize).copied()
}

/// Returns the ordinal day of the year (`1..=366`).
///
/// The date is not checked; callers validate it first.
///
/// ```
/// use bazi::date::day_of_year;
///
/// assert_eq!(1, day_of_year(1990, 1, 1));
/// assert_eq!(366, day_of_year(2000, 12, 31));
/// ```
pub fn day_of_year(year: i32, month: u32, day: u32) -> u32 {
    ordinal_day_number(month, day, YearType::from_gregorian(year))
}

fn ordinal_day_number(month: u32, day: u32, year_type: YearType) -> u32 {
    day + match month {
        1 => 0,
        2 => 31,
        _ => 59 + (153 * (month - 3) + 2) / 5 + year_type.is_leap() as u32,
    }
}

/// Converts a Gregorian date and time into a (fractional) Julian Date.
///
/// January and February are counted as months 13 and 14 of the preceding
/// year, and the Gregorian leap correction is applied. The fractional part
/// carries the time of day, with `.0` falling at noon.
///
/// # Example
///
/// ```
/// use bazi::date::julian_date;
///
/// assert_eq!(2451545.0, julian_date(2000, 1, 1, 12, 0, 0.0));
/// assert_eq!(2451544.5, julian_date(2000, 1, 1, 0, 0, 0.0));
/// ```
pub fn julian_date(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> f64 {
    let day_fraction = (hour as f64 + minute as f64 / 60.0 + second / 3600.0) / 24.0;
    let (mut y, mut m) = (year, month as i32);
    if m <= 2 {
        y -= 1;
        m += 12;
    }
    let a = y.div_euclid(100);
    let b = 2 - a + a.div_euclid(4);
    (365.25 * (y + 4716) as f64).floor() + (30.6001 * (m + 1) as f64).floor()
        + day as f64
        + day_fraction
        + b as f64
        - 1524.5
}

/// Returns the Julian day number of the civil day containing `jd`, i.e. the
/// integer Julian date at that day's noon.
///
/// ```
/// use bazi::date::julian_day_number_at_noon;
///
/// assert_eq!(2451545, julian_day_number_at_noon(2451544.5));
/// assert_eq!(2451545, julian_day_number_at_noon(2451545.4999));
/// assert_eq!(2451546, julian_day_number_at_noon(2451545.5));
/// ```
pub fn julian_day_number_at_noon(jd: f64) -> i64 {
    (jd + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_years() {
        use YearType::*;
        for (std, year) in [(Leap, 2000), (Common, 1900), (Leap, 1992), (Common, 2023)] {
            assert_eq!(std, YearType::from_gregorian(year), "{year}");
        }
    }

    #[test]
    fn month_lengths() {
        let lengths: Vec<_> = (1..=12).map(|m| days_in_month(2024, m).unwrap()).collect();
        assert_eq!(vec![31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31], lengths);
        assert_eq!(Some(28), days_in_month(2023, 2));
        assert_eq!(None, days_in_month(2023, 0));
    }

    #[test]
    fn month_names() {
        assert_eq!(Some("January"), month_name(1));
        assert_eq!(Some("December"), month_name(12));
        assert_eq!(None, month_name(0));
        assert_eq!(None, month_name(13));
    }

    #[test]
    fn from_gregorian() {
        assert_eq!(2440587.5, julian_date(1970, 1, 1, 0, 0, 0.0));
        assert_eq!(2459465.5, julian_date(2021, 9, 8, 0, 0, 0.0));
        let jd = julian_date(1990, 1, 1, 12, 30, 0.0);
        assert!((jd - 2447893.020833).abs() < 1e-6);
    }

    #[test]
    fn noon_day_number() {
        for (std, (y, m, d)) in [
            (2440588, (1970, 1, 1)),
            (2459466, (2021, 9, 8)),
            (2447893, (1990, 1, 1)),
        ] {
            for hour in [0, 11, 12, 23] {
                let jd = julian_date(y, m, d, hour, 59, 59.0);
                assert_eq!(std, julian_day_number_at_noon(jd), "{y:04}-{m:02}-{d:02} {hour}h");
            }
        }
    }
}
