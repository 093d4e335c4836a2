//! The Four Pillars.
//!
//! Each pillar pairs a Heavenly Stem with an Earthly Branch. The year and
//! month pillars follow the solar-term calendar resolved by
//! [`resolve_bazi_year_month`], the day pillar follows the Julian day count,
//! and the hour pillar follows the Day stem and the solar hour.

use std::fmt::{self, Display, Formatter};

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Serialize;

use crate::date::{julian_date, julian_day_number_at_noon};
use crate::solar_terms::{SolarTermTable, resolve_bazi_year_month};
use crate::solar_time::SolarMoment;

pub mod cycle;

pub use cycle::{Animal, Branch, Element, Polarity, Stem};

/// A (stem, branch) pair.
///
/// Serializes with its text forms alongside the parts:
///
/// ```
/// use bazi::Pillar;
///
/// let json = serde_json::to_value(Pillar::from_sexagenary(42)).unwrap();
/// assert_eq!("乙巳", json["hanzi"]);
/// assert_eq!("Yi Si", json["pinyin"]);
/// assert_eq!("Wood Snake", json["meaning"]);
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(into = "PillarText")]
pub struct Pillar {
    pub stem: Stem,
    pub branch: Branch,
}

impl Pillar {
    pub fn new(stem: Stem, branch: Branch) -> Self {
        Self { stem, branch }
    }

    /// Creates the pillar numbered `num` in the sexagenary cycle, from 1
    /// (甲子) to 60 (癸亥).
    ///
    /// ```
    /// use bazi::Pillar;
    ///
    /// assert_eq!("甲子", Pillar::from_sexagenary(1).to_string());
    /// assert_eq!("庚寅", Pillar::from_sexagenary(27).to_string());
    /// assert_eq!("癸亥", Pillar::from_sexagenary(60).to_string());
    /// ```
    pub fn from_sexagenary(num: u32) -> Self {
        let index = num as i64 - 1;
        Self::new(Stem::from_index(index), Branch::from_index(index))
    }

    /// Position of the pair in the sexagenary cycle (`1..=60`), or `None`
    /// when stem and branch differ in polarity and never pair up.
    ///
    /// ```
    /// use bazi::{Branch, Pillar, Stem};
    ///
    /// assert_eq!(Some(11), Pillar::new(Stem::Jia, Branch::Xu).sexagenary());
    /// assert_eq!(None, Pillar::new(Stem::Gui, Branch::Zi).sexagenary());
    /// ```
    pub fn sexagenary(&self) -> Option<u32> {
        let (s, b) = (self.stem.index() as i64, self.branch.index() as i64);
        if s % 2 != b % 2 {
            return None;
        }
        Some((6 * s - 5 * b).rem_euclid(60) as u32 + 1)
    }

    /// Romanized form, e.g. `Jia Zi`.
    pub fn pinyin(&self) -> String {
        format!("{} {}", self.stem.pinyin(), self.branch.pinyin())
    }

    /// Element of the stem and animal of the branch, e.g. `Wood Rat`.
    pub fn meaning(&self) -> String {
        format!("{} {}", self.stem.element(), self.branch.animal())
    }
}

#[derive(Serialize)]
struct PillarText {
    hanzi: String,
    stem: Stem,
    branch: Branch,
    pinyin: String,
    meaning: String,
}

impl From<Pillar> for PillarText {
    fn from(pillar: Pillar) -> Self {
        Self {
            hanzi: pillar.to_string(),
            stem: pillar.stem,
            branch: pillar.branch,
            pinyin: pillar.pinyin(),
            meaning: pillar.meaning(),
        }
    }
}

impl Display for Pillar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}

/// Year pillar of BaZi year `bazi_year`.
///
/// ```
/// use bazi::pillars::year_pillar;
///
/// assert_eq!("庚午", year_pillar(1989).to_string());
/// ```
pub fn year_pillar(bazi_year: i32) -> Pillar {
    let index = (bazi_year as i64 - 3).rem_euclid(60);
    Pillar::new(Stem::from_index(index), Branch::from_index(index))
}

/// Month pillar of month `bazi_month` (`1..=12`) in BaZi year `bazi_year`.
///
/// The stem counts on from the year stem: two steps for the first month,
/// then one per month.
pub fn month_pillar(bazi_year: i32, bazi_month: u32) -> Pillar {
    let year_stem = year_pillar(bazi_year).stem;
    let offset = bazi_month as i64 - 1;
    Pillar::new(
        Stem::from_index(year_stem.index() as i64 + 2 + offset),
        Branch::from_index(offset),
    )
}

/// Day pillar together with the Julian dates it was derived from.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct DayPillar {
    pub pillar: Pillar,
    /// Julian Date of the solar moment.
    pub jd: f64,
    /// Julian day number of the solar day.
    pub jd_noon: i64,
}

/// Day pillar of the solar day containing `solar`.
///
/// ```
/// use bazi::SolarMoment;
/// use bazi::pillars::day_pillar;
/// use chrono::NaiveDate;
///
/// let at = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let day = day_pillar(SolarMoment(at));
///
/// assert_eq!("戊午", day.pillar.to_string());
/// assert_eq!(2451545, day.jd_noon);
/// ```
pub fn day_pillar(solar: SolarMoment) -> DayPillar {
    let at = solar.0;
    let jd = julian_date(
        at.year(),
        at.month(),
        at.day(),
        at.hour(),
        at.minute(),
        at.second() as f64,
    );
    let jd_noon = julian_day_number_at_noon(jd);
    DayPillar {
        pillar: Pillar::new(Stem::from_index(jd_noon - 1), Branch::from_index(jd_noon + 1)),
        jd,
        jd_noon,
    }
}

/// Hour pillar for solar hour `solar_hour` (`0..=23`) of a day with stem
/// `day_stem`.
///
/// Each branch spans two hours, 子 running from 23:00 to 00:59.
pub fn hour_pillar(day_stem: Stem, solar_hour: u32) -> Pillar {
    let slot = (solar_hour as i64 + 1) / 2;
    Pillar::new(
        Stem::from_index(day_stem.index() as i64 + slot),
        Branch::from_index(slot),
    )
}

/// Complete result for one solar moment.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct FourPillars {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
    /// Stem of the day pillar.
    pub day_master: Stem,
    pub bazi_year: i32,
    pub bazi_month: u32,
    pub jd: f64,
    pub jd_noon: i64,
    /// Spring Begins of the BaZi year, if known.
    pub year_start: Option<NaiveDateTime>,
    /// Start term of the BaZi month, if known.
    pub month_start: Option<NaiveDateTime>,
}

impl FourPillars {
    pub fn year_start_display(&self) -> Option<String> {
        self.year_start.map(crate::fmt::boundary)
    }
    pub fn month_start_display(&self) -> Option<String> {
        self.month_start.map(crate::fmt::boundary)
    }
}

/// Computes the Four Pillars of a solar moment.
///
/// # Example
///
/// ```
/// use bazi::{SolarMoment, SolarTermTable, four_pillars};
/// use chrono::NaiveDate;
///
/// let table = SolarTermTable::builtin().unwrap();
/// let at = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(8, 30, 0).unwrap();
/// let pillars = four_pillars(&table, SolarMoment(at));
///
/// assert_eq!("乙巳", pillars.year.to_string());
/// assert_eq!("丙申", pillars.day.to_string());
/// assert_eq!(Some("May 20, 2024 at 20:59".to_owned()), pillars.month_start_display());
/// ```
pub fn four_pillars(table: &SolarTermTable, solar: SolarMoment) -> FourPillars {
    let resolved = resolve_bazi_year_month(table, solar);
    let day = day_pillar(solar);
    let hour = hour_pillar(day.pillar.stem, solar.0.hour());
    let pillars = FourPillars {
        year: year_pillar(resolved.year),
        month: month_pillar(resolved.year, resolved.month),
        day: day.pillar,
        hour,
        day_master: day.pillar.stem,
        bazi_year: resolved.year,
        bazi_month: resolved.month,
        jd: day.jd,
        jd_noon: day.jd_noon,
        year_start: resolved.year_start,
        month_start: resolved.month_start,
    };
    tracing::debug!(
        solar = %solar.0,
        year = %pillars.year,
        month = %pillars.month,
        day = %pillars.day,
        hour = %pillars.hour,
        "computed four pillars"
    );
    pillars
}
