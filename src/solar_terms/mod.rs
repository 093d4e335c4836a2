//! Solar terms and BaZi year/month resolution
//!
//! Note: 為方便處理諸多術語，本模塊文檔用中文。
//!
//! 八字以節氣而非公曆日期分年分月：立春為歲首，十二個「月首節氣」各為一月之始。
//! 交節時刻取自預製的節氣表，見 [`table`]。

use chrono::{Datelike, NaiveDateTime};
use serde::Serialize;

use crate::fmt;
use crate::solar_time::SolarMoment;

pub mod table;

pub use table::SolarTermTable;

/// 二十四節氣，依時間順序自立春起。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolarTerm {
    SpringBegins,
    RainWater,
    InsectsAwaken,
    SpringEquinox,
    ClearBright,
    GrainRains,
    SummerBegins,
    GrainBuds,
    GrainInEar,
    SummerSolstice,
    MinorHeat,
    MajorHeat,
    AutumnBegins,
    StoppingHeat,
    WhiteDews,
    AutumnEquinox,
    ColdDews,
    FrostsDescent,
    WinterBegins,
    MinorSnow,
    MajorSnow,
    WinterSolstice,
    MinorCold,
    MajorCold,
}

impl SolarTerm {
    /// 全部節氣，依時間順序。
    pub const ALL: [SolarTerm; 24] = {
        use SolarTerm::*;
        [
            SpringBegins,
            RainWater,
            InsectsAwaken,
            SpringEquinox,
            ClearBright,
            GrainRains,
            SummerBegins,
            GrainBuds,
            GrainInEar,
            SummerSolstice,
            MinorHeat,
            MajorHeat,
            AutumnBegins,
            StoppingHeat,
            WhiteDews,
            AutumnEquinox,
            ColdDews,
            FrostsDescent,
            WinterBegins,
            MinorSnow,
            MajorSnow,
            WinterSolstice,
            MinorCold,
            MajorCold,
        ]
    };

    /// 節氣序號，`1..=24` 對應立春到大寒。
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    /// 節氣表中所用的鍵名。
    pub fn key(self) -> &'static str {
        use SolarTerm::*;
        match self {
            SpringBegins => "spring_begins",
            RainWater => "rain_water",
            InsectsAwaken => "insects_awaken",
            SpringEquinox => "spring_equinox",
            ClearBright => "clear_bright",
            GrainRains => "grain_rains",
            SummerBegins => "summer_begins",
            GrainBuds => "grain_buds",
            GrainInEar => "grain_in_ear",
            SummerSolstice => "summer_solstice",
            MinorHeat => "minor_heat",
            MajorHeat => "major_heat",
            AutumnBegins => "autumn_begins",
            StoppingHeat => "stopping_heat",
            WhiteDews => "white_dews",
            AutumnEquinox => "autumn_equinox",
            ColdDews => "cold_dews",
            FrostsDescent => "frosts_descent",
            WinterBegins => "winter_begins",
            MinorSnow => "minor_snow",
            MajorSnow => "major_snow",
            WinterSolstice => "winter_solstice",
            MinorCold => "minor_cold",
            MajorCold => "major_cold",
        }
    }

    /// 依鍵名取得節氣，無此鍵名則返回 `None`。
    ///
    /// # 用例
    ///
    /// ```
    /// use bazi::solar_terms::SolarTerm;
    ///
    /// assert_eq!(Some(SolarTerm::WhiteDews), SolarTerm::from_key("white_dews"));
    /// assert_eq!(None, SolarTerm::from_key("white_dew"));
    /// ```
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|term| term.key() == key)
    }

    /// 節氣中文名。
    pub fn name(self) -> &'static str {
        fmt::solar_term(self.number())
    }

    /// 小寒、大寒在節氣表中記於前一年之下，實際落在次年一月。
    pub fn is_cross_year(self) -> bool {
        matches!(self, SolarTerm::MinorCold | SolarTerm::MajorCold)
    }
}

/// 八字各月的月首節氣，第 `i` 項為 `i + 1` 月。
pub const MONTH_TERMS: [SolarTerm; 12] = {
    use SolarTerm::*;
    [
        SpringBegins,
        InsectsAwaken,
        ClearBright,
        SummerBegins,
        GrainBuds,
        SummerSolstice,
        MinorHeat,
        AutumnBegins,
        WhiteDews,
        ColdDews,
        WinterBegins,
        MinorSnow,
    ]
};

/// 某時刻所在的八字年月，及其年首、月首交節時刻。
///
/// 節氣表缺該數據時，對應的交節時刻為 `None`。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct BaziYearMonth {
    /// 八字年，為其立春所在的公元年
    pub year: i32,
    /// 八字月，`1..=12`
    pub month: u32,
    /// 該年立春時刻
    pub year_start: Option<NaiveDateTime>,
    /// 該月月首節氣時刻
    pub month_start: Option<NaiveDateTime>,
}

/// 求給定真太陽時所在的八字年月。
///
/// 先以公元年立春定年：早於立春（或節氣表無該年立春）則屬前一年。再依時間順序逐一比對該年各月首節氣，
/// 取最後一個已交節（時刻 `>=` 節氣）的月份，遇到首個未交節者即停止。若連正月亦未交節，則歸十二月，
/// 月首取前一年小雪。恰於交節時刻者屬新月。
///
/// # 用例
///
/// ```
/// use bazi::solar_terms::{SolarTermTable, resolve_bazi_year_month};
/// use bazi::SolarMoment;
/// use chrono::NaiveDate;
///
/// let table = SolarTermTable::builtin().unwrap();
/// let at = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(8, 30, 0).unwrap();
/// let resolved = resolve_bazi_year_month(&table, SolarMoment(at));
///
/// assert_eq!((2024, 5), (resolved.year, resolved.month));
/// ```
pub fn resolve_bazi_year_month(table: &SolarTermTable, solar: SolarMoment) -> BaziYearMonth {
    let moment = solar.0;
    let civil_year = moment.year();
    let year = match table.term_instant(civil_year, SolarTerm::SpringBegins) {
        Some(spring_begins) if moment >= spring_begins => civil_year,
        Some(_) => civil_year - 1,
        None => {
            tracing::debug!(year = civil_year, "no Spring Begins data, counting as before it");
            civil_year - 1
        }
    };
    let year_start = table.term_instant(year, SolarTerm::SpringBegins);

    let mut month = 12;
    let mut month_start = table.term_instant(year - 1, SolarTerm::MinorSnow);
    for (num, term) in (1..).zip(MONTH_TERMS) {
        match table.term_instant(year, term) {
            Some(start) if moment >= start => {
                month = num;
                month_start = Some(start);
            }
            _ => break,
        }
    }

    if year_start.is_none() || month_start.is_none() {
        tracing::debug!(year, month, "solar-term boundary unresolved");
    }
    BaziYearMonth {
        year,
        month,
        year_start,
        month_start,
    }
}
