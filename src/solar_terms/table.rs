//! 節氣時刻表
//!
//! 內置數據見 `data/solar_terms.toml`，格式為每年一表，`節氣鍵名 = [月, 日, 時, 分]`。
//! 亦可自外部文件載入同格式的表。

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};

use super::SolarTerm;
use crate::error::TableError;

static RAW_DATA: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/solar_terms.toml"));

/// 一年的各節氣時刻，以 [`SolarTerm`] 序為索引。
type TermRow = [Option<NaiveDateTime>; 24];

/// 只讀的節氣時刻表，鍵為（公元年, 節氣）。
///
/// 建立後不再變動，可在各次計算間共用。
///
/// # 用例
///
/// ```
/// use bazi::solar_terms::{SolarTerm, SolarTermTable};
///
/// let table = SolarTermTable::builtin().unwrap();
/// let spring = table.term_instant(2024, SolarTerm::SpringBegins).unwrap();
/// assert_eq!("2024-02-04 16:27:00", spring.to_string());
///
/// // 小寒記於 2024 年之下，實在 2025 年一月
/// let minor_cold = table.term_instant(2024, SolarTerm::MinorCold).unwrap();
/// assert_eq!("2025-01-05 22:49:00", minor_cold.to_string());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolarTermTable {
    years: BTreeMap<i32, TermRow>,
}

impl SolarTermTable {
    /// 載入內置節氣表。
    pub fn builtin() -> Result<Self, TableError> {
        Self::from_toml_str(RAW_DATA)
    }

    /// 自文件載入節氣表。
    pub fn load(path: &Path) -> Result<Self, TableError> {
        let content = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// 解析 TOML 格式的節氣表，並檢查每一項均為有效時刻。
    pub fn from_toml_str(content: &str) -> Result<Self, TableError> {
        let raw: BTreeMap<String, BTreeMap<String, [u32; 4]>> = toml::from_str(content)?;
        let mut years = BTreeMap::new();
        for (key, terms) in raw {
            let year: i32 = key.parse().map_err(|_| TableError::InvalidYear(key.clone()))?;
            let mut row: TermRow = [None; 24];
            for (name, fields) in terms {
                let term = SolarTerm::from_key(&name)
                    .ok_or_else(|| TableError::UnknownTerm { year, name })?;
                row[term as usize] = Some(instant(year, term, fields)?);
            }
            years.insert(year, row);
        }
        tracing::debug!(years = years.len(), "loaded solar-term table");
        Ok(Self { years })
    }

    /// 表中所有年份，由小到大。
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.keys().copied()
    }

    /// 取得 `year` 年 `term` 的交節時刻。
    ///
    /// 小寒、大寒返回次年一月的時刻。表中無此項則返回 `None`。
    pub fn term_instant(&self, year: i32, term: SolarTerm) -> Option<NaiveDateTime> {
        self.years.get(&year)?[term as usize]
    }

    /// 取得 `year` 年表中所有節氣及其時刻，依時間順序。無該年數據則為空。
    pub fn boundaries(&self, year: i32) -> Vec<(SolarTerm, NaiveDateTime)> {
        let Some(row) = self.years.get(&year) else {
            return Vec::new();
        };
        SolarTerm::ALL
            .into_iter()
            .zip(row)
            .filter_map(|(term, at)| Some((term, (*at)?)))
            .collect()
    }
}

fn instant(year: i32, term: SolarTerm, fields: [u32; 4]) -> Result<NaiveDateTime, TableError> {
    let [month, day, hour, minute] = fields;
    let calendar_year = if term.is_cross_year() { year + 1 } else { year };
    NaiveDate::from_ymd_opt(calendar_year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .ok_or(TableError::InvalidInstant {
            year,
            term: term.key(),
            fields,
        })
}
