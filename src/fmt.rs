//! Text forms of stems, branches, solar terms and boundary instants.

use chrono::NaiveDateTime;

/// Heavenly Stems, 甲 (index 0) to 癸.
pub const STEMS: &[&str] = &["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

/// Romanized Heavenly Stems, same order as [`STEMS`].
pub const STEMS_PINYIN: &[&str] = &[
    "Jia", "Yi", "Bing", "Ding", "Wu", "Ji", "Geng", "Xin", "Ren", "Gui",
];

/// Earthly Branches, 子 (index 0) to 亥.
pub const BRANCHES: &[&str] = &[
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

/// Romanized Earthly Branches, same order as [`BRANCHES`].
pub const BRANCHES_PINYIN: &[&str] = &[
    "Zi", "Chou", "Yin", "Mao", "Chen", "Si", "Wu", "Wei", "Shen", "You", "Xu", "Hai",
];

/// Name of solar term number `term`, `1..=24` being 立春 through 大寒.
///
/// # Example
///
/// ```
/// use bazi::fmt;
///
/// assert_eq!("立春", fmt::solar_term(1));
/// assert_eq!("穀雨", fmt::solar_term(6));
/// assert_eq!("大寒", fmt::solar_term(24));
/// ```
pub fn solar_term(term: u32) -> &'static str {
    const NAMES: &[&str] = &[
        "大寒", "立春", "雨水", "驚蟄", "春分", "清明", "穀雨", "立夏", "小滿", "芒種", "夏至",
        "小暑", "大暑", "立秋", "處暑", "白露", "秋分", "寒露", "霜降", "立冬", "小雪", "大雪",
        "冬至", "小寒",
    ];
    NAMES[term.rem_euclid(24) as usize]
}

/// Formats a solar-term boundary for display, e.g. `February 04, 1990 at 10:14`.
///
/// ```
/// use bazi::fmt;
/// use chrono::NaiveDate;
///
/// let at = NaiveDate::from_ymd_opt(1990, 2, 4).unwrap().and_hms_opt(10, 14, 0).unwrap();
/// assert_eq!("February 04, 1990 at 10:14", fmt::boundary(at));
/// ```
pub fn boundary(at: NaiveDateTime) -> String {
    at.format("%B %d, %Y at %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lengths() {
        assert_eq!(10, STEMS.len());
        assert_eq!(10, STEMS_PINYIN.len());
        assert_eq!(12, BRANCHES.len());
        assert_eq!(12, BRANCHES_PINYIN.len());
    }

    #[test]
    fn test_solar_term() {
        for (std, num) in [("立春", 1), ("驚蟄", 3), ("小滿", 8), ("小雪", 20), ("小寒", 23)] {
            assert_eq!(std, solar_term(num));
        }
        assert_eq!(solar_term(0), solar_term(24));
    }
}
