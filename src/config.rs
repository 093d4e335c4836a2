//! Calculation settings with documented defaults.
//!
//! Every field may be omitted from a configuration file, in which case the
//! default below applies.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use chrono::Datelike;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Years a configuration may open up for birth input.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1..=9999;

/// Settings shared by validation, the diagnostic notices and data loading.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Earliest accepted birth year.
    pub min_year: i32,

    /// Latest accepted birth year. The current local year when unset.
    pub max_year: Option<i32>,

    /// Total solar-time correction (minutes, absolute) above which the
    /// correction is reported as moderate.
    pub moderate_correction_minutes: f64,

    /// Total solar-time correction (minutes, absolute) above which the
    /// correction is reported as large.
    pub large_correction_minutes: f64,

    /// Solar-term table replacing the embedded one.
    pub solar_terms: Option<PathBuf>,

    /// Day Master profiles replacing the embedded ones.
    pub profiles: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_year: 1900,
            max_year: None,
            moderate_correction_minutes: 15.0,
            large_correction_minutes: 30.0,
            solar_terms: None,
            profiles: None,
        }
    }
}

impl Config {
    /// Reads a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from TOML text.
    ///
    /// ```
    /// use bazi::Config;
    ///
    /// let config = Config::from_toml_str("max_year = 2000").unwrap();
    /// assert_eq!(Some(2000), config.max_year);
    /// assert_eq!(1900, config.min_year);
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        for year in [Some(config.min_year), config.max_year].into_iter().flatten() {
            if !SUPPORTED_YEARS.contains(&year) {
                return Err(Error::Config(format!(
                    "year bound {} outside {}..={}",
                    year,
                    SUPPORTED_YEARS.start(),
                    SUPPORTED_YEARS.end()
                )));
            }
        }
        if config.max_year.is_some_and(|max| max < config.min_year) {
            return Err(Error::Config(format!(
                "max_year {:?} precedes min_year {}",
                config.max_year, config.min_year
            )));
        }
        if config.large_correction_minutes < config.moderate_correction_minutes {
            return Err(Error::Config(
                "large_correction_minutes is below moderate_correction_minutes".into(),
            ));
        }
        Ok(config)
    }

    /// Latest accepted birth year, resolving an unset bound to the current
    /// local year.
    pub fn max_year(&self) -> i32 {
        self.max_year
            .unwrap_or_else(|| chrono::Local::now().year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(Config::default(), config);
        assert!(config.max_year() >= 2025);
    }

    #[test]
    fn overrides() {
        let config = Config::from_toml_str(
            r#"
            min_year = 1950
            max_year = 2020
            large_correction_minutes = 45.0
            solar_terms = "terms.toml"
            "#,
        )
        .unwrap();
        assert_eq!(1950, config.min_year);
        assert_eq!(2020, config.max_year());
        assert_eq!(45.0, config.large_correction_minutes);
        assert_eq!(15.0, config.moderate_correction_minutes);
        assert_eq!(Some(PathBuf::from("terms.toml")), config.solar_terms);
    }

    #[test]
    fn rejects_inconsistent() {
        assert!(Config::from_toml_str("min_year = 2000\nmax_year = 1999").is_err());
        assert!(Config::from_toml_str("large_correction_minutes = 10.0").is_err());
        assert!(Config::from_toml_str("unknown = 1").is_err());
    }

    #[test]
    fn rejects_unsupported_years() {
        for content in ["max_year = 262142", "min_year = -300000", "min_year = 0", "max_year = 10000"] {
            let err = Config::from_toml_str(content).unwrap_err();
            assert!(matches!(err, Error::Config(_)), "{content}: {err}");
        }
        let config = Config::from_toml_str("min_year = 1\nmax_year = 9999").unwrap();
        assert_eq!((1, 9999), (config.min_year, config.max_year()));
    }
}
