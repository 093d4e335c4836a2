//! Error types.

use std::path::PathBuf;

use thiserror::Error;

/// Rejected birth input. Raised before any calculation runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Year must be between {min} and {max}")]
    Year { min: i32, max: i32 },

    #[error("Month must be between 1 and 12")]
    Month,

    #[error("Day must be between 1 and {max} for {month_name}")]
    Day { max: u32, month_name: &'static str },

    #[error("Hour must be between 0 and 23")]
    Hour,

    #[error("Minute must be between 0 and 59")]
    Minute,

    #[error("Longitude must be between -180 and 180 degrees")]
    Longitude,

    #[error("Timezone offset must be a multiple of 0.5 hours between -12 and +14, got {0}")]
    TimezoneOffset(f64),

    #[error("Unrecognized timezone label: {0:?}")]
    TimezoneLabel(String),

    #[error("Solar time for {0} falls outside the supported date range")]
    SolarTimeOutOfRange(chrono::NaiveDateTime),
}

/// Failure loading one of the static data tables.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed table: {0}")]
    Syntax(#[from] toml::de::Error),

    #[error("table key {0:?} is not a year")]
    InvalidYear(String),

    #[error("year {year}: unknown solar term {name:?}")]
    UnknownTerm { year: i32, name: String },

    #[error("year {year}: {term} = {fields:?} is not a valid instant")]
    InvalidInstant {
        year: i32,
        term: &'static str,
        fields: [u32; 4],
    },

    #[error("unknown heavenly stem {0:?}")]
    UnknownStem(String),
}

/// Top-level error of the command-line front end.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
