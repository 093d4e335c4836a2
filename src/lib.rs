//! BaZi (Four Pillars of Destiny) calculation.
//!
//! A birth date and time is first converted from civil clock time into
//! apparent solar time at the birth longitude. The solar moment is then
//! placed in the solar-term calendar, which starts each year at Spring
//! Begins (立春), and the four sexagenary pillars of year, month, day and
//! hour are derived from it.
//!
//! Solar-term instants come from an embedded table covering a limited set of
//! years. When the table has no Spring Begins for the civil year, the moment
//! counts as falling before it and belongs to the previous BaZi year. The
//! month is then found from that year's terms. A boundary is reported as
//! unknown only when the table lacks the term it falls on, so a moment in an
//! uncovered year after a covered one resolves to month 12 of the covered
//! year, with both boundaries known.
//!
//! # Examples
//!
//! ```
//! use bazi::{BirthInput, Config, SolarTermTable, civil_to_apparent_solar, four_pillars};
//!
//! let config = Config::default();
//! let table = SolarTermTable::builtin().unwrap();
//!
//! // Hong Kong, 114.1694°E, GMT+8
//! let input = BirthInput::new(1990, 1, 1, 12, 0, 8.0, Some(114.1694));
//! let civil = input.civil_moment(&config).unwrap();
//! let conversion = civil_to_apparent_solar(&civil).unwrap();
//! assert_eq!("1990-01-01 11:33:04", conversion.solar.0.format("%F %T").to_string());
//!
//! let pillars = four_pillars(&table, conversion.solar);
//! assert_eq!("庚午 癸亥 丙寅 壬午", format!(
//!     "{} {} {} {}",
//!     pillars.year, pillars.month, pillars.day, pillars.hour
//! ));
//! assert_eq!("Bing", pillars.day_master.pinyin());
//! ```
//!
//! Invalid input is rejected before any calculation:
//!
//! ```
//! use bazi::{BirthInput, Config};
//!
//! let input = BirthInput::new(2023, 2, 29, 12, 0, 8.0, None);
//! let err = input.civil_moment(&Config::default()).unwrap_err();
//! assert_eq!("Day must be between 1 and 28 for February", err.to_string());
//! ```

pub mod config;
pub mod date;
pub mod error;
pub mod fmt;
pub mod input;
pub mod pillars;
pub mod profile;
pub mod solar_terms;
pub mod solar_time;

pub use config::Config;
pub use date::YearType;
pub use error::{Error, InputError, Result, TableError};
pub use input::{BirthInput, CivilMoment, validate};
pub use pillars::{Branch, FourPillars, Pillar, Stem, four_pillars};
pub use profile::{Profile, ProfileBook};
pub use solar_terms::{BaziYearMonth, SolarTerm, SolarTermTable};
pub use solar_time::{CorrectionScale, SolarConversion, SolarMoment, civil_to_apparent_solar};
