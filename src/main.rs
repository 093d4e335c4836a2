//! Command-line BaZi calculator.
//!
//! Prints the Four Pillars of a birth moment together with the Day Master
//! profile and the solar-time diagnostics.

use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;
use std::process::ExitCode;

use bazi::input::{format_gmt_offset, parse_gmt_offset};
use bazi::{
    BirthInput, CivilMoment, Config, CorrectionScale, FourPillars, Profile, ProfileBook,
    SolarConversion, SolarTermTable, civil_to_apparent_solar, four_pillars,
};
use clap::Parser;
use serde::Serialize;

/// BaZi calculator - Four Pillars of Destiny from a birth date and time
#[derive(Parser, Debug)]
#[command(name = "bazi")]
#[command(about = "Compute the Four Pillars of Destiny in apparent solar time")]
struct Args {
    /// Birth year
    year: i32,
    /// Birth month (1-12)
    month: u32,
    /// Birth day
    day: u32,
    /// Birth hour (0-23, clock time)
    hour: u32,
    /// Birth minute (0-59)
    minute: u32,

    /// Timezone of the clock reading, e.g. GMT+8 or GMT-3.5
    #[arg(long, default_value = "GMT+8")]
    tz: String,

    /// Birth longitude in decimal degrees east; defaults to the timezone meridian
    #[arg(long, allow_negative_numbers = true)]
    longitude: Option<f64>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,
}

/// Everything shown for one birth moment. Serializes as the JSON report and
/// displays as the text report.
#[derive(Serialize)]
struct Report<'a> {
    input: CivilMoment,
    timezone: String,
    conversion: SolarConversion,
    total_correction: f64,
    correction_scale: CorrectionScale,
    pillars: FourPillars,
    year_start: Option<String>,
    month_start: Option<String>,
    day_master: Option<&'a Profile>,
}

impl<'a> Report<'a> {
    fn new(
        input: &BirthInput,
        config: &Config,
        table: &SolarTermTable,
        book: &'a ProfileBook,
    ) -> bazi::Result<Self> {
        let civil = input.civil_moment(config)?;
        let conversion = civil_to_apparent_solar(&civil)?;
        let pillars = four_pillars(table, conversion.solar);
        let profile = book.get(pillars.day_master);
        if profile.is_none() {
            tracing::warn!(stem = %pillars.day_master, "no profile for day master");
        }
        tracing::info!(
            civil = %civil.datetime,
            solar = %conversion.solar.0,
            day_master = %pillars.day_master,
            "calculated"
        );
        Ok(Self {
            input: civil,
            timezone: format_gmt_offset(civil.tz_offset_hours),
            conversion,
            total_correction: conversion.total_correction(),
            correction_scale: CorrectionScale::of(&conversion, config),
            pillars,
            year_start: pillars.year_start_display(),
            month_start: pillars.month_start_display(),
            day_master: profile,
        })
    }

    fn fmt_pillars(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Four Pillars")?;
        let p = &self.pillars;
        for (label, pillar) in [("Year", p.year), ("Month", p.month), ("Day", p.day), ("Hour", p.hour)] {
            writeln!(
                f,
                "  {:<6} {}  {:<10} {}",
                label,
                pillar,
                pillar.pinyin(),
                pillar.meaning()
            )?;
        }
        Ok(())
    }

    fn fmt_profile(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let stem = self.pillars.day_master;
        let Some(profile) = self.day_master else {
            return writeln!(f, "Day Master {stem}: Day Master data unavailable for computed stem.");
        };
        writeln!(f, "Day Master {} ({}) - {}", stem, profile.name, profile.element)?;
        writeln!(f, "  {}", profile.description)?;
        writeln!(f, "  Strengths:")?;
        for trait_ in &profile.positive_traits {
            writeln!(f, "    - {trait_}")?;
        }
        writeln!(f, "  Challenges:")?;
        for challenge in &profile.challenges {
            writeln!(f, "    - {challenge}")?;
        }
        writeln!(f, "  Compatibility: {}", profile.compatibility)?;
        writeln!(f, "  Career paths: {}", profile.career_paths)?;
        writeln!(f, "  Philosophy: {}", profile.life_philosophy)
    }

    fn fmt_diagnostics(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (civil, conv, pillars) = (&self.input, &self.conversion, &self.pillars);
        writeln!(f, "Calculation details")?;
        writeln!(
            f,
            "  Civil time:       {} {}",
            civil.datetime.format("%Y-%m-%d %H:%M"),
            self.timezone
        )?;
        writeln!(f, "  Longitude used:   {:+.4}°", civil.longitude)?;
        writeln!(
            f,
            "  Solar time:       {}",
            conv.solar.0.format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(
            f,
            "  Corrections:      longitude {:+.2} min, equation of time {:+.2} min, total {:+.2} min",
            conv.longitude_correction, conv.equation_of_time, self.total_correction
        )?;
        if let Some(notice) = self.correction_scale.notice() {
            writeln!(f, "  Note: {notice}")?;
        }
        writeln!(
            f,
            "  BaZi year/month:  {} / {}",
            pillars.bazi_year, pillars.bazi_month
        )?;
        const UNKNOWN: &str = "unknown (no solar-term data)";
        writeln!(
            f,
            "  Year starts:      {}",
            self.year_start.as_deref().unwrap_or(UNKNOWN)
        )?;
        writeln!(
            f,
            "  Month starts:     {}",
            self.month_start.as_deref().unwrap_or(UNKNOWN)
        )?;
        writeln!(
            f,
            "  Julian Date:      {:.6} (day number {})",
            pillars.jd, pillars.jd_noon
        )
    }
}

impl Display for Report<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.fmt_pillars(f)?;
        writeln!(f)?;
        self.fmt_profile(f)?;
        writeln!(f)?;
        self.fmt_diagnostics(f)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("bazi=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> bazi::Result<()> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let table = match &config.solar_terms {
        Some(path) => SolarTermTable::load(path)?,
        None => SolarTermTable::builtin()?,
    };
    let book = match &config.profiles {
        Some(path) => ProfileBook::load(path)?,
        None => ProfileBook::builtin()?,
    };

    let input = BirthInput::new(
        args.year,
        args.month,
        args.day,
        args.hour,
        args.minute,
        parse_gmt_offset(&args.tz)?,
        args.longitude,
    );
    let report = Report::new(&input, &config, &table, &book)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazi::{Error, InputError};

    fn hong_kong() -> BirthInput {
        BirthInput::new(1990, 1, 1, 12, 0, 8.0, Some(114.1694))
    }

    fn report<'a>(input: &BirthInput, book: &'a ProfileBook) -> Report<'a> {
        let config = Config {
            max_year: Some(2025),
            ..Config::default()
        };
        let table = SolarTermTable::builtin().unwrap();
        Report::new(input, &config, &table, book).unwrap()
    }

    #[test]
    fn text_report() {
        let book = ProfileBook::builtin().unwrap();
        let text = report(&BirthInput::new(2024, 6, 1, 8, 30, 8.0, None), &book).to_string();
        assert!(text.contains("  Year   乙巳  Yi Si      Wood Snake"), "{text}");
        assert!(text.contains("Day Master 丙 (Yang Fire)"), "{text}");
        assert!(text.contains("  Civil time:       2024-06-01 08:30 GMT+8"), "{text}");
        assert!(text.contains("  Longitude used:   +120.0000°"), "{text}");
        assert!(text.contains("  Month starts:     May 20, 2024 at 20:59"), "{text}");
        assert!(!text.contains("unknown"), "{text}");
        assert!(!text.contains("Note:"), "{text}");
    }

    #[test]
    fn missing_profile() {
        let book = ProfileBook::default();
        let report = report(&hong_kong(), &book);
        assert_eq!(None, report.day_master);
        let text = report.to_string();
        assert!(
            text.contains("Day Master 丙: Day Master data unavailable for computed stem."),
            "{text}"
        );
        assert!(!text.contains("Strengths:"), "{text}");
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["day_master"].is_null());
        assert_eq!("丙寅", json["pillars"]["day"]["hanzi"]);
    }

    #[test]
    fn unresolved_boundaries() {
        let book = ProfileBook::builtin().unwrap();
        let report = report(&hong_kong(), &book);
        let text = report.to_string();
        assert!(text.contains("  Year starts:      unknown (no solar-term data)"), "{text}");
        assert!(text.contains("  Month starts:     unknown (no solar-term data)"), "{text}");
        assert!(text.contains("  Note: Moderate time correction applied"), "{text}");
        assert!(text.contains("  Julian Date:      2447892.981296 (day number 2447893)"), "{text}");

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["year_start"].is_null());
        assert!(json["month_start"].is_null());
        assert_eq!("Moderate", json["correction_scale"]);
        assert_eq!("庚午", json["pillars"]["year"]["hanzi"]);
        assert_eq!("Metal Horse", json["pillars"]["year"]["meaning"]);
        assert_eq!("Yang Fire", json["day_master"]["name"]);
    }

    #[test]
    fn rejects_invalid_input() {
        let book = ProfileBook::builtin().unwrap();
        let table = SolarTermTable::builtin().unwrap();
        let input = BirthInput::new(2023, 2, 29, 12, 0, 8.0, None);
        let err = Report::new(&input, &Config::default(), &table, &book)
            .err()
            .unwrap();
        assert!(matches!(err, Error::Input(InputError::Day { max: 28, .. })), "{err}");
    }
}
