//! Day Master personality profiles.
//!
//! Profiles are keyed by the stem character. The embedded set lives in
//! `data/day_masters.toml`; a replacement file with the same shape can be
//! loaded instead.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TableError;
use crate::pillars::Stem;

static RAW_DATA: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/day_masters.toml"));

/// Descriptive record for one Day Master.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    /// e.g. `Yang Wood`.
    pub name: String,
    /// Poetic element label, e.g. `The Upright Tree`.
    pub element: String,
    pub description: String,
    pub positive_traits: Vec<String>,
    pub challenges: Vec<String>,
    pub compatibility: String,
    pub career_paths: String,
    pub life_philosophy: String,
}

/// Read-only set of profiles.
///
/// ```
/// use bazi::{ProfileBook, Stem};
///
/// let book = ProfileBook::builtin().unwrap();
/// assert_eq!("Yang Fire", book.get(Stem::Bing).unwrap().name);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileBook {
    profiles: HashMap<Stem, Profile>,
}

impl ProfileBook {
    pub fn builtin() -> Result<Self, TableError> {
        Self::from_toml_str(RAW_DATA)
    }

    pub fn load(path: &Path) -> Result<Self, TableError> {
        let content = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses profiles from TOML text. Every table key must be a stem
    /// character. Stems may be left out.
    pub fn from_toml_str(content: &str) -> Result<Self, TableError> {
        let raw: BTreeMap<String, Profile> = toml::from_str(content)?;
        let profiles = raw
            .into_iter()
            .map(|(key, profile)| match Stem::from_hanzi(&key) {
                Some(stem) => Ok((stem, profile)),
                None => Err(TableError::UnknownStem(key)),
            })
            .collect::<Result<HashMap<_, _>, _>>()?;
        tracing::debug!(profiles = profiles.len(), "loaded day master profiles");
        Ok(Self { profiles })
    }

    /// Profile of `stem`, if the book has one.
    pub fn get(&self, stem: Stem) -> Option<&Profile> {
        self.profiles.get(&stem)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
