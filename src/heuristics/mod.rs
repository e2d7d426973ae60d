//! Substring blocklists applied to raw addresses.
//!
//! Two lists drive the pipeline: *invalid* markers (structural anomalies such
//! as `@@` or duplicated suffixes like `.com.com`) and *fake* markers
//! (placeholder values typed into forms, e.g. `teste`, `naotem`). Both ship
//! with defaults and can be extended or replaced from text files.

mod error;

use std::io::BufRead;
use std::path::Path;

use phf::phf_set;

pub use error::MarkerError;

const DEFAULT_INVALID: phf::Set<&'static str> = phf_set! {
    "@@",
    "*",
    ",",
    ".com.com",
    ".br.br",
    // valeurs "null" sérialisées dans l'export
    "null",
};

const DEFAULT_FAKE: phf::Set<&'static str> = phf_set! {
    "teste",
    "naolembra",
    "nao.com",
    "nao@nao",
    "clienteoutbound",
    "aliancamotoshonda",
    "naotem",
    "ntem",
    "proposta",
    "possui",
};

/// An unordered set of literal, case-sensitive substrings.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerSet {
    markers: Vec<String>,
}

impl MarkerSet {
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        set.extend(markers);
        set
    }

    pub fn default_invalid() -> Self {
        Self::new(DEFAULT_INVALID.iter().copied())
    }

    pub fn default_fake() -> Self {
        Self::new(DEFAULT_FAKE.iter().copied())
    }

    /// Reads one marker per line; blank lines and `#` comments are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> std::io::Result<Self> {
        let mut set = Self::default();
        for line in reader.lines() {
            let line = line?;
            let marker = line.trim();
            if marker.is_empty() || marker.starts_with('#') {
                continue;
            }
            set.insert(marker);
        }
        Ok(set)
    }

    pub fn load(path: &Path) -> Result<Self, MarkerError> {
        let file = std::fs::File::open(path).map_err(|err| MarkerError::read(path, err))?;
        Self::from_reader(std::io::BufReader::new(file)).map_err(|err| MarkerError::read(path, err))
    }

    /// Adds `marker` unless it is empty or already present.
    pub fn insert(&mut self, marker: impl Into<String>) -> bool {
        let marker = marker.into();
        // un marqueur vide matcherait toutes les adresses
        if marker.is_empty() || self.markers.contains(&marker) {
            return false;
        }
        self.markers.push(marker);
        true
    }

    pub fn extend<I, S>(&mut self, markers: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for marker in markers {
            self.insert(marker);
        }
    }

    pub fn contains_marker(&self, address: &str) -> bool {
        self.find_marker(address).is_some()
    }

    /// First marker (in insertion order) found in `address`.
    pub fn find_marker(&self, address: &str) -> Option<&str> {
        self.markers
            .iter()
            .map(String::as_str)
            .find(|marker| address.contains(marker))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.markers.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

/// Both marker lists used by the pipeline.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heuristics {
    pub invalid: MarkerSet,
    pub fake: MarkerSet,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            invalid: MarkerSet::default_invalid(),
            fake: MarkerSet::default_fake(),
        }
    }
}

impl Heuristics {
    pub fn new(invalid: MarkerSet, fake: MarkerSet) -> Self {
        Self { invalid, fake }
    }

    pub fn is_invalid(&self, address: &str) -> bool {
        self.invalid.contains_marker(address)
    }

    pub fn is_fake(&self, address: &str) -> bool {
        self.fake.contains_marker(address)
    }
}
