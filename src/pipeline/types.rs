use std::fmt;

use crate::mx::DnsOptions;

/// Classification of one address. The first failing rule wins.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    Ok,
    NullOrEmpty,
    Invalid,
    NotWellFormed,
    Fake,
    NoMx,
}

impl Outcome {
    pub const ALL: [Outcome; 6] = [
        Outcome::Ok,
        Outcome::NullOrEmpty,
        Outcome::Invalid,
        Outcome::NotWellFormed,
        Outcome::Fake,
        Outcome::NoMx,
    ];

    /// Label written to the report.
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Ok => "OK",
            Outcome::NullOrEmpty => "Null or empty",
            Outcome::Invalid => "Invalid",
            Outcome::NotWellFormed => "Not well formed",
            Outcome::Fake => "Fake",
            Outcome::NoMx => "No MX",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.label() == label)
    }

    pub fn is_ok(self) -> bool {
        self == Outcome::Ok
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An [`Outcome`] plus what triggered it (matched marker, syntax error, ...).
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub outcome: Outcome,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub detail: Option<String>,
}

impl Verdict {
    pub fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            detail: None,
        }
    }

    pub fn with_detail(outcome: Outcome, detail: impl Into<String>) -> Self {
        Self {
            outcome,
            detail: Some(detail.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn label(&self) -> &'static str {
        self.outcome.label()
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{}: {}", self.outcome, detail),
            None => write!(f, "{}", self.outcome),
        }
    }
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Addresses shorter than this (in chars) are `Invalid`.
    pub min_length: usize,
    pub dns: DnsOptions,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            min_length: 5,
            dns: DnsOptions::default(),
        }
    }
}
