use thiserror::Error;

/// Why an address was rejected by [`check_syntax`](super::check_syntax).
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("address is empty")]
    Empty,
    #[error("address contains whitespace")]
    Whitespace,
    #[error("total length {0} > 254")]
    TooLong(usize),
    #[error("must contain exactly one '@'")]
    AtSign,
    #[error("local part length {0} invalid (1..=64)")]
    LocalLength(usize),
    #[error("invalid local part")]
    LocalPart,
    #[error("{0}")]
    Domain(String),
}

impl SyntaxError {
    pub(crate) fn domain(reason: impl Into<String>) -> Self {
        Self::Domain(reason.into())
    }
}
