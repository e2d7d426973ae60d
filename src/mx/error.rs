use thiserror::Error;

use crate::validator::SyntaxError;

#[derive(Debug, Error)]
pub enum MxError {
    #[error("the provided address cannot be empty")]
    EmptyAddress,
    #[error("the provided address is invalid: {source}")]
    InvalidAddress {
        #[source]
        source: SyntaxError,
    },
    #[error("resolver initialization failed: {source}")]
    ResolverInit {
        #[source]
        source: std::io::Error,
    },
    #[error("MX lookup failed for {hostname}: {source}")]
    Lookup {
        hostname: String,
        #[source]
        source: trust_dns_resolver::error::ResolveError,
    },
    #[error("MX response has no record list: {response:?}")]
    MalformedResponse { response: String },
    #[error("MX entry {entry:?} must be '<priority> <server>'")]
    MalformedEntry { entry: String },
    #[error("MX entry {entry:?} has an invalid priority: {source}")]
    InvalidPriority {
        entry: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

impl MxError {
    pub(crate) fn invalid_address(source: SyntaxError) -> Self {
        Self::InvalidAddress { source }
    }

    pub(crate) fn resolver_init(source: std::io::Error) -> Self {
        Self::ResolverInit { source }
    }

    pub(crate) fn lookup(
        hostname: impl Into<String>,
        source: trust_dns_resolver::error::ResolveError,
    ) -> Self {
        Self::Lookup {
            hostname: hostname.into(),
            source,
        }
    }

    pub(crate) fn malformed_response(response: impl Into<String>) -> Self {
        Self::MalformedResponse {
            response: response.into(),
        }
    }

    pub(crate) fn malformed_entry(entry: impl Into<String>) -> Self {
        Self::MalformedEntry {
            entry: entry.into(),
        }
    }

    pub(crate) fn invalid_priority(entry: impl Into<String>, source: std::num::ParseIntError) -> Self {
        Self::InvalidPriority {
            entry: entry.into(),
            source,
        }
    }
}
