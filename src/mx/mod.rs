//! DNS MX resolution with a per-run cache.
//!
//! [`MxResolver::get_mx`] checks its argument, extracts the hostname and
//! answers from the [`MxCache`] when it can. On a miss it asks the
//! [`MxTransport`] for the raw answer and parses it with
//! [`parse_mx_response`]. Failed lookups and unparsable answers are logged and
//! cached as "no records", so a bad domain is queried once per run.

mod cache;
mod error;
mod parse;
mod resolver;
mod types;

pub use cache::MxCache;
pub use error::MxError;
pub use parse::parse_mx_response;
pub use resolver::{MxTransport, SystemTransport};
pub use types::{DnsOptions, MxRecord, MxRecords};

use crate::validator::{check_syntax, hostname};

pub struct MxResolver<T> {
    transport: T,
    cache: MxCache,
}

impl MxResolver<SystemTransport> {
    pub fn from_system_conf(options: &DnsOptions) -> Result<Self, MxError> {
        Ok(Self::new(SystemTransport::from_system_conf(options)?))
    }
}

impl<T> MxResolver<T>
where
    T: MxTransport,
{
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            cache: MxCache::new(),
        }
    }

    /// MX records of the domain of `email`, lowest preference first.
    ///
    /// `email` must be non-empty and well formed; anything else is a caller
    /// bug and comes back as an error. DNS failures do not: they yield an
    /// empty list.
    pub fn get_mx(&self, email: &str) -> Result<MxRecords, MxError> {
        if email.trim().is_empty() {
            return Err(MxError::EmptyAddress);
        }
        check_syntax(email).map_err(MxError::invalid_address)?;

        let host = hostname(email);
        Ok(self.cache.get_or_resolve(&host, || self.lookup(&host)))
    }

    pub fn cache(&self) -> &MxCache {
        &self.cache
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn lookup(&self, hostname: &str) -> Vec<MxRecord> {
        tracing::debug!(hostname, "querying MX records");
        let raw = match self.transport.query_mx(hostname) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(hostname, "no MX records");
                return Vec::new();
            }
            Err(err) => {
                tracing::warn!(hostname, error = %err, "MX lookup failed");
                return Vec::new();
            }
        };

        match parse_mx_response(&raw) {
            Ok(records) => {
                tracing::debug!(hostname, ?records, "found MX servers");
                records
            }
            Err(err) => {
                tracing::warn!(hostname, response = %raw, error = %err, "unparsable MX response");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests;
