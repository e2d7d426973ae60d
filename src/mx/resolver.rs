use trust_dns_resolver::{
    Resolver,
    error::{ResolveError, ResolveErrorKind},
    lookup::MxLookup,
    system_conf::read_system_conf,
};

use super::{DnsOptions, MxError};

/// DNS capability used by [`MxResolver`](super::MxResolver).
///
/// Returns the raw MX answer in presentation format
/// (`"MX: <preference> <exchange>., ..."`), or `None` when the name has no MX
/// records.
pub trait MxTransport {
    fn query_mx(&self, hostname: &str) -> Result<Option<String>, MxError>;
}

/// [`MxTransport`] backed by the system resolver configuration.
pub struct SystemTransport {
    resolver: Resolver,
}

impl SystemTransport {
    pub fn from_system_conf(options: &DnsOptions) -> Result<Self, MxError> {
        let (config, mut opts) = read_system_conf().map_err(MxError::resolver_init)?;
        if let Some(timeout) = options.timeout() {
            opts.timeout = timeout;
        }
        if options.attempts > 0 {
            opts.attempts = options.attempts;
        }
        let resolver = Resolver::new(config, opts).map_err(MxError::resolver_init)?;
        Ok(Self { resolver })
    }
}

impl MxTransport for SystemTransport {
    fn query_mx(&self, hostname: &str) -> Result<Option<String>, MxError> {
        let ascii = idna::domain_to_ascii(hostname).unwrap_or_else(|_| hostname.to_string());
        match self.resolver.mx_lookup(ascii.as_str()) {
            Ok(lookup) => Ok(render_lookup(&lookup)),
            Err(err) if is_no_records(&err) => Ok(None),
            Err(err) => Err(MxError::lookup(hostname, err)),
        }
    }
}

fn render_lookup(lookup: &MxLookup) -> Option<String> {
    let entries = lookup
        .iter()
        .map(|mx| render_entry(mx.preference(), &mx.exchange().to_utf8()))
        .collect::<Vec<_>>();
    if entries.is_empty() {
        None
    } else {
        Some(format!("MX: {}", entries.join(", ")))
    }
}

pub(crate) fn render_entry(preference: u16, exchange: &str) -> String {
    if exchange.ends_with('.') {
        format!("{preference} {exchange}")
    } else {
        format!("{preference} {exchange}.")
    }
}

fn is_no_records(err: &ResolveError) -> bool {
    matches!(err.kind(), ResolveErrorKind::NoRecordsFound { .. })
}
