//! The validation pipeline: cheap checks first, DNS last.

mod types;

pub use types::{Outcome, ValidationOptions, Verdict};

use crate::heuristics::Heuristics;
use crate::mx::{MxError, MxResolver, MxTransport, SystemTransport};
use crate::validator::check_syntax;

pub struct Validator<T = SystemTransport> {
    heuristics: Heuristics,
    options: ValidationOptions,
    resolver: MxResolver<T>,
}

impl Validator<SystemTransport> {
    pub fn from_system_conf(
        heuristics: Heuristics,
        options: ValidationOptions,
    ) -> Result<Self, MxError> {
        let resolver = MxResolver::from_system_conf(&options.dns)?;
        Ok(Self::with_resolver(heuristics, options, resolver))
    }
}

impl<T> Validator<T>
where
    T: MxTransport,
{
    pub fn with_transport(heuristics: Heuristics, options: ValidationOptions, transport: T) -> Self {
        Self::with_resolver(heuristics, options, MxResolver::new(transport))
    }

    pub fn with_resolver(
        heuristics: Heuristics,
        options: ValidationOptions,
        resolver: MxResolver<T>,
    ) -> Self {
        Self {
            heuristics,
            options,
            resolver,
        }
    }

    /// Classifies `email`.
    ///
    /// Rules run in a fixed order and stop at the first failure: empty,
    /// too short or invalid marker, syntax, fake marker, MX. Rejections are
    /// `Ok(verdict)`; `Err` only comes from the resolver refusing its input,
    /// which the syntax step rules out.
    pub fn validate(&self, email: &str) -> Result<Verdict, MxError> {
        if email.trim().is_empty() {
            return Ok(Verdict::new(Outcome::NullOrEmpty));
        }

        let len = email.chars().count();
        if len < self.options.min_length {
            return Ok(Verdict::with_detail(
                Outcome::Invalid,
                format!("length {len} < {}", self.options.min_length),
            ));
        }
        if let Some(marker) = self.heuristics.invalid.find_marker(email) {
            return Ok(Verdict::with_detail(
                Outcome::Invalid,
                format!("contains '{marker}'"),
            ));
        }

        if let Err(err) = check_syntax(email) {
            tracing::debug!(email, reason = %err, "address is not well formed");
            return Ok(Verdict::with_detail(Outcome::NotWellFormed, err.to_string()));
        }

        if let Some(marker) = self.heuristics.fake.find_marker(email) {
            return Ok(Verdict::with_detail(Outcome::Fake, format!("contains '{marker}'")));
        }

        let servers = self.resolver.get_mx(email)?;
        match servers.first() {
            None => Ok(Verdict::new(Outcome::NoMx)),
            Some(best) => Ok(Verdict::with_detail(
                Outcome::Ok,
                format!("{} MX, preferred {}", servers.len(), best.exchange),
            )),
        }
    }

    /// Same as [`validate`](Self::validate); absent input is `NullOrEmpty`.
    pub fn validate_opt(&self, email: Option<&str>) -> Result<Verdict, MxError> {
        match email {
            Some(email) => self.validate(email),
            None => Ok(Verdict::new(Outcome::NullOrEmpty)),
        }
    }

    pub fn heuristics(&self) -> &Heuristics {
        &self.heuristics
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    pub fn resolver(&self) -> &MxResolver<T> {
        &self.resolver
    }
}
