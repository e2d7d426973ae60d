//! Address syntax checks and hostname extraction.

mod domain;
mod local;
mod types;

pub use types::SyntaxError;

use domain::check_domain;
use local::{is_local_part, is_quoted};

const MAX_ADDRESS_LEN: usize = 254;
const MAX_LOCAL_LEN: usize = 64;

/// Domain part of `email`: everything after the first `@`, lowercased and
/// trimmed. Returns an empty string when there is nothing to extract.
pub fn hostname(email: &str) -> String {
    if email.trim().is_empty() {
        return String::new();
    }
    match email.split_once('@') {
        Some((_, host)) => host.to_lowercase().trim().to_string(),
        None => String::new(),
    }
}

/// Same as [`hostname`], for input that may be absent.
pub fn hostname_opt(email: Option<&str>) -> String {
    email.map(hostname).unwrap_or_default()
}

/// Checks `email` against the address grammar and reports the first rule it
/// breaks.
///
/// Surrounding whitespace is ignored. The rules are a pragmatic subset of
/// RFC 5322: a dot-atom or simple quoted local part, exactly one `@`, and an
/// IDNA domain made of LDH labels. Single-label domains are accepted.
pub fn check_syntax(email: &str) -> Result<(), SyntaxError> {
    let input = email.trim();
    if input.is_empty() {
        return Err(SyntaxError::Empty);
    }

    let len = input.chars().count();
    if len > MAX_ADDRESS_LEN {
        return Err(SyntaxError::TooLong(len));
    }

    let unquoted = match input.rsplit_once('@') {
        Some((local, domain)) if is_quoted(local) => domain,
        _ => input,
    };
    if has_whitespace(unquoted) {
        return Err(SyntaxError::Whitespace);
    }

    // un seul '@', même entre guillemets: `hostname` coupe sur le premier
    if input.matches('@').count() != 1 {
        return Err(SyntaxError::AtSign);
    }
    let (local, domain) = input.split_once('@').ok_or(SyntaxError::AtSign)?;

    let local_len = local.chars().count();
    if local_len == 0 || local_len > MAX_LOCAL_LEN {
        return Err(SyntaxError::LocalLength(local_len));
    }
    if !is_local_part(local) {
        return Err(SyntaxError::LocalPart);
    }

    check_domain(domain)
}

/// Same as [`check_syntax`], as a predicate; rejections are only logged.
pub fn is_well_formed(email: &str) -> bool {
    match check_syntax(email) {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!(email, reason = %err, "address is not well formed");
            false
        }
    }
}

/// Absent input is never well formed.
pub fn is_well_formed_opt(email: Option<&str>) -> bool {
    email.is_some_and(is_well_formed)
}

fn has_whitespace(s: &str) -> bool {
    s.chars().any(char::is_whitespace)
}
