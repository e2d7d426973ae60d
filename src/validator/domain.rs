use super::SyntaxError;

/// Valide le domaine: conversion IDNA + checks de labels.
/// Renvoie la première raison invalidante.
pub(crate) fn check_domain(domain: &str) -> Result<(), SyntaxError> {
    let domain_ascii = idna::domain_to_ascii(domain)
        .map_err(|_| SyntaxError::domain("domain punycode conversion failed"))?;

    if domain_ascii.is_empty() {
        return Err(SyntaxError::domain("domain empty after IDNA conversion"));
    }

    for label in domain_ascii.split('.') {
        if label.is_empty() {
            return Err(SyntaxError::domain("empty domain label"));
        }
        if label.len() > 63 {
            return Err(SyntaxError::domain(format!(
                "domain label '{}' length {} > 63",
                label,
                label.len()
            )));
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(SyntaxError::domain(format!(
                "domain label '{}' cannot start/end with '-'",
                label
            )));
        }
        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(SyntaxError::domain(format!(
                "domain label '{}' has invalid chars",
                label
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn basic_domain_ok() {
        assert_eq!(check_domain("rcrios.com.br"), Ok(()));
    }

    #[test]
    fn label_too_long() {
        let long = "a".repeat(64);
        let err = check_domain(&format!("{}.com", long)).unwrap_err();
        assert!(err.to_string().contains("> 63"), "{err}");
    }

    #[test]
    fn single_label_accepted() {
        assert_eq!(check_domain("localhost"), Ok(()));
    }

    #[test]
    fn trailing_dot_rejected() {
        assert!(check_domain("example.com.").is_err());
    }

    #[test]
    fn hyphen_edges_rejected() {
        let err = check_domain("-mail.example.com").unwrap_err();
        assert!(err.to_string().contains("start/end"), "{err}");
    }
}
