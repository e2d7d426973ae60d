/// Dot-atom: atext ASCII + '.' non initial/terminal, pas de ".."
pub(crate) fn is_dot_atom(s: &str) -> bool {
    if s.starts_with('.') || s.ends_with('.') || s.contains("..") {
        return false;
    }
    s.chars().all(|c| {
        c.is_ascii_alphanumeric()
            || matches!(
                c,
                '!' | '#'
                    | '$'
                    | '%'
                    | '&'
                    | '\''
                    | '*'
                    | '+'
                    | '-'
                    | '/'
                    | '='
                    | '?'
                    | '^'
                    | '_'
                    | '`'
                    | '{'
                    | '|'
                    | '}'
                    | '~'
                    | '.'
            )
    })
}

pub(crate) fn is_quoted(s: &str) -> bool {
    s.len() >= 2 && s.starts_with('"') && s.ends_with('"')
}

/// Accepte une quoted-string simple, sinon retombe sur `is_dot_atom`.
pub(crate) fn is_local_part(s: &str) -> bool {
    if is_quoted(s) {
        let inner = &s[1..s.len() - 1];
        !inner.contains('"') && !inner.contains('\\')
    } else {
        is_dot_atom(s)
    }
}
