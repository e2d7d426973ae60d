use super::{MxError, MxRecord};

/// Parses a presentation-format MX answer such as
/// `"MX: 5 alt1.example.com., 10 alt2.example.com."`.
///
/// Records come back sorted by ascending preference; entries sharing a
/// preference keep their response order. One malformed entry fails the
/// whole response.
pub fn parse_mx_response(raw: &str) -> Result<Vec<MxRecord>, MxError> {
    let (_, rest) = raw
        .split_once(':')
        .ok_or_else(|| MxError::malformed_response(raw))?;
    let rest = rest.trim();
    if rest.is_empty() {
        return Ok(Vec::new());
    }

    let mut records = rest
        .split(',')
        .map(parse_entry)
        .collect::<Result<Vec<_>, _>>()?;

    records.sort_by_key(|r| r.preference);
    Ok(records)
}

fn parse_entry(entry: &str) -> Result<MxRecord, MxError> {
    let entry = entry.trim();
    let mut tokens = entry.split_whitespace();
    let (Some(priority), Some(server), None) = (tokens.next(), tokens.next(), tokens.next()) else {
        return Err(MxError::malformed_entry(entry));
    };

    let preference = priority
        .parse::<u16>()
        .map_err(|err| MxError::invalid_priority(entry, err))?;
    let exchange = server.strip_suffix('.').unwrap_or(server);
    if exchange.is_empty() {
        return Err(MxError::malformed_entry(entry));
    }

    Ok(MxRecord::new(preference, exchange))
}
