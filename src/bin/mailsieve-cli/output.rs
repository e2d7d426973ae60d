use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use mailsieve_lib::{ReportRow, timestamped_path, write_lines};

const FORMATS: [&str; 4] = ["lines", "human", "json", "ndjson"];

/// Rejects an unknown `--format` before any address is looked up.
pub fn ensure_format(format: &str) -> Result<()> {
    if !FORMATS.contains(&format) {
        bail!("unknown --format '{format}', use: {}", FORMATS.join("|"));
    }
    Ok(())
}

/// Report path used by `check` when `--out` is absent: `<input><millis>.txt`
/// for the `lines` format, stdout otherwise.
pub fn default_out(format: &str, input: &Path) -> Option<PathBuf> {
    (format == "lines").then(|| timestamped_path(input))
}

/// Opens `path` for appending, creating it if needed.
pub fn open_append(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open {} for append", path.display()))
}

/// Renders `rows` in `format`, to `out` when given, else to stdout.
pub fn write_reports(rows: &[ReportRow], format: &str, out: Option<&Path>) -> Result<()> {
    let bytes = match format {
        "lines" => render_lines(rows)?,
        "human" => render_human(rows).into_bytes(),
        "json" => render_json(rows)?,
        "ndjson" => render_ndjson(rows)?,
        other => bail!("unknown --format '{other}', use: {}", FORMATS.join("|")),
    };

    match out {
        Some(path) => {
            write_all_atomically(path, &bytes)?;
            tracing::info!(path = %path.display(), rows = rows.len(), "report written");
        }
        None => {
            use std::io::Write;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn render_lines(rows: &[ReportRow]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_lines(rows, &mut buf)?;
    Ok(buf)
}

fn render_human(rows: &[ReportRow]) -> String {
    let mut s = String::new();
    for row in rows {
        let tag = if row.verdict.is_ok() { "[OK]   " } else { "[KO]   " };
        match &row.verdict.detail {
            Some(detail) => s.push_str(&format!(
                "{tag} {} :: {} ({detail})\n",
                row.address,
                row.verdict.label()
            )),
            None => s.push_str(&format!("{tag} {} :: {}\n", row.address, row.verdict.label())),
        }
    }
    s
}

#[cfg(feature = "with-serde")]
fn render_json(rows: &[ReportRow]) -> Result<Vec<u8>> {
    let mut s = serde_json::to_string_pretty(rows)?;
    s.push('\n');
    Ok(s.into_bytes())
}

#[cfg(not(feature = "with-serde"))]
fn render_json(_: &[ReportRow]) -> Result<Vec<u8>> {
    bail!("format=json nécessite la feature 'with-serde'")
}

#[cfg(feature = "with-serde")]
fn render_ndjson(rows: &[ReportRow]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    for row in rows {
        let line = serde_json::to_string(row)?;
        buf.extend_from_slice(line.as_bytes());
        buf.push(b'\n');
    }
    Ok(buf)
}

#[cfg(not(feature = "with-serde"))]
fn render_ndjson(_: &[ReportRow]) -> Result<Vec<u8>> {
    bail!("format=ndjson nécessite la feature 'with-serde'")
}

fn write_all_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    use std::io::Write;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    {
        let mut f = File::create(&tmp)
            .with_context(|| format!("create {}", tmp.display()))?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }
    std::fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}
