use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use mailsieve_lib::{LineWriter, MxTransport, ReportRow, Summary, Validator};

use crate::output;

/// Validates every line of `reader`, in order, handing each row to `emit` as
/// soon as it is known.
///
/// A line that is not UTF-8, or whose validation errors out, is logged,
/// counted in `errors` and left out; the rest of the batch goes on. Only a
/// read error or a failing `emit` stops the run.
pub fn run<T, R, F>(validator: &Validator<T>, mut reader: R, mut emit: F) -> Result<Summary>
where
    T: MxTransport,
    R: BufRead,
    F: FnMut(ReportRow) -> Result<()>,
{
    let mut summary = Summary::default();
    let mut buf = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .with_context(|| format!("read line {}", line_no + 1))?;
        if read == 0 {
            break;
        }
        line_no += 1;

        let raw = trim_eol(&buf);
        let address = match std::str::from_utf8(raw) {
            Ok(s) => s,
            Err(err) => {
                tracing::error!(
                    line = line_no,
                    bytes = %String::from_utf8_lossy(raw),
                    error = %err,
                    "line is not valid UTF-8, skipped"
                );
                summary.errors += 1;
                continue;
            }
        };

        match validator.validate(address) {
            Ok(verdict) => {
                tracing::debug!(line = line_no, address = %address, %verdict, "validated");
                summary.record(verdict.outcome);
                emit(ReportRow::new(address, verdict))?;
            }
            Err(err) => {
                tracing::error!(line = line_no, address = %address, error = %err, "validation aborted");
                summary.errors += 1;
            }
        }
    }

    Ok(summary)
}

/// Runs a batch and writes its report.
///
/// `lines` rows are appended to `out` (or stdout) one by one while the batch
/// runs; the other formats need every row first.
pub fn run_to<T, R>(validator: &Validator<T>, reader: R, format: &str, out: Option<&Path>) -> Result<Summary>
where
    T: MxTransport,
    R: BufRead,
{
    if format != "lines" {
        let mut rows = Vec::new();
        let summary = run(validator, reader, |row| {
            rows.push(row);
            Ok(())
        })?;
        output::write_reports(&rows, format, out)?;
        return Ok(summary);
    }

    let sink: Box<dyn Write> = match out {
        Some(path) => Box::new(output::open_append(path)?),
        None => Box::new(io::stdout().lock()),
    };
    let summary = stream_lines(validator, reader, sink)?;
    if let Some(path) = out {
        tracing::info!(path = %path.display(), rows = summary.total() - summary.errors, "report written");
    }
    Ok(summary)
}

fn stream_lines<T, R, W>(validator: &Validator<T>, reader: R, sink: W) -> Result<Summary>
where
    T: MxTransport,
    R: BufRead,
    W: Write,
{
    let mut lines = LineWriter::new(sink);
    run(validator, reader, |row| {
        lines.write_row(&row).context("write report line")
    })
}

fn trim_eol(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
