//! Result rows and the `<address>;<label>` report format.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use csv::{QuoteStyle, WriterBuilder};

use crate::pipeline::{Outcome, Verdict};

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub address: String,
    #[cfg_attr(feature = "with-serde", serde(flatten))]
    pub verdict: Verdict,
}

impl ReportRow {
    pub fn new(address: impl Into<String>, verdict: Verdict) -> Self {
        Self {
            address: address.into(),
            verdict,
        }
    }
}

/// Streams `<address>;<label>` lines, unquoted, flushing after every row so a
/// run cut short keeps what it already wrote.
pub struct LineWriter<W: io::Write> {
    wtr: csv::Writer<W>,
}

impl<W: io::Write> LineWriter<W> {
    pub fn new(writer: W) -> Self {
        let wtr = WriterBuilder::new()
            .delimiter(b';')
            .quote_style(QuoteStyle::Never)
            .has_headers(false)
            .from_writer(writer);
        Self { wtr }
    }

    pub fn write_row(&mut self, row: &ReportRow) -> csv::Result<()> {
        self.wtr
            .write_record([row.address.as_str(), row.verdict.label()])?;
        self.wtr.flush()?;
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        self.wtr.get_ref()
    }
}

/// Writes one `<address>;<label>` line per row.
pub fn write_lines<W: io::Write>(rows: &[ReportRow], writer: W) -> csv::Result<()> {
    let mut lines = LineWriter::new(writer);
    for row in rows {
        lines.write_row(row)?;
    }
    Ok(())
}

/// `<input><unix millis>.txt`, next to the input file.
pub fn timestamped_path(input: &Path) -> PathBuf {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let mut name = OsString::from(input.as_os_str());
    name.push(format!("{millis}.txt"));
    PathBuf::from(name)
}

/// Per-outcome counters for a run.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub counts: BTreeMap<Outcome, usize>,
    /// Lines dropped because validation itself failed.
    pub errors: usize,
}

impl Summary {
    pub fn from_rows(rows: &[ReportRow]) -> Self {
        let mut summary = Self::default();
        for row in rows {
            summary.record(row.verdict.outcome);
        }
        summary
    }

    pub fn record(&mut self, outcome: Outcome) {
        *self.counts.entry(outcome).or_default() += 1;
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        self.counts.get(&outcome).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum::<usize>() + self.errors
    }

    pub fn all_ok(&self) -> bool {
        self.errors == 0 && self.total() == self.count(Outcome::Ok)
    }
}
