#![forbid(unsafe_code)]
//! mailsieve_lib — tri de listes d'adresses e-mail
//!
//! Each address goes through [`Validator::validate`]: length and invalid
//! markers, syntax, fake markers, then a cached DNS MX lookup.

pub mod heuristics;
pub mod mx;
pub mod pipeline;
pub mod report;
pub mod validator;

pub use heuristics::{Heuristics, MarkerError, MarkerSet};
pub use mx::{
    DnsOptions, MxCache, MxError, MxRecord, MxRecords, MxResolver, MxTransport, SystemTransport,
    parse_mx_response,
};
pub use pipeline::{Outcome, ValidationOptions, Validator, Verdict};
pub use report::{LineWriter, ReportRow, Summary, timestamped_path, write_lines};
pub use validator::{
    SyntaxError, check_syntax, hostname, hostname_opt, is_well_formed, is_well_formed_opt,
};
