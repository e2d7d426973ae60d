use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use super::{MxCache, MxError, MxRecord, MxResolver, MxTransport, parse_mx_response, resolver};

type QueryResult = Result<Option<String>, MxError>;
type QueryFn = dyn Fn(&str) -> QueryResult + Send + Sync;

pub(crate) struct StubTransport {
    on_query: Box<QueryFn>,
    queries: AtomicUsize,
}

impl StubTransport {
    pub(crate) fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> QueryResult + Send + Sync + 'static,
    {
        Self {
            on_query: Box::new(f),
            queries: AtomicUsize::new(0),
        }
    }

    pub(crate) fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl MxTransport for StubTransport {
    fn query_mx(&self, hostname: &str) -> QueryResult {
        self.queries.fetch_add(1, Ordering::SeqCst);
        (self.on_query)(hostname)
    }
}

fn servfail() -> MxError {
    MxError::malformed_response("SERVFAIL")
}

#[test]
fn parse_multiple_entries_sorted() {
    let records = parse_mx_response("MX: 5 alt1.example.com., 10 alt2.example.com.").unwrap();
    assert_eq!(
        records,
        vec![
            MxRecord::new(5, "alt1.example.com"),
            MxRecord::new(10, "alt2.example.com"),
        ]
    );
}

#[test]
fn parse_single_entry() {
    let records = parse_mx_response("MX: 0 mail.example.com.").unwrap();
    assert_eq!(records, vec![MxRecord::new(0, "mail.example.com")]);
}

#[test]
fn parse_reorders_by_preference_and_keeps_ties_stable() {
    let raw = "MX: 5 gmail-smtp-in.l.google.com., 40 alt4.gmail-smtp-in.l.google.com., \
               10 alt1.gmail-smtp-in.l.google.com., 10 alt2.gmail-smtp-in.l.google.com.";
    let records = parse_mx_response(raw).unwrap();
    let order: Vec<_> = records.iter().map(|r| r.exchange.as_str()).collect();
    assert_eq!(
        order,
        vec![
            "gmail-smtp-in.l.google.com",
            "alt1.gmail-smtp-in.l.google.com",
            "alt2.gmail-smtp-in.l.google.com",
            "alt4.gmail-smtp-in.l.google.com",
        ]
    );
}

#[test]
fn parse_strips_only_one_trailing_dot() {
    let records = parse_mx_response("MX: 1 mx.example.com..").unwrap();
    assert_eq!(records[0].exchange, "mx.example.com.");
    let records = parse_mx_response("MX: 1 mx.example.com").unwrap();
    assert_eq!(records[0].exchange, "mx.example.com");
}

#[test]
fn parse_rejects_bad_priority() {
    let err = parse_mx_response("MX: 5 a.example.com., ten b.example.com.").unwrap_err();
    assert!(matches!(err, MxError::InvalidPriority { ref entry, .. } if entry == "ten b.example.com."));
}

#[test]
fn parse_rejects_missing_server() {
    let err = parse_mx_response("MX: 5").unwrap_err();
    assert!(matches!(err, MxError::MalformedEntry { .. }));
}

#[test]
fn parse_rejects_response_without_colon() {
    let err = parse_mx_response("5 a.example.com.").unwrap_err();
    assert!(matches!(err, MxError::MalformedResponse { .. }));
}

#[test]
fn parse_empty_list() {
    assert!(parse_mx_response("MX:").unwrap().is_empty());
}

#[test]
fn render_entry_appends_missing_dot() {
    assert_eq!(resolver::render_entry(10, "mx.example.com"), "10 mx.example.com.");
    assert_eq!(resolver::render_entry(10, "mx.example.com."), "10 mx.example.com.");
}

#[test]
fn get_mx_rejects_empty_address() {
    let mx = MxResolver::new(StubTransport::new(|_| Ok(None)));
    assert!(matches!(mx.get_mx("  "), Err(MxError::EmptyAddress)));
    assert_eq!(mx.transport().queries(), 0);
}

#[test]
fn get_mx_rejects_malformed_address() {
    let mx = MxResolver::new(StubTransport::new(|_| Ok(None)));
    let err = mx.get_mx("bad email").unwrap_err();
    assert!(matches!(err, MxError::InvalidAddress { .. }));
    assert!(err.to_string().contains("whitespace"));
}

#[test]
fn get_mx_queries_lowercased_hostname() {
    let mx = MxResolver::new(StubTransport::new(|host| {
        assert_eq!(host, "rcrios.com.br");
        Ok(Some("MX: 10 mx.rcrios.com.br.".to_string()))
    }));
    let records = mx.get_mx("email@RCRIOS.com.BR").unwrap();
    assert_eq!(&*records, &[MxRecord::new(10, "mx.rcrios.com.br")]);
}

#[test]
fn one_query_per_hostname() {
    let mx = MxResolver::new(StubTransport::new(|_| {
        Ok(Some("MX: 10 mx.example.com.".to_string()))
    }));
    let first = mx.get_mx("alice@example.com").unwrap();
    let second = mx.get_mx("bob@EXAMPLE.com").unwrap();
    assert_eq!(first, second);
    assert_eq!(mx.transport().queries(), 1);
    assert_eq!(mx.cache().len(), 1);
}

#[test]
fn failed_lookup_is_cached_as_empty() {
    let mx = MxResolver::new(StubTransport::new(|_| Err(servfail())));
    assert!(mx.get_mx("user@nonexistent-domain-xyz.invalid").unwrap().is_empty());
    assert!(mx.get_mx("other@nonexistent-domain-xyz.invalid").unwrap().is_empty());
    assert_eq!(mx.transport().queries(), 1);
}

#[test]
fn unparsable_answer_counts_as_no_records() {
    let mx = MxResolver::new(StubTransport::new(|_| {
        Ok(Some("MX: x broken.example.com.".to_string()))
    }));
    assert!(mx.get_mx("user@example.com").unwrap().is_empty());
    assert_eq!(
        mx.cache().get("example.com").map(|r| r.len()),
        Some(0)
    );
}

#[test]
fn concurrent_first_access_is_coalesced() {
    const THREADS: usize = 8;
    let mx = MxResolver::new(StubTransport::new(|_| {
        thread::sleep(Duration::from_millis(50));
        Ok(Some("MX: 1 mx.example.com.".to_string()))
    }));
    let barrier = Barrier::new(THREADS);

    thread::scope(|s| {
        for i in 0..THREADS {
            let mx = &mx;
            let barrier = &barrier;
            s.spawn(move || {
                barrier.wait();
                let records = mx.get_mx(&format!("user{i}@example.com")).unwrap();
                assert_eq!(records.len(), 1);
            });
        }
    });

    assert_eq!(mx.transport().queries(), 1);
}

#[test]
fn cache_runs_lookup_once() {
    let cache = MxCache::new();
    let calls = Arc::new(AtomicUsize::new(0));
    for _ in 0..3 {
        let calls = Arc::clone(&calls);
        let records = cache.get_or_resolve("example.com", move || {
            calls.fetch_add(1, Ordering::SeqCst);
            Vec::new()
        });
        assert!(records.is_empty());
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(cache.get("example.org").is_none());
}
