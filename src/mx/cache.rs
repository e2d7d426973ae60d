use moka::sync::Cache;

use super::{MxRecord, MxRecords};

/// Per-hostname memo of MX answers.
///
/// No capacity and no expiry: entries live as long as the cache, empty
/// answers included. Concurrent first requests for one hostname share a
/// single lookup.
#[derive(Clone)]
pub struct MxCache {
    inner: Cache<String, MxRecords>,
}

impl Default for MxCache {
    fn default() -> Self {
        Self {
            inner: Cache::builder().build(),
        }
    }
}

impl MxCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached records for `hostname`, running `lookup` on the
    /// first request only.
    pub fn get_or_resolve<F>(&self, hostname: &str, lookup: F) -> MxRecords
    where
        F: FnOnce() -> Vec<MxRecord>,
    {
        if let Some(records) = self.inner.get(hostname) {
            tracing::debug!(hostname, records = records.len(), "MX cache hit");
            return records;
        }
        self.inner
            .get_with(hostname.to_string(), || lookup().into())
    }

    pub fn get(&self, hostname: &str) -> Option<MxRecords> {
        self.inner.get(hostname)
    }

    pub fn len(&self) -> usize {
        // entry_count n'est exact qu'après les tâches de maintenance
        self.inner.run_pending_tasks();
        self.inner.entry_count() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
