//! Per-request log retention.
//!
//! Error responses carry an `X-Request-ID`; the lines logged for that request
//! are retrievable afterwards through `GET /api/error-logs/{request_id}`. The
//! store is a bounded in-memory ring: oldest requests fall off first, and
//! each request keeps at most a tail of its lines.

use dashmap::DashMap;
use parking_lot::Mutex;
use std::collections::VecDeque;
use uuid::Uuid;

/// How many requests the store remembers.
const DEFAULT_CAPACITY: usize = 512;

/// How many lines each request keeps (last-N).
const LINES_PER_REQUEST: usize = 100;

/// Bounded per-request log store.
pub struct RequestLogStore {
    entries: DashMap<Uuid, VecDeque<String>>,
    order: Mutex<VecDeque<Uuid>>,
    capacity: usize,
}

impl Default for RequestLogStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl RequestLogStore {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        RequestLogStore {
            entries: DashMap::new(),
            order: Mutex::new(VecDeque::new()),
            capacity,
        }
    }

    /// Append a line to a request's log, evicting the oldest request when
    /// the store is full.
    pub fn record(&self, request_id: Uuid, line: impl Into<String>) {
        let line = line.into();
        let mut created = false;
        self.entries
            .entry(request_id)
            .or_insert_with(|| {
                created = true;
                VecDeque::new()
            })
            .value_mut()
            .push_back(line);

        if let Some(mut lines) = self.entries.get_mut(&request_id) {
            while lines.len() > LINES_PER_REQUEST {
                lines.pop_front();
            }
        }

        if created {
            let mut order = self.order.lock();
            order.push_back(request_id);
            while order.len() > self.capacity {
                if let Some(evicted) = order.pop_front() {
                    self.entries.remove(&evicted);
                }
            }
        }
    }

    /// The retained lines for a request, oldest first.
    #[must_use]
    pub fn lines(&self, request_id: Uuid) -> Option<Vec<String>> {
        self.entries
            .get(&request_id)
            .map(|lines| lines.iter().cloned().collect())
    }

    /// How many requests currently have retained lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_fetch() {
        let store = RequestLogStore::default();
        let id = Uuid::new_v4();
        store.record(id, "first");
        store.record(id, "second");
        assert_eq!(store.lines(id).unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_unknown_request_is_none() {
        let store = RequestLogStore::default();
        assert!(store.lines(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_lines_bounded_keep_tail() {
        let store = RequestLogStore::default();
        let id = Uuid::new_v4();
        for i in 0..150 {
            store.record(id, format!("line {i}"));
        }
        let lines = store.lines(id).unwrap();
        assert_eq!(lines.len(), LINES_PER_REQUEST);
        assert_eq!(lines.first().unwrap(), "line 50");
        assert_eq!(lines.last().unwrap(), "line 149");
    }

    #[test]
    fn test_oldest_request_evicted() {
        let store = RequestLogStore::with_capacity(2);
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        store.record(a, "a");
        store.record(b, "b");
        store.record(c, "c");
        assert!(store.lines(a).is_none());
        assert!(store.lines(b).is_some());
        assert!(store.lines(c).is_some());
        assert_eq!(store.len(), 2);
    }
}
