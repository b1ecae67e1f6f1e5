//! Feedback collection.
//!
//! Records ratings and comments for later analysis; nothing in the serving
//! path consumes them. The store is bounded and in-memory.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::{BTreeMap, VecDeque};
use uuid::Uuid;

/// How many feedback records are retained.
const CAPACITY: usize = 10_000;

/// One feedback record.
#[derive(Debug, Clone)]
pub struct FeedbackRecord {
    pub generation_id: Option<Uuid>,
    pub session_id: Option<Uuid>,
    /// 1 (unusable) to 5 (perfect)
    pub rating: u8,
    pub comment: Option<String>,
    pub received_at: DateTime<Utc>,
}

/// Aggregate view over retained feedback.
#[derive(Debug, Clone, Default)]
pub struct FeedbackStats {
    pub count: usize,
    pub average_rating: f64,
    pub by_rating: BTreeMap<u8, usize>,
}

/// Bounded in-memory feedback store.
#[derive(Default)]
pub struct FeedbackStore {
    records: Mutex<VecDeque<FeedbackRecord>>,
}

impl FeedbackStore {
    #[must_use]
    pub fn new() -> Self {
        FeedbackStore::default()
    }

    /// Record a feedback entry.
    ///
    /// # Errors
    ///
    /// When the rating is outside 1..=5.
    pub fn record(&self, record: FeedbackRecord) -> Result<(), String> {
        if !(1..=5).contains(&record.rating) {
            return Err(format!(
                "rating must be between 1 and 5, got {}",
                record.rating
            ));
        }
        let mut records = self.records.lock();
        records.push_back(record);
        while records.len() > CAPACITY {
            records.pop_front();
        }
        Ok(())
    }

    /// Aggregate statistics over retained records.
    #[must_use]
    pub fn stats(&self) -> FeedbackStats {
        let records = self.records.lock();
        if records.is_empty() {
            return FeedbackStats::default();
        }
        let mut by_rating: BTreeMap<u8, usize> = BTreeMap::new();
        let mut total = 0u64;
        for record in records.iter() {
            *by_rating.entry(record.rating).or_default() += 1;
            total += u64::from(record.rating);
        }
        #[allow(clippy::cast_precision_loss)]
        let average_rating = total as f64 / records.len() as f64;
        FeedbackStats {
            count: records.len(),
            average_rating,
            by_rating,
        }
    }
}
