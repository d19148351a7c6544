//! Append-only record of completed try-ons.

use web_time::{SystemTime, UNIX_EPOCH};

use crate::asset::Asset;

/// Wall-clock time in milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Wrap a millisecond count.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Milliseconds since the Unix epoch.
    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// The current time. Clocks set before 1970 read as the epoch.
    #[must_use]
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| {
                u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
            });
        Self(millis)
    }
}

/// One successful try-on: the inputs, the output and when it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    id: String,
    person: Asset,
    clothes: Asset,
    result: Asset,
    created_at: Timestamp,
}

impl HistoryEntry {
    /// Create an entry with a fresh random identifier.
    #[must_use]
    pub fn new(person: Asset, clothes: Asset, result: Asset, created_at: Timestamp) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            person,
            clothes,
            result,
            created_at,
        }
    }

    /// Unique identifier, stable for the life of the session.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The person photo that was dressed.
    #[must_use]
    pub const fn person(&self) -> &Asset {
        &self.person
    }

    /// The clothing image that was applied.
    #[must_use]
    pub const fn clothes(&self) -> &Asset {
        &self.clothes
    }

    /// The generated composite.
    #[must_use]
    pub const fn result(&self) -> &Asset {
        &self.result
    }

    /// When the generation completed.
    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

/// Most-recent-first list of [`HistoryEntry`] values.
///
/// Entries are only ever added at the front; the ledger is never
/// re-sorted, deduplicated or trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryLedger {
    entries: Vec<HistoryEntry>,
}

impl HistoryLedger {
    /// Create an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add `entry` at index 0.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
    }

    /// All entries, newest first.
    #[must_use]
    pub fn list(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// The newest entry, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.first()
    }

    /// Number of recorded try-ons.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` before the first successful try-on.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
