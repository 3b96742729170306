use serde::{Deserialize, Serialize};

use critique_logging::{critique_debug, critique_info, critique_warn};

use crate::{AnalysisResult, ScanId, StateKey, StateStore, StoreError};

/// Maximum number of scans kept in history.
pub const HISTORY_CAPACITY: usize = 10;
/// Display name recorded when the result has no candidate name.
pub const UNKNOWN_CANDIDATE: &str = "Unknown";

/// Immutable snapshot of one past scan plus its display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: ScanId,
    pub name: String,
    pub score: i64,
    /// Human-readable creation time. Display only; ordering uses `id`.
    pub timestamp: String,
    pub full_data: AnalysisResult,
}

/// Creation time handed out by the history clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanStamp {
    pub millis: i64,
    pub label: String,
}

type Clock = Box<dyn Fn() -> ScanStamp>;

/// Bounded, most-recent-first cache of past scans plus the "current" slot.
pub struct HistoryStore<S> {
    store: S,
    clock: Clock,
    last_issued: Option<ScanId>,
}

impl<S: StateStore> HistoryStore<S> {
    pub fn new(store: S, clock: impl Fn() -> ScanStamp + 'static) -> Self {
        Self {
            store,
            clock: Box::new(clock),
            last_issued: None,
        }
    }

    pub fn state(&self) -> &S {
        &self.store
    }

    /// Records a successful scan at the front of history and makes it current.
    ///
    /// Identifiers are strictly increasing, also when the clock has not moved
    /// since the previous call. Results are never deduplicated.
    pub fn record_result(&mut self, result: AnalysisResult) -> Result<HistoryEntry, StoreError> {
        let stamp = (self.clock)();
        let mut entries = self.list_entries();

        let floor = entries.iter().map(|entry| entry.id).chain(self.last_issued).max();
        let id = match floor {
            Some(floor) if stamp.millis <= floor => floor + 1,
            _ => stamp.millis,
        };
        self.last_issued = Some(id);

        let entry = HistoryEntry {
            id,
            name: result
                .candidate_name()
                .unwrap_or(UNKNOWN_CANDIDATE)
                .to_string(),
            score: result.overall_score.unwrap_or(0),
            timestamp: stamp.label,
            full_data: result,
        };

        entries.insert(0, entry.clone());
        if entries.len() > HISTORY_CAPACITY {
            let evicted = entries.split_off(HISTORY_CAPACITY);
            critique_debug!("Evicted {} history entries", evicted.len());
        }

        // Current first: a failed write must not leave history ahead of it.
        self.write_json(StateKey::CurrentScan, &entry.full_data)?;
        self.write_json(StateKey::History, &entries)?;
        critique_info!("Recorded scan id={} name={:?}", entry.id, entry.name);
        Ok(entry)
    }

    /// Stored entries, most recent first. Missing or corrupt data reads as empty.
    pub fn list_entries(&self) -> Vec<HistoryEntry> {
        self.read_json(StateKey::History).unwrap_or_default()
    }

    /// Makes the entry with `id` current again and returns its payload.
    ///
    /// Unknown ids are ignored: `Ok(None)` and nothing is written.
    pub fn select_entry(&self, id: ScanId) -> Result<Option<AnalysisResult>, StoreError> {
        let Some(entry) = self
            .list_entries()
            .into_iter()
            .find(|entry| entry.id == id)
        else {
            critique_debug!("History entry {} not found; selection ignored", id);
            return Ok(None);
        };
        self.write_json(StateKey::CurrentScan, &entry.full_data)?;
        Ok(Some(entry.full_data))
    }

    /// The current result, if any scan has been recorded or selected.
    pub fn load_current(&self) -> Option<AnalysisResult> {
        self.read_json(StateKey::CurrentScan)
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, key: StateKey) -> Option<T> {
        let text = match self.store.get(key) {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(err) => {
                critique_warn!("Failed to read {}: {}", key.as_str(), err);
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(err) => {
                critique_warn!("Ignoring corrupt {}: {}", key.as_str(), err);
                None
            }
        }
    }

    fn write_json<T: Serialize>(&self, key: StateKey, value: &T) -> Result<(), StoreError> {
        let text = serde_json::to_string(value).map_err(|source| StoreError::Encode {
            key: key.as_str(),
            source,
        })?;
        self.store.set(key, &text)
    }
}
