//! Manual-Override Adapter: the one piece of mutable shared state in the
//! engine. Operators record ad-hoc closures (typhoon signals, emergency
//! market halts) that the other three holiday sources cannot know about
//! in advance.
//!
//! Reads go straight through `DashMap` without locking. Writes take a
//! `Mutex<()>` critical section so that updating the map and persisting
//! the snapshot to disk happen as one unit — two concurrent writers
//! racing to save would otherwise clobber each other's blob.

use chrono::{DateTime, NaiveDate, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{EngineError, EngineResult};

/// Whether a manual override closes the market, shortens it, or forces it
/// open on what would otherwise be a non-trading day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideKind {
    Closure,
    HalfDay,
    ForceOpen,
}

/// One recorded manual override.
///
/// `affects_trading`/`affects_settlement` let an override apply to only
/// one of the two dimensions, e.g. a market forced open for settlement
/// instructions but not for new trading. Most overrides set both `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualOverride {
    pub market: String,
    pub date: NaiveDate,
    pub kind: OverrideKind,
    pub name: Option<String>,
    pub reason: String,
    pub affects_trading: bool,
    pub affects_settlement: bool,
    pub recorded_at: DateTime<Utc>,
}

/// The manual-override table. Construct once per [`crate::EngineContext`]
/// and share it behind an `Arc`.
pub struct ManualOverrideStore {
    entries: DashMap<(String, NaiveDate), ManualOverride>,
    write_lock: Mutex<()>,
    persist_path: Option<PathBuf>,
}

impl ManualOverrideStore {
    /// An in-memory-only store; `record`/`revoke` never touch disk.
    pub fn new() -> Self {
        ManualOverrideStore {
            entries: DashMap::new(),
            write_lock: Mutex::new(()),
            persist_path: None,
        }
    }

    /// A store that persists its full snapshot to `path` on every mutation.
    pub fn with_persistence(path: impl AsRef<Path>) -> Self {
        ManualOverrideStore {
            entries: DashMap::new(),
            write_lock: Mutex::new(()),
            persist_path: Some(path.as_ref().to_path_buf()),
        }
    }

    /// Load a previously persisted snapshot, replacing any in-memory state.
    pub fn load_from_file(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| EngineError::PersistenceFailed(format!("reading {}: {e}", path.display())))?;
        let overrides: Vec<ManualOverride> = serde_json::from_str(&raw)
            .map_err(|e| EngineError::PersistenceFailed(format!("parsing {}: {e}", path.display())))?;

        let store = ManualOverrideStore::with_persistence(path);
        for o in overrides {
            store.entries.insert((o.market.clone(), o.date), o);
        }
        Ok(store)
    }

    /// Look up the override for `market` on `date`, if any.
    pub fn get(&self, market: &str, date: NaiveDate) -> Option<ManualOverride> {
        self.entries.get(&(market.to_string(), date)).map(|r| r.value().clone())
    }

    /// Record a new override, overwriting any existing one for the same
    /// market and date. Persists atomically if a path was configured.
    pub fn record(&self, over: ManualOverride) -> EngineResult<()> {
        let _guard = self.write_lock.lock().unwrap();
        self.entries.insert((over.market.clone(), over.date), over);
        self.persist_locked()
    }

    /// Remove an override, if present. Persists atomically if configured.
    pub fn revoke(&self, market: &str, date: NaiveDate) -> EngineResult<()> {
        let _guard = self.write_lock.lock().unwrap();
        self.entries.remove(&(market.to_string(), date));
        self.persist_locked()
    }

    /// Snapshot every recorded override, sorted by (market, date) for
    /// deterministic output.
    pub fn list_all(&self) -> Vec<ManualOverride> {
        let mut all: Vec<ManualOverride> = self.entries.iter().map(|r| r.value().clone()).collect();
        all.sort_by(|a, b| (a.market.as_str(), a.date).cmp(&(b.market.as_str(), b.date)));
        all
    }

    /// Called while holding `write_lock`: write the full snapshot to a
    /// temp file in the same directory, then rename over the target path
    /// so a crash mid-write never leaves a half-written blob.
    fn persist_locked(&self) -> EngineResult<()> {
        let Some(path) = &self.persist_path else {
            return Ok(());
        };

        let snapshot = self.list_all();
        let json = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| EngineError::PersistenceFailed(format!("serializing overrides: {e}")))?;

        let tmp_path = path.with_extension("tmp");
        std::fs::write(&tmp_path, json)
            .map_err(|e| EngineError::PersistenceFailed(format!("writing {}: {e}", tmp_path.display())))?;
        std::fs::rename(&tmp_path, path)
            .map_err(|e| EngineError::PersistenceFailed(format!("renaming into {}: {e}", path.display())))?;

        tracing::info!(path = %path.display(), count = snapshot.len(), "manual overrides persisted");
        Ok(())
    }
}

impl Default for ManualOverrideStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(market: &str, date: NaiveDate, reason: &str) -> ManualOverride {
        ManualOverride {
            market: market.to_string(),
            date,
            kind: OverrideKind::Closure,
            name: None,
            reason: reason.to_string(),
            affects_trading: true,
            affects_settlement: true,
            recorded_at: DateTime::parse_from_rfc3339("2026-07-18T00:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        }
    }

    #[test]
    fn record_then_get_round_trips() {
        let store = ManualOverrideStore::new();
        let date = NaiveDate::from_ymd_opt(2026, 7, 20).unwrap();
        store.record(sample("HK", date, "Typhoon Signal 8")).unwrap();
        let found = store.get("HK", date).unwrap();
        assert_eq!(found.reason, "Typhoon Signal 8");
    }

    #[test]
    fn revoke_removes_entry() {
        let store = ManualOverrideStore::new();
        let date = NaiveDate::from_ymd_opt(2026, 7, 20).unwrap();
        store.record(sample("HK", date, "Typhoon Signal 8")).unwrap();
        store.revoke("HK", date).unwrap();
        assert!(store.get("HK", date).is_none());
    }

    #[test]
    fn persistence_round_trips_through_disk() {
        let dir = std::env::temp_dir().join(format!("settlement-overrides-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("overrides.json");

        let store = ManualOverrideStore::with_persistence(&path);
        let date = NaiveDate::from_ymd_opt(2026, 7, 20).unwrap();
        store.record(sample("HK", date, "Typhoon Signal 8")).unwrap();

        let reloaded = ManualOverrideStore::load_from_file(&path).unwrap();
        assert_eq!(reloaded.get("HK", date).unwrap().reason, "Typhoon Signal 8");

        std::fs::remove_dir_all(&dir).ok();
    }
}
