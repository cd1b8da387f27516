//! Persistence gateway for the tournament record.
//!
//! The record is one JSON blob at `.tourney/tournament.json` under the
//! project root. Durability is best-effort by contract: a missing or
//! corrupt record means "no prior tournament", never a fatal error, and
//! callers are expected to swallow save failures after logging them. One
//! writer at a time is assumed; overlapping invocations race with
//! last-writer-wins semantics.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::model::TournamentState;

/// Directory holding the record, under the project root.
pub const STATE_DIR: &str = ".tourney";

/// Record file name inside [`STATE_DIR`].
pub const STATE_FILE: &str = "tournament.json";

/// Errors raised when writing or deleting the record.
///
/// Load has no error type: every load failure degrades to a fresh state.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem failure while writing or removing the record.
    #[error("failed to {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The state could not be serialized (should not happen for valid state).
    #[error("failed to serialize tournament state: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Load/save access to the single tournament record.
#[derive(Debug, Clone)]
pub struct StateStore {
    record_path: PathBuf,
}

impl StateStore {
    /// Store rooted at `project_root`.
    #[must_use]
    pub fn new(project_root: &Path) -> Self {
        Self {
            record_path: project_root.join(STATE_DIR).join(STATE_FILE),
        }
    }

    /// Path of the record file.
    #[must_use]
    pub fn record_path(&self) -> &Path {
        &self.record_path
    }

    /// Load the record, or a fresh uninitialized state when it is absent
    /// or unreadable. Corruption is logged and treated as absence.
    #[must_use]
    pub fn load(&self) -> TournamentState {
        let bytes = match fs::read(&self.record_path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.record_path.display(), "no tournament record");
                return TournamentState::default();
            }
            Err(err) => {
                warn!(
                    path = %self.record_path.display(),
                    error = %err,
                    "tournament record unreadable; starting fresh"
                );
                return TournamentState::default();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(state) => state,
            Err(err) => {
                warn!(
                    path = %self.record_path.display(),
                    error = %err,
                    "tournament record corrupt; starting fresh"
                );
                TournamentState::default()
            }
        }
    }

    /// Persist the record atomically (temp file + rename).
    ///
    /// The caller snapshots `rng_state` into the state before saving
    /// (`Tournament::into_state` does this).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the directory, temp file, or rename
    /// fails, or when serialization fails.
    pub fn save(&self, state: &TournamentState) -> Result<(), StoreError> {
        if let Some(parent) = self.record_path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                action: "create",
                path: parent.display().to_string(),
                source,
            })?;
        }

        let body = serde_json::to_vec_pretty(state)?;
        let tmp_path = self.record_path.with_extension("json.tmp");
        fs::write(&tmp_path, body).map_err(|source| StoreError::Io {
            action: "write",
            path: tmp_path.display().to_string(),
            source,
        })?;
        fs::rename(&tmp_path, &self.record_path).map_err(|source| StoreError::Io {
            action: "rename",
            path: self.record_path.display().to_string(),
            source,
        })?;

        debug!(path = %self.record_path.display(), "tournament record saved");
        Ok(())
    }

    /// Delete the record; absence is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] for any failure other than the record
    /// already being gone.
    pub fn delete(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.record_path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io {
                action: "remove",
                path: self.record_path.display().to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tournament::Tournament;
    use tempfile::TempDir;

    #[test]
    fn missing_record_loads_fresh_state() {
        let dir = TempDir::new().expect("temp dir");
        let store = StateStore::new(dir.path());

        let state = store.load();
        assert!(!state.initialized);
        assert_eq!(state.agent_count, 0);
    }

    #[test]
    fn corrupt_record_loads_fresh_state() {
        let dir = TempDir::new().expect("temp dir");
        let store = StateStore::new(dir.path());
        fs::create_dir_all(dir.path().join(STATE_DIR)).expect("state dir");
        fs::write(store.record_path(), b"{not json").expect("write garbage");

        let state = store.load();
        assert!(!state.initialized);
    }

    #[test]
    fn save_then_load_round_trips_exactly() {
        let dir = TempDir::new().expect("temp dir");
        let store = StateStore::new(dir.path());

        let mut tournament = Tournament::initialize(3, Some(42)).expect("init");
        tournament.select_next().expect("select");
        tournament.record_score("agent_1", 0.75).expect("update");
        let state = tournament.into_state();

        store.save(&state).expect("save");
        let loaded = store.load();
        assert_eq!(loaded, state);
        assert!(loaded.rng_state.is_some());
    }

    #[test]
    fn reloaded_tournament_continues_the_stream() {
        let dir = TempDir::new().expect("temp dir");
        let store = StateStore::new(dir.path());

        // Uninterrupted run.
        let mut continuous = Tournament::initialize(2, Some(9)).expect("init");
        let first = continuous.select_next().expect("select");
        let second_continuous = continuous.select_next().expect("select");

        // Same run, but persisted and reloaded between the two selects.
        let mut before_save = Tournament::initialize(2, Some(9)).expect("init");
        assert_eq!(before_save.select_next().expect("select"), first);
        store.save(&before_save.into_state()).expect("save");

        let mut reloaded = Tournament::from_state(store.load());
        assert_eq!(reloaded.select_next().expect("select"), second_continuous);
    }

    #[test]
    fn delete_removes_record_and_tolerates_absence() {
        let dir = TempDir::new().expect("temp dir");
        let store = StateStore::new(dir.path());

        store
            .save(&Tournament::initialize(1, Some(1)).expect("init").into_state())
            .expect("save");
        assert!(store.record_path().exists());

        store.delete().expect("delete");
        assert!(!store.record_path().exists());

        // Second delete is a no-op, not an error.
        store.delete().expect("repeat delete");
    }

    #[test]
    fn save_leaves_no_temp_file_behind() {
        let dir = TempDir::new().expect("temp dir");
        let store = StateStore::new(dir.path());
        store
            .save(&Tournament::initialize(1, Some(1)).expect("init").into_state())
            .expect("save");

        let entries: Vec<_> = fs::read_dir(dir.path().join(STATE_DIR))
            .expect("state dir readable")
            .filter_map(Result::ok)
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(entries, vec![STATE_FILE.to_string()]);
    }
}
