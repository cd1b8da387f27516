//! Command handlers, one module per subcommand.
//!
//! Handlers share one shape: load the record, run exactly one operation,
//! persist, render. Save failures are swallowed after a warning; the
//! operation already succeeded in memory and the record is best-effort.

pub mod completions;
pub mod init;
pub mod reset;
pub mod select;
pub mod status;
pub mod update;
pub mod winner;

use tourney_core::model::TournamentState;
use tourney_core::store::StateStore;
use tracing::warn;

/// Persist the record, swallowing failures.
pub(crate) fn persist(store: &StateStore, state: &TournamentState) {
    if let Err(err) = store.save(state) {
        warn!(error = %err, "failed to persist tournament record; continuing");
    }
}
