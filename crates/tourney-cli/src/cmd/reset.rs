use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::warn;

use tourney_core::store::StateStore;

use crate::output::{OutputMode, render};

#[derive(Args, Debug, Default)]
pub struct ResetArgs {}

/// JSON output emitted by `tn reset`.
#[derive(Debug, Serialize)]
struct ResetOutput {
    success: bool,
    message: String,
}

/// Execute `tn reset`: discard the tournament record entirely.
///
/// Succeeds whether or not a tournament exists; a failed delete is logged
/// and still reported as success, matching the best-effort persistence
/// contract.
pub fn run_reset(_args: &ResetArgs, output: OutputMode, project_root: &Path) -> Result<()> {
    let store = StateStore::new(project_root);
    if let Err(err) = store.delete() {
        warn!(error = %err, "failed to delete tournament record; continuing");
    }

    let result = ResetOutput {
        success: true,
        message: "Tournament reset successfully".to_string(),
    };
    render(output, &result, |r, w| writeln!(w, "✓ {}", r.message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::init::{InitArgs, run_init};
    use tempfile::TempDir;

    #[test]
    fn reset_removes_the_record() {
        let dir = TempDir::new().expect("temp dir");
        run_init(
            &InitArgs {
                agents: 2,
                seed: Some(1),
            },
            OutputMode::Json,
            dir.path(),
        )
        .expect("init");
        let store = StateStore::new(dir.path());
        assert!(store.record_path().exists());

        run_reset(&ResetArgs {}, OutputMode::Json, dir.path()).expect("reset");
        assert!(!store.record_path().exists());
        assert!(!store.load().initialized);
    }

    #[test]
    fn reset_without_a_tournament_still_succeeds() {
        let dir = TempDir::new().expect("temp dir");
        run_reset(&ResetArgs {}, OutputMode::Json, dir.path()).expect("reset");
    }

    #[test]
    fn reinit_after_reset_starts_from_the_prior() {
        let dir = TempDir::new().expect("temp dir");
        run_init(
            &InitArgs {
                agents: 2,
                seed: Some(9),
            },
            OutputMode::Json,
            dir.path(),
        )
        .expect("init");
        run_reset(&ResetArgs {}, OutputMode::Json, dir.path()).expect("reset");
        run_init(
            &InitArgs {
                agents: 2,
                seed: Some(9),
            },
            OutputMode::Json,
            dir.path(),
        )
        .expect("reinit");

        let state = StateStore::new(dir.path()).load();
        assert!(state.initialized);
        assert_eq!(state.total_evaluations, 0);
        assert!(state.agents.iter().all(|a| a.scores.is_empty()));
    }
}
