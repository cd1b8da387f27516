use anyhow::Result;
use clap::Args;
use std::io::Write;
use std::path::Path;

use tourney_core::Tournament;
use tourney_core::store::StateStore;

use crate::cmd::persist;
use crate::output::{OutputMode, render, report_failure};

#[derive(Args, Debug, Default)]
pub struct SelectArgs {}

/// Execute `tn select`: Thompson-sample the next agent to evaluate.
///
/// The advanced random-source state is persisted so the next invocation
/// continues the same deterministic stream.
pub fn run_select(_args: &SelectArgs, output: OutputMode, project_root: &Path) -> Result<()> {
    let store = StateStore::new(project_root);
    let mut tournament = Tournament::from_state(store.load());

    let picked = match tournament.select_next() {
        Ok(picked) => picked,
        Err(err) => return Err(report_failure(output, err)),
    };

    persist(&store, &tournament.into_state());

    // Canonical JSON output is the bare agent id string.
    render(output, &picked, |id, w| writeln!(w, "{id}"))
}
