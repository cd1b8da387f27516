use anyhow::Result;
use clap::Args;
use std::io::Write;
use std::path::Path;

use tourney_core::Tournament;
use tourney_core::store::StateStore;

use crate::cmd::persist;
use crate::output::{OutputMode, render, report_failure};

#[derive(Args, Debug, Default)]
pub struct WinnerArgs {}

/// Execute `tn winner`: compute the winner verdict from the current
/// posteriors. Refreshes the advisory last-check timestamp, so the record
/// is rewritten.
pub fn run_winner(_args: &WinnerArgs, output: OutputMode, project_root: &Path) -> Result<()> {
    let store = StateStore::new(project_root);
    let mut tournament = Tournament::from_state(store.load());

    let report = match tournament.winner() {
        Ok(report) => report,
        Err(err) => return Err(report_failure(output, err)),
    };

    persist(&store, &tournament.into_state());

    render(output, &report, |r, w| {
        let verdict = if r.complete { "decided" } else { "undecided" };
        writeln!(
            w,
            "Winner: {} ({verdict}, confidence {:.2})",
            r.winner_id, r.confidence
        )?;
        writeln!(
            w,
            "  mean={:.3} sd={:.3} 95% interval=[{:.3}, {:.3}]  ({} evaluations)",
            r.winner_stats.mean_score,
            r.winner_stats.std_dev,
            r.winner_stats.interval[0],
            r.winner_stats.interval[1],
            r.total_evaluations
        )
    })
}
