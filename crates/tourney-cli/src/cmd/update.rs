use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use tourney_core::store::StateStore;
use tourney_core::{Tournament, TournamentError};

use crate::cmd::persist;
use crate::output::{OutputMode, render, report_failure};

#[derive(Args, Debug)]
#[command(allow_negative_numbers = true)]
pub struct UpdateArgs {
    /// Agent receiving the score (agent_0 .. agent_{n-1}).
    pub agent_id: String,

    /// Evaluation score in [0.0, 1.0].
    // Kept as a string: a malformed number must report as a bad argument
    // with this tool's own exit code, not as a usage error.
    pub score: String,
}

/// JSON output emitted by `tn update`.
#[derive(Debug, Serialize)]
struct UpdateOutput {
    success: bool,
    agent_id: String,
    score: f64,
    total_evaluations: u64,
}

/// Execute `tn update`: submit one evaluation score.
pub fn run_update(args: &UpdateArgs, output: OutputMode, project_root: &Path) -> Result<()> {
    let score: f64 = match args.score.parse() {
        Ok(score) => score,
        Err(_) => {
            let err = TournamentError::invalid_argument(format!(
                "score '{}' is not a number",
                args.score
            ));
            return Err(report_failure(output, err));
        }
    };

    let store = StateStore::new(project_root);
    let mut tournament = Tournament::from_state(store.load());

    let outcome = match tournament.record_score(&args.agent_id, score) {
        Ok(outcome) => outcome,
        Err(err) => return Err(report_failure(output, err)),
    };

    persist(&store, &tournament.into_state());

    let result = UpdateOutput {
        success: true,
        agent_id: outcome.agent_id,
        score: outcome.score,
        total_evaluations: outcome.total_evaluations,
    };
    render(output, &result, |r, w| {
        writeln!(
            w,
            "✓ recorded {} for {} ({} evaluations total)",
            r.score, r.agent_id, r.total_evaluations
        )
    })
}
