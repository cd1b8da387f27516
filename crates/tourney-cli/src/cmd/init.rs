use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use tourney_core::Tournament;
use tourney_core::store::StateStore;

use crate::cmd::persist;
use crate::output::{OutputMode, render, report_failure};

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Number of competing agents (ids become agent_0 .. agent_{n-1}).
    #[arg(long)]
    pub agents: i64,

    /// Seed for deterministic selection; omit for system randomness.
    #[arg(long)]
    pub seed: Option<i64>,
}

/// JSON output emitted by `tn init`.
#[derive(Debug, Serialize)]
struct InitOutput {
    success: bool,
    agents: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<i64>,
}

/// Execute `tn init`. Creates (or replaces) the tournament record with
/// every agent at the prior.
pub fn run_init(args: &InitArgs, output: OutputMode, project_root: &Path) -> Result<()> {
    let agent_count = usize::try_from(args.agents).unwrap_or(0);

    let tournament = match Tournament::initialize(agent_count, args.seed) {
        Ok(tournament) => tournament,
        Err(err) => return Err(report_failure(output, err)),
    };

    let store = StateStore::new(project_root);
    persist(&store, &tournament.into_state());

    let result = InitOutput {
        success: true,
        agents: agent_count,
        seed: args.seed,
    };
    render(output, &result, |r, w| {
        match r.seed {
            Some(seed) => writeln!(w, "✓ Tournament initialized: {} agents, seed {seed}", r.agents),
            None => writeln!(w, "✓ Tournament initialized: {} agents, unseeded", r.agents),
        }
    })
}
