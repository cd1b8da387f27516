use anyhow::Result;
use clap::Args;
use std::io::Write;
use std::path::Path;

use tourney_core::Tournament;
use tourney_core::store::StateStore;

use crate::output::{OutputMode, render, report_failure};

#[derive(Args, Debug, Default)]
pub struct StatusArgs {}

/// Execute `tn status`: diagnostic progress report. Pure read; the
/// record is not rewritten.
pub fn run_status(_args: &StatusArgs, output: OutputMode, project_root: &Path) -> Result<()> {
    let store = StateStore::new(project_root);
    let tournament = Tournament::from_state(store.load());

    let report = match tournament.status() {
        Ok(report) => report,
        Err(err) => return Err(report_failure(output, err)),
    };

    render(output, &report, |r, w| {
        writeln!(w, "Evaluations: {}", r.total_evaluations)?;
        for agent in &r.agent_stats {
            writeln!(
                w,
                "  {:<10} n={:<4} mean={:.3} sd={:.3}",
                agent.agent_id, agent.evaluations, agent.mean_score, agent.std_dev
            )?;
        }
        writeln!(
            w,
            "Progress: {:.0}%  ({} evaluations to budget)",
            r.convergence_progress * 100.0,
            r.estimated_evaluations_remaining
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::init::{InitArgs, run_init};
    use crate::cmd::update::{UpdateArgs, run_update};
    use tempfile::TempDir;
    use tourney_core::TournamentError;

    #[test]
    fn status_before_init_exits_two() {
        let dir = TempDir::new().expect("temp dir");
        let err = run_status(&StatusArgs {}, OutputMode::Json, dir.path())
            .expect_err("must fail");
        let core = err.downcast_ref::<TournamentError>().expect("core error");
        assert_eq!(core.exit_code(), 2);
    }

    #[test]
    fn status_reflects_recorded_evaluations() {
        let dir = TempDir::new().expect("temp dir");
        run_init(
            &InitArgs {
                agents: 2,
                seed: Some(3),
            },
            OutputMode::Json,
            dir.path(),
        )
        .expect("init");
        for _ in 0..3 {
            run_update(
                &UpdateArgs {
                    agent_id: "agent_0".into(),
                    score: "0.8".into(),
                },
                OutputMode::Json,
                dir.path(),
            )
            .expect("update");
        }

        let tournament = Tournament::from_state(StateStore::new(dir.path()).load());
        let report = tournament.status().expect("status");
        assert_eq!(report.total_evaluations, 3);
        assert_eq!(report.agent_stats[0].evaluations, 3);
        assert_eq!(report.agent_stats[1].evaluations, 0);
        // Least-evaluated agent pins progress at zero.
        assert!(report.convergence_progress.abs() < 1e-12);
        assert_eq!(report.estimated_evaluations_remaining, 97);
    }

    #[test]
    fn status_does_not_rewrite_the_record() {
        let dir = TempDir::new().expect("temp dir");
        run_init(
            &InitArgs {
                agents: 2,
                seed: Some(3),
            },
            OutputMode::Json,
            dir.path(),
        )
        .expect("init");
        let store = StateStore::new(dir.path());
        let before = store.load();

        run_status(&StatusArgs {}, OutputMode::Json, dir.path()).expect("status");
        assert_eq!(store.load(), before);
    }
}
