//! Winner determination and diagnostic status reports.
//!
//! Everything here is a pure function of the tournament state; the reports
//! serialize directly as the CLI's JSON payloads.

use serde::Serialize;

use crate::dist::clip_unit;
use crate::model::TournamentState;

/// Evaluation budget per agent; hitting it forces completion.
const TARGET_EVALUATIONS_PER_AGENT: u64 = 50;

/// Minimum evidence on the leader before early completion is considered.
const MIN_WINNER_EVALUATIONS: u32 = 15;

/// Early completion requires the leader's posterior spread below this.
const POSTERIOR_STD_DEV_CEILING: f64 = 0.05;

/// Two-sided 95% normal quantile.
const Z_95: f64 = 1.96;

const CONFIDENCE_FLOOR: f64 = 0.5;
const CONFIDENCE_CEILING: f64 = 0.99;

/// Winner verdict computed from the current posteriors.
#[derive(Debug, Clone, Serialize)]
pub struct WinnerReport {
    pub complete: bool,
    pub winner_id: String,
    pub confidence: f64,
    pub total_evaluations: u64,
    pub winner_stats: WinnerStats,
}

/// The winner's raw sample statistics and 95% posterior interval.
#[derive(Debug, Clone, Serialize)]
pub struct WinnerStats {
    pub mean_score: f64,
    pub std_dev: f64,
    pub interval: [f64; 2],
}

/// One row of the status report.
#[derive(Debug, Clone, Serialize)]
pub struct AgentSummary {
    pub agent_id: String,
    pub evaluations: u32,
    pub mean_score: f64,
    pub std_dev: f64,
}

/// Diagnostic progress report; not load-bearing for completion.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub total_evaluations: u64,
    pub agent_stats: Vec<AgentSummary>,
    pub convergence_progress: f64,
    pub estimated_evaluations_remaining: u64,
}

/// Compute the winner verdict for an initialized tournament.
///
/// The best and second-best agents are ranked by posterior mean (stable
/// order on exact ties). With a single agent the second-best terms
/// degenerate to a virtual competitor at mean 0 with zero variance.
#[must_use]
pub fn winner_report(state: &TournamentState) -> WinnerReport {
    let best_index = index_of_max_posterior(&state.agents, None).unwrap_or(0);
    let best = &state.agents[best_index];

    let (second_mean, second_variance) = index_of_max_posterior(&state.agents, Some(best_index))
        .map_or((0.0, 0.0), |i| {
            let second = &state.agents[i];
            (second.posterior_mean, second.posterior_variance)
        });

    let std_dev = best.posterior_variance.sqrt();
    let interval = [
        clip_unit(Z_95.mul_add(-std_dev, best.posterior_mean)),
        clip_unit(Z_95.mul_add(std_dev, best.posterior_mean)),
    ];

    let separation = best.posterior_mean - second_mean;
    let combined_std_dev = (best.posterior_variance + second_variance).sqrt();
    let z_score = separation / combined_std_dev;
    let confidence = (0.5f64.mul_add(z_score.tanh(), 0.5))
        .clamp(CONFIDENCE_FLOOR, CONFIDENCE_CEILING);

    let budget_exhausted =
        state.total_evaluations >= TARGET_EVALUATIONS_PER_AGENT * state.agent_count as u64;
    let decisively_separated = best.evaluations >= MIN_WINNER_EVALUATIONS
        && std_dev < POSTERIOR_STD_DEV_CEILING
        && separation > 2.0 * combined_std_dev;

    WinnerReport {
        complete: budget_exhausted || decisively_separated,
        winner_id: best.agent_id.clone(),
        confidence,
        total_evaluations: state.total_evaluations,
        winner_stats: WinnerStats {
            mean_score: best.mean_score,
            std_dev: best.std_dev(),
            interval,
        },
    }
}

/// Compute the diagnostic status report for an initialized tournament.
#[must_use]
pub fn status_report(state: &TournamentState) -> StatusReport {
    let agent_stats: Vec<AgentSummary> = state
        .agents
        .iter()
        .map(|agent| AgentSummary {
            agent_id: agent.agent_id.clone(),
            evaluations: agent.evaluations,
            mean_score: agent.mean_score,
            std_dev: agent.std_dev(),
        })
        .collect();

    let min_evaluations = state
        .agents
        .iter()
        .map(|agent| agent.evaluations)
        .min()
        .unwrap_or(0);
    #[allow(clippy::cast_precision_loss)]
    let convergence_progress =
        (f64::from(min_evaluations) / TARGET_EVALUATIONS_PER_AGENT as f64).min(1.0);

    let target = TARGET_EVALUATIONS_PER_AGENT * state.agent_count as u64;
    let estimated_evaluations_remaining = target.saturating_sub(state.total_evaluations);

    StatusReport {
        total_evaluations: state.total_evaluations,
        agent_stats,
        convergence_progress,
        estimated_evaluations_remaining,
    }
}

/// Index of the agent with the highest posterior mean, skipping `excluded`.
///
/// Strictly-greater comparison keeps the lowest index on exact ties.
/// Returns `None` when no candidate remains (single-agent runner-up).
fn index_of_max_posterior(
    agents: &[crate::model::AgentStats],
    excluded: Option<usize>,
) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (index, agent) in agents.iter().enumerate() {
        if Some(index) == excluded {
            continue;
        }
        let improves = best.is_none_or(|b| agent.posterior_mean > agents[b].posterior_mean);
        if improves {
            best = Some(index);
        }
    }
    best
}
