//! Tournament state model.
//!
//! [`TournamentState`] is the aggregate persisted verbatim as the external
//! record; field names on disk stay camelCase for compatibility with
//! existing records. [`AgentStats`] tracks one agent's raw score history,
//! sample statistics, and Gaussian posterior.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prior mean for every agent's Gaussian posterior.
pub const PRIOR_MEAN: f64 = 0.5;

/// Prior variance for every agent's Gaussian posterior.
pub const PRIOR_VARIANCE: f64 = 0.25;

/// Per-agent score history, sample statistics, and posterior parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentStats {
    /// Stable identifier, `agent_<index>`, assigned at creation.
    pub agent_id: String,
    /// Count of scores received; always equals `scores.len()`.
    pub evaluations: u32,
    /// Ordered, append-only score history, each in `[0, 1]`.
    pub scores: Vec<f64>,
    /// Arithmetic mean of `scores`; recomputed on every update.
    pub mean_score: f64,
    /// `(n - 1)`-denominator sample variance of `scores`; 0 when `n <= 1`.
    pub variance: f64,
    /// Posterior mean over the agent's true performance.
    pub posterior_mean: f64,
    /// Posterior variance; strictly positive by construction.
    pub posterior_variance: f64,
}

impl Default for AgentStats {
    fn default() -> Self {
        Self {
            agent_id: String::new(),
            evaluations: 0,
            scores: Vec::new(),
            mean_score: 0.0,
            variance: 0.0,
            posterior_mean: PRIOR_MEAN,
            posterior_variance: PRIOR_VARIANCE,
        }
    }
}

impl AgentStats {
    /// Fresh agent at the prior, with the stable id for `index`.
    #[must_use]
    pub fn at_prior(index: usize) -> Self {
        Self {
            agent_id: format!("agent_{index}"),
            ..Self::default()
        }
    }

    /// Sample standard deviation, `sqrt(variance)`.
    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }
}

/// The aggregate tournament record, serialized as a single JSON blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TournamentState {
    /// Number of competing agents, fixed at initialization.
    #[serde(rename = "agents")]
    pub agent_count: usize,
    /// False until `init` runs; every other operation fails fast when false.
    pub initialized: bool,
    /// Seed for the deterministic source; absent means system randomness.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    /// Random-source state captured after the last randomness-consuming
    /// operation; restored on load to continue the same stream.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rng_state: Option<u32>,
    /// Running count of score submissions across all agents.
    pub total_evaluations: u64,
    /// Per-agent records, in stable index order.
    #[serde(rename = "agentStats")]
    pub agents: Vec<AgentStats>,
    /// Advisory timestamp of the most recent winner evaluation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_winner_check: Option<DateTime<Utc>>,
}

impl Default for TournamentState {
    fn default() -> Self {
        Self {
            agent_count: 0,
            initialized: false,
            seed: None,
            rng_state: None,
            total_evaluations: 0,
            agents: Vec::new(),
            last_winner_check: None,
        }
    }
}

impl TournamentState {
    /// Freshly initialized state: every agent at the prior.
    #[must_use]
    pub fn initialized(agent_count: usize, seed: Option<i64>) -> Self {
        Self {
            agent_count,
            initialized: true,
            seed,
            agents: (0..agent_count).map(AgentStats::at_prior).collect(),
            ..Self::default()
        }
    }

    /// Index of `agent_id` in the stable agent order, if it exists.
    #[must_use]
    pub fn agent_index(&self, agent_id: &str) -> Option<usize> {
        self.agents.iter().position(|a| a.agent_id == agent_id)
    }
}
