//! Per-agent statistics and the conjugate Gaussian posterior update.
//!
//! Sample statistics are recomputed from the full score history on every
//! update rather than accumulated incrementally. That trades an O(n) pass
//! for freedom from floating-point drift; score histories stay in the tens
//! to low hundreds, so the pass is trivial.

use crate::model::{AgentStats, PRIOR_MEAN, PRIOR_VARIANCE};

/// Observation-variance floor. A single observation (or a degenerate run of
/// identical scores) yields zero sample variance, which would drive the
/// posterior precision to infinity and collapse the posterior prematurely.
const OBSERVATION_VARIANCE_FLOOR: f64 = 0.1;

/// Arithmetic mean of `scores`; 0 for an empty history.
#[must_use]
pub fn sample_mean(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = scores.len() as f64;
    scores.iter().sum::<f64>() / n
}

/// `(n - 1)`-denominator sample variance of `scores`; 0 when `n <= 1`.
#[must_use]
pub fn sample_variance(scores: &[f64]) -> f64 {
    if scores.len() <= 1 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = scores.len() as f64;
    let mean = sample_mean(scores);
    scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / (n - 1.0)
}

/// Append one score and refresh the agent's sample statistics and
/// Gaussian posterior.
///
/// The caller validates the score range; this function assumes
/// `score ∈ [0, 1]`.
pub fn record_score(agent: &mut AgentStats, score: f64) {
    agent.scores.push(score);
    agent.evaluations += 1;
    agent.mean_score = sample_mean(&agent.scores);
    agent.variance = sample_variance(&agent.scores);

    let (posterior_mean, posterior_variance) = posterior_update(
        agent.evaluations,
        agent.mean_score,
        agent.variance,
    );
    agent.posterior_mean = posterior_mean;
    agent.posterior_variance = posterior_variance;
}

/// Conjugate Gaussian-Gaussian update against the fixed prior
/// `N(PRIOR_MEAN, PRIOR_VARIANCE)`.
///
/// Returns `(posterior_mean, posterior_variance)`; the variance is strictly
/// positive for any finite input thanks to the observation-variance floor.
#[must_use]
pub fn posterior_update(evaluations: u32, mean_score: f64, variance: f64) -> (f64, f64) {
    let n = f64::from(evaluations);
    let obs_var = if variance > 0.0 {
        variance / n
    } else {
        OBSERVATION_VARIANCE_FLOOR
    };

    let posterior_precision = 1.0 / PRIOR_VARIANCE + n / obs_var;
    let posterior_variance = 1.0 / posterior_precision;
    let posterior_mean =
        posterior_variance * (PRIOR_MEAN / PRIOR_VARIANCE + n * mean_score / obs_var);

    (posterior_mean, posterior_variance)
}
