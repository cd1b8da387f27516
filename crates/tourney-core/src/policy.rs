//! Thompson-sampling selection.
//!
//! One posterior draw per agent, then the argmax. Uncertain agents get
//! fat posteriors and therefore occasional wins; strong agents win most of
//! the time. Exploration and exploitation fall out of the sampling itself.

use tracing::debug;

use crate::dist;
use crate::model::AgentStats;
use crate::rng::RandomSource;

/// Pick the next agent to evaluate. The roster must be non-empty.
///
/// Draws `x_i ~ N(posterior_mean_i, posterior_variance_i)` for every agent
/// (exactly two uniforms each), clips the draw to `[0, 1]`, and returns the
/// index of the maximum. Exact ties resolve to the lowest index so a
/// resumed deterministic stream replays identically.
pub fn select(agents: &[AgentStats], rng: &mut RandomSource) -> usize {
    debug_assert!(!agents.is_empty(), "selection needs at least one agent");

    let samples: Vec<f64> = agents
        .iter()
        .map(|agent| {
            let draw = dist::normal(rng, agent.posterior_mean, agent.posterior_variance.sqrt());
            dist::clip_unit(draw)
        })
        .collect();

    let winner = argmax(&samples);
    debug!(
        winner = agents[winner].agent_id.as_str(),
        ?samples,
        "thompson selection"
    );
    winner
}

/// Index of the maximum; first occurrence wins on exact ties.
fn argmax(samples: &[f64]) -> usize {
    let mut best = 0;
    for (index, sample) in samples.iter().enumerate().skip(1) {
        if *sample > samples[best] {
            best = index;
        }
    }
    best
}
