//! Tournament facade: the explicit state object every operation runs
//! against, with the random source injected rather than held as ambient
//! global state. Pure computation lives here; persistence stays in
//! [`crate::store`].

use chrono::Utc;
use tracing::debug;

use crate::convergence::{self, StatusReport, WinnerReport};
use crate::error::TournamentError;
use crate::model::TournamentState;
use crate::policy;
use crate::rng::RandomSource;
use crate::stats;

/// Outcome of a successful score submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRecorded {
    pub agent_id: String,
    pub score: f64,
    pub total_evaluations: u64,
}

/// In-memory tournament: state plus its injected random source.
#[derive(Debug)]
pub struct Tournament {
    state: TournamentState,
    rng: RandomSource,
}

impl Tournament {
    /// Start a fresh tournament with `agent_count` agents at the prior.
    ///
    /// # Errors
    ///
    /// Returns [`TournamentError::InvalidArgument`] when `agent_count` is
    /// zero.
    pub fn initialize(agent_count: usize, seed: Option<i64>) -> Result<Self, TournamentError> {
        if agent_count == 0 {
            return Err(TournamentError::invalid_argument(
                "agents must be a positive integer",
            ));
        }

        let mut tournament = Self {
            state: TournamentState::initialized(agent_count, seed),
            rng: seed.map_or_else(RandomSource::system, RandomSource::seeded),
        };
        tournament.state.rng_state = tournament.rng.snapshot();
        debug!(agent_count, ?seed, "tournament initialized");
        Ok(tournament)
    }

    /// Rehydrate a tournament from a loaded state record.
    ///
    /// A seeded record reconstructs the deterministic source from `seed`
    /// and immediately restores the captured `rng_state`, so the uniform
    /// stream continues exactly where the previous invocation left it.
    #[must_use]
    pub fn from_state(state: TournamentState) -> Self {
        let rng = match state.seed {
            Some(seed) => {
                let mut rng = RandomSource::seeded(seed);
                if let Some(captured) = state.rng_state {
                    rng.restore(captured);
                }
                rng
            }
            None => RandomSource::system(),
        };
        Self { state, rng }
    }

    /// Borrow the current state.
    #[must_use]
    pub const fn state(&self) -> &TournamentState {
        &self.state
    }

    /// Snapshot the random source into `rng_state` and hand back the state
    /// for persistence.
    #[must_use]
    pub fn into_state(mut self) -> TournamentState {
        self.state.rng_state = self.rng.snapshot().or(self.state.rng_state);
        self.state
    }

    /// Thompson-sample the next agent to evaluate.
    ///
    /// Advances the random source by exactly two draws per agent and
    /// captures the advanced state so the next invocation resumes the same
    /// stream. Agent statistics are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`TournamentError::NotInitialized`] before `init`.
    pub fn select_next(&mut self) -> Result<String, TournamentError> {
        self.ensure_initialized()?;

        let index = policy::select(&self.state.agents, &mut self.rng);
        self.state.rng_state = self.rng.snapshot().or(self.state.rng_state);
        Ok(self.state.agents[index].agent_id.clone())
    }

    /// Submit one evaluation score for an agent.
    ///
    /// # Errors
    ///
    /// Fails fast, mutating nothing, with [`TournamentError::NotInitialized`],
    /// [`TournamentError::UnknownAgent`], or
    /// [`TournamentError::ScoreOutOfRange`].
    pub fn record_score(
        &mut self,
        agent_id: &str,
        score: f64,
    ) -> Result<ScoreRecorded, TournamentError> {
        self.ensure_initialized()?;

        let index = self
            .state
            .agent_index(agent_id)
            .ok_or_else(|| TournamentError::UnknownAgent {
                agent_id: agent_id.to_string(),
            })?;

        if !score.is_finite() || !(0.0..=1.0).contains(&score) {
            return Err(TournamentError::ScoreOutOfRange { score });
        }

        stats::record_score(&mut self.state.agents[index], score);
        self.state.total_evaluations += 1;
        debug!(
            agent_id,
            score,
            total_evaluations = self.state.total_evaluations,
            "score recorded"
        );

        Ok(ScoreRecorded {
            agent_id: agent_id.to_string(),
            score,
            total_evaluations: self.state.total_evaluations,
        })
    }

    /// Evaluate the winner verdict; refreshes the advisory
    /// `last_winner_check` timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`TournamentError::NotInitialized`] before `init`.
    pub fn winner(&mut self) -> Result<WinnerReport, TournamentError> {
        self.ensure_initialized()?;
        self.state.last_winner_check = Some(Utc::now());
        Ok(convergence::winner_report(&self.state))
    }

    /// Diagnostic progress report; pure read.
    ///
    /// # Errors
    ///
    /// Returns [`TournamentError::NotInitialized`] before `init`.
    pub fn status(&self) -> Result<StatusReport, TournamentError> {
        self.ensure_initialized()?;
        Ok(convergence::status_report(&self.state))
    }

    fn ensure_initialized(&self) -> Result<(), TournamentError> {
        // A record claiming initialization without a roster is treated as
        // absent rather than indexed into.
        if self.state.initialized && !self.state.agents.is_empty() {
            Ok(())
        } else {
            Err(TournamentError::NotInitialized)
        }
    }
}
