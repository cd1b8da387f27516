#![forbid(unsafe_code)]
//! tourney-core library.
//!
//! Statistical engine for adaptive agent selection: a deterministic random
//! source, Gaussian posterior bookkeeping, Thompson-sampling selection, and
//! the convergence evaluator, plus the JSON persistence gateway that carries
//! tournament state across invocations.
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums at module boundaries
//!   ([`error::TournamentError`], [`store::StoreError`]); `anyhow::Result`
//!   only at binary boundaries.
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `debug!`).

pub mod convergence;
pub mod dist;
pub mod error;
pub mod model;
pub mod policy;
pub mod rng;
pub mod stats;
pub mod store;
pub mod tournament;

pub use error::TournamentError;
pub use model::{AgentStats, TournamentState};
pub use rng::RandomSource;
pub use tournament::Tournament;
