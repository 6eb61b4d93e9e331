//! # matchday_core - Seeded Football Match Simulation
//!
//! Generates a full match as an ordered list of events, then plays it back in
//! compressed real time: players are repositioned on every tick, events are
//! applied to a live match state and everything is streamed to observers.
//!
//! ## Features
//! - Seeded `ChaCha8Rng` for every stochastic decision (same seed = same match)
//! - Softmax action selection driven by skills, psyche and match context
//! - Location-based xG and a smoothed momentum model
//! - Cooperative cancellation and a virtual clock for instant playback
//! - JSON API for embedding hosts
//!
//! ```rust
//! use matchday_core::{MatchSettings, RecordingObserver, RunOutcome, SimConfig, Simulation};
//!
//! let mut sim = Simulation::new(7, SimConfig::instant()).unwrap();
//! let mut recorder = RecordingObserver::new();
//! let outcome = sim.run(&MatchSettings::default(), &mut recorder).unwrap();
//! assert_eq!(outcome, RunOutcome::Completed);
//! assert!(recorder.summary.is_some());
//! ```

// Positioning and generator helpers take many scalar inputs
#![allow(clippy::too_many_arguments)]

pub mod api;
pub mod engine;
pub mod error;
pub mod models;

pub use api::{simulate_match, simulate_match_json, MatchRequest, MatchResponse};
pub use engine::{
    estimate_shot_quality, simulate_batch, BatchSummary, Clock, EventUpdate, FinalSummary,
    MatchObserver, MatchSettings, MatchState, RecordingObserver, RunOutcome, SimConfig, SimPhase,
    Simulation, StopHandle, ThreadClock, TickFrame, VirtualClock,
};
pub use error::{Result, SimError};
pub use models::{get_positions, Formation, MatchEvent, Player, Side, Squad, SquadTemplate};
