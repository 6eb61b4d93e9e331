pub mod batch;
pub mod clock;
pub mod config;
pub mod decision;
pub mod event_gen;
pub mod live_match;
pub mod match_state;
pub mod momentum;
pub mod observer;
pub mod positioning;
pub mod rng;
pub mod xg;

pub use batch::{simulate_batch, simulate_once, BatchSummary};
pub use clock::{Clock, ThreadClock, VirtualClock};
pub use config::SimConfig;
pub use decision::{decide, softmax, weighted_choice, Decision, MatchContext, TeamOutlook};
pub use event_gen::{decision_minutes, generate_events, EventGenerator};
pub use live_match::{MatchSettings, RunOutcome, SimPhase, Simulation, StopHandle};
pub use match_state::{FatigueWarning, FinalSummary, MatchSnapshot, MatchState, MomentumCall, PlayerSummary};
pub use momentum::Momentum;
pub use observer::{EventUpdate, MatchObserver, RecordedEvent, RecordingObserver, TickFrame};
pub use positioning::{player_position, PitchContext, PlayerPosition};
pub use xg::estimate_shot_quality;
