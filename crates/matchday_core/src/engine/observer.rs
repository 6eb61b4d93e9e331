//! Observer contract
//!
//! The only points of contact between playback and whatever renders it.
//! Every method has a no-op default so observers implement what they need.
//!
//! Ordering per event gap: zero or more `on_tick`, then exactly one
//! `on_event`. `on_start` precedes everything; `on_end` follows the last
//! event of a completed run and is never delivered after a stop.

use serde::{Deserialize, Serialize};

use super::match_state::{FatigueWarning, FinalSummary, MatchSnapshot, MatchState, MomentumCall};
use super::positioning::PlayerPosition;
use crate::models::{MatchEvent, Side};

/// Positions delivered per tick: home slot i at `2i`, away slot i at `2i + 1`.
pub const TICK_POSITIONS: usize = 22;

// ============================================
// Payloads
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickFrame {
    /// Fractional match minute in progress
    pub minute: f32,
    pub ball: (f32, f32),
    pub home_possession: bool,
    pub positions: Vec<PlayerPosition>,
}

impl TickFrame {
    pub fn position(&self, side: Side, slot: usize) -> Option<&PlayerPosition> {
        let offset = if side.is_home() { 0 } else { 1 };
        self.positions.get(slot * 2 + offset)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EventUpdate<'a> {
    pub event: &'a MatchEvent,
    pub snapshot: MatchSnapshot,
    /// Full running state, including both squads
    pub state: &'a MatchState,
    pub fatigue_warning: Option<&'a FatigueWarning>,
    pub momentum_call: Option<MomentumCall>,
}

pub trait MatchObserver {
    fn on_start(&mut self) {}

    fn on_tick(&mut self, _frame: &TickFrame) {}

    fn on_event(&mut self, _update: &EventUpdate<'_>) {}

    fn on_end(&mut self, _summary: &FinalSummary) {}
}

/// Discards everything.
impl MatchObserver for () {}

// ============================================
// RecordingObserver
// ============================================

/// Owned copy of one `on_event` delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedEvent {
    pub event: MatchEvent,
    pub snapshot: MatchSnapshot,
    pub fatigue_warning: Option<FatigueWarning>,
    pub momentum_call: Option<MomentumCall>,
    /// Ticks delivered in the gap before this event
    pub ticks_before: usize,
}

/// Collects the observer stream. Tick frames are counted, and only the most
/// recent one is kept.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    pub started: bool,
    pub ticks: usize,
    pub last_frame: Option<TickFrame>,
    pub events: Vec<RecordedEvent>,
    pub summary: Option<FinalSummary>,
    ticks_since_event: usize,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_finished(&self) -> bool {
        self.summary.is_some()
    }
}

impl MatchObserver for RecordingObserver {
    fn on_start(&mut self) {
        self.started = true;
    }

    fn on_tick(&mut self, frame: &TickFrame) {
        self.ticks += 1;
        self.ticks_since_event += 1;
        self.last_frame = Some(frame.clone());
    }

    fn on_event(&mut self, update: &EventUpdate<'_>) {
        self.events.push(RecordedEvent {
            event: update.event.clone(),
            snapshot: update.snapshot,
            fatigue_warning: update.fatigue_warning.cloned(),
            momentum_call: update.momentum_call,
            ticks_before: self.ticks_since_event,
        });
        self.ticks_since_event = 0;
    }

    fn on_end(&mut self, summary: &FinalSummary) {
        self.summary = Some(summary.clone());
    }
}
