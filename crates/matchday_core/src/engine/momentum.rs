//! Match Momentum
//!
//! One scalar for the run of play: 1.0 is total home dominance, 0.0 total away
//! dominance. Each applied event pulls it 8% back toward neutral, then adds a
//! fixed per-event delta. The result is always kept within [0.05, 0.95].

use serde::{Deserialize, Serialize};

use crate::models::{EventKind, Side};

pub const MOMENTUM_MIN: f32 = 0.05;
pub const MOMENTUM_MAX: f32 = 0.95;
pub const NEUTRAL: f32 = 0.5;
/// Weight kept from the previous value on each update.
pub const RETENTION: f32 = 0.92;

/// Per-event momentum deltas
pub mod deltas {
    pub const GOAL_FOR: f32 = 0.18;
    pub const GOAL_AGAINST: f32 = -0.18;
    pub const SHOT_ON: f32 = 0.05;
    pub const SAVE: f32 = -0.04;
    pub const DUEL_WON: f32 = 0.04;
    pub const PASS_COMPLETED: f32 = 0.02;
    pub const DANGER: f32 = -0.03;
    pub const FOUL: f32 = -0.01;
    /// Failed shot, duel or pass
    pub const FAILURE: f32 = -0.01;
}

/// Signed delta for an event kind and its success flag.
pub fn event_delta(kind: EventKind, success: bool) -> f32 {
    match kind {
        EventKind::GoalFor => deltas::GOAL_FOR,
        EventKind::GoalAgainst => deltas::GOAL_AGAINST,
        EventKind::Shot if success => deltas::SHOT_ON,
        EventKind::Duel if success => deltas::DUEL_WON,
        EventKind::Pass if success => deltas::PASS_COMPLETED,
        EventKind::Shot | EventKind::Duel | EventKind::Pass => deltas::FAILURE,
        EventKind::Save => deltas::SAVE,
        EventKind::DangerPass => deltas::DANGER,
        EventKind::Foul => deltas::FOUL,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Momentum {
    value: f32,
}

impl Default for Momentum {
    fn default() -> Self {
        Self { value: NEUTRAL }
    }
}

impl Momentum {
    pub fn with_value(value: f32) -> Self {
        Self { value: value.clamp(MOMENTUM_MIN, MOMENTUM_MAX) }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Apply one event and return the new value.
    pub fn apply(&mut self, kind: EventKind, success: bool) -> f32 {
        self.apply_delta(event_delta(kind, success))
    }

    pub fn apply_delta(&mut self, delta: f32) -> f32 {
        let next = self.value * RETENTION + NEUTRAL * (1.0 - RETENTION) + delta;
        // NaN deltas leave the value untouched.
        if next.is_finite() {
            self.value = next.clamp(MOMENTUM_MIN, MOMENTUM_MAX);
        }
        self.value
    }

    /// Momentum seen from `side`: home reads the value, away its complement.
    pub fn bias_for(&self, side: Side) -> f32 {
        match side {
            Side::Home => self.value,
            Side::Away => 1.0 - self.value,
        }
    }

    /// Context flag read by the decision model
    pub fn is_high(value: f32) -> bool {
        value > 0.65
    }

    pub fn is_low(value: f32) -> bool {
        value < 0.35
    }
}
