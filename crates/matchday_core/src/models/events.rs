//! Match events produced by the generator before playback.

use serde::{Deserialize, Serialize};

use super::action::Action;
use super::side::Side;

/// Event category, from the home side's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Pass,
    Shot,
    GoalFor,
    GoalAgainst,
    Save,
    /// Press / 1v1 dribble duel
    Duel,
    DangerPass,
    Foul,
}

/// One heat-map sample: ball location and the side in possession.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatSample {
    pub x: f32,
    pub y: f32,
    pub side: Side,
}

/// Directed pass between two slot indices of the same side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassEdge {
    pub from: u8,
    pub to: u8,
    pub side: Side,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SideTotals {
    pub shots: u16,
    pub passes: u16,
    pub xg: f32,
}

/// Cumulative team counters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TeamTotals {
    pub home: SideTotals,
    pub away: SideTotals,
}

impl TeamTotals {
    pub fn side(&self, side: Side) -> &SideTotals {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut SideTotals {
        match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }
}

/// Immutable once generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEvent {
    /// 1-89
    pub minute: u8,
    pub kind: EventKind,
    /// Side that acted
    pub side: Side,
    pub actor_slot: u8,
    pub target_slot: Option<u8>,
    pub description: String,
    /// Where the move started, when it has a distinct origin
    pub origin: Option<(f32, f32)>,
    /// Resolved ball location
    pub ball: (f32, f32),
    pub action: Option<Action>,
    pub success: bool,
    /// Possession after the event
    pub home_possession: bool,
    pub heat: HeatSample,
    pub pass_edge: Option<PassEdge>,
    /// Team totals including this event
    pub totals: TeamTotals,
}

impl MatchEvent {
    pub fn is_goal(&self) -> bool {
        matches!(self.kind, EventKind::GoalFor | EventKind::GoalAgainst)
    }
}
