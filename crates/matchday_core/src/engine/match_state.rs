//! Match State
//!
//! The session object a run plays into: both squads, score, team totals,
//! momentum and the append-only heat and pass logs. Built fresh by
//! [`MatchState::new`] at every reset; only the scheduler mutates it.

use serde::{Deserialize, Serialize};

use super::config::CommentaryConfig;
use super::momentum::Momentum;
use crate::models::{
    EventKind, Formation, HeatSample, MatchEvent, MatchStats, PassEdge, Side, Squad, TeamTotals,
};

/// Morale every home player gains when the home side scores.
pub const GOAL_FOR_MORALE: f32 = 5.0;
/// Panic every home player gains when the away side scores.
pub const GOAL_AGAINST_PANIC: f32 = 3.0;

// ============================================
// Commentary call-outs
// ============================================

/// A tired home player spotted inside the fatigue window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FatigueWarning {
    pub slot: u8,
    pub name: String,
    pub fatigue: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentumCall {
    HomeDominant,
    AwayDominant,
}

/// Side effects of applying one event that observers may want to announce.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventEffects {
    pub fatigue_warning: Option<FatigueWarning>,
    pub momentum_call: Option<MomentumCall>,
}

// ============================================
// MatchState
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub home: Squad,
    pub away: Squad,
    pub formation: Formation,
    pub score_home: u8,
    pub score_away: u8,
    pub totals: TeamTotals,
    pub momentum: Momentum,
    pub heat_map: Vec<HeatSample>,
    pub pass_map: Vec<PassEdge>,
    pub minute: u8,
}

impl MatchState {
    pub fn new(home: Squad, away: Squad) -> Self {
        Self {
            home,
            away,
            formation: Formation::default(),
            score_home: 0,
            score_away: 0,
            totals: TeamTotals::default(),
            momentum: Momentum::default(),
            heat_map: Vec::new(),
            pass_map: Vec::new(),
            minute: 0,
        }
    }

    pub fn squad(&self, side: Side) -> &Squad {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn squad_mut(&mut self, side: Side) -> &mut Squad {
        match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }

    /// Home goals minus away goals.
    pub fn goal_diff(&self) -> i32 {
        self.score_home as i32 - self.score_away as i32
    }

    /// Play one event into the state.
    ///
    /// Scores and squad mood change on goals, momentum is updated, the clock
    /// advances and the event's totals and log entries are taken over.
    pub fn apply_event(&mut self, event: &MatchEvent, commentary: &CommentaryConfig) -> EventEffects {
        match event.kind {
            EventKind::GoalFor => {
                self.score_home = self.score_home.saturating_add(1);
                for p in self.home.iter_mut() {
                    p.psyche.lift_morale(GOAL_FOR_MORALE);
                }
            }
            EventKind::GoalAgainst => {
                self.score_away = self.score_away.saturating_add(1);
                for p in self.home.iter_mut() {
                    p.psyche.raise_panic(GOAL_AGAINST_PANIC);
                }
            }
            _ => {}
        }

        let momentum = self.momentum.apply(event.kind, event.success);
        self.minute = event.minute;
        self.totals = event.totals;
        self.heat_map.push(event.heat);
        if let Some(edge) = event.pass_edge {
            self.pass_map.push(edge);
        }

        let fatigue_warning = if commentary.in_fatigue_window(event.minute) {
            self.home
                .iter()
                .enumerate()
                .find(|(_, p)| p.psyche.fatigue > commentary.fatigue_threshold)
                .map(|(slot, p)| FatigueWarning {
                    slot: slot as u8,
                    name: p.name.clone(),
                    fatigue: p.psyche.fatigue,
                })
        } else {
            None
        };

        let momentum_call = if momentum > commentary.home_dominance && event.kind != EventKind::GoalFor {
            Some(MomentumCall::HomeDominant)
        } else if momentum < commentary.away_dominance && event.kind != EventKind::GoalAgainst {
            Some(MomentumCall::AwayDominant)
        } else {
            None
        };

        EventEffects { fatigue_warning, momentum_call }
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            minute: self.minute,
            score_home: self.score_home,
            score_away: self.score_away,
            totals: self.totals,
            momentum: self.momentum.value(),
            heat_samples: self.heat_map.len(),
            pass_edges: self.pass_map.len(),
        }
    }

    pub fn final_summary(&self) -> FinalSummary {
        FinalSummary {
            score_home: self.score_home,
            score_away: self.score_away,
            totals: self.totals,
            momentum: self.momentum.value(),
            home_players: PlayerSummary::collect(&self.home),
            away_players: PlayerSummary::collect(&self.away),
        }
    }
}

// ============================================
// Snapshots
// ============================================

/// Running state delivered with every event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub minute: u8,
    pub score_home: u8,
    pub score_away: u8,
    pub totals: TeamTotals,
    pub momentum: f32,
    pub heat_samples: usize,
    pub pass_edges: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub name: String,
    pub number: u8,
    pub role: String,
    pub stats: MatchStats,
    pub fatigue: f32,
}

impl PlayerSummary {
    fn collect(squad: &Squad) -> Vec<Self> {
        squad
            .iter()
            .map(|p| Self {
                name: p.name.clone(),
                number: p.number,
                role: p.role.code().to_string(),
                stats: p.stats.clone(),
                fatigue: p.psyche.fatigue,
            })
            .collect()
    }
}

/// Delivered once by `on_end` after the last event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalSummary {
    pub score_home: u8,
    pub score_away: u8,
    pub totals: TeamTotals,
    pub momentum: f32,
    pub home_players: Vec<PlayerSummary>,
    pub away_players: Vec<PlayerSummary>,
}
