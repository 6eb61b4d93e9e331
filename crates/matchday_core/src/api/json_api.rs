use serde::{Deserialize, Serialize};

use crate::engine::clock::VirtualClock;
use crate::engine::config::SimConfig;
use crate::engine::live_match::{MatchSettings, RunOutcome, Simulation};
use crate::engine::match_state::{FinalSummary, MomentumCall, PlayerSummary};
use crate::engine::observer::RecordingObserver;
use crate::error::Result;
use crate::models::{MatchEvent, SquadTemplate, TeamTotals, DEFAULT_FORMATION_ID};

fn default_dial() -> f32 {
    5.0
}

fn default_formation() -> String {
    DEFAULT_FORMATION_ID.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchRequest {
    pub seed: u64,
    #[serde(default = "default_dial")]
    pub press: f32,
    #[serde(default = "default_dial")]
    pub tempo: f32,
    #[serde(default = "default_formation")]
    pub formation: String,
    #[serde(default)]
    pub home_roster: Option<SquadTemplate>,
    #[serde(default)]
    pub away_roster: Option<SquadTemplate>,
    /// Overrides for commentary and environment; timing is always instant
    #[serde(default)]
    pub config: Option<SimConfig>,
}

/// Commentary attached to one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(flatten)]
    pub event: MatchEvent,
    pub score_home: u8,
    pub score_away: u8,
    pub momentum: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fatigue_warning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub momentum_call: Option<MomentumCall>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayersResponse {
    pub home: Vec<PlayerSummary>,
    pub away: Vec<PlayerSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResponse {
    pub score_home: u8,
    pub score_away: u8,
    pub shots: (u16, u16),
    pub passes: (u16, u16),
    pub xg: (f32, f32),
    pub momentum: f32,
    pub formation: String,
    pub events: Vec<EventRecord>,
    pub players: PlayersResponse,
}

impl MatchResponse {
    fn build(formation: &str, totals: TeamTotals, summary: FinalSummary, recorder: RecordingObserver) -> Self {
        let events = recorder
            .events
            .into_iter()
            .map(|rec| EventRecord {
                score_home: rec.snapshot.score_home,
                score_away: rec.snapshot.score_away,
                momentum: rec.snapshot.momentum,
                fatigue_warning: rec.fatigue_warning.map(|w| w.name),
                momentum_call: rec.momentum_call,
                event: rec.event,
            })
            .collect();
        Self {
            score_home: summary.score_home,
            score_away: summary.score_away,
            shots: (totals.home.shots, totals.away.shots),
            passes: (totals.home.passes, totals.away.passes),
            xg: (totals.home.xg, totals.away.xg),
            momentum: summary.momentum,
            formation: formation.to_string(),
            events,
            players: PlayersResponse { home: summary.home_players, away: summary.away_players },
        }
    }
}

/// Run one match instantly from a JSON request and return the JSON result.
///
/// The same request always yields the same response.
pub fn simulate_match(request: &MatchRequest) -> Result<MatchResponse> {
    let mut config = request.config.clone().unwrap_or_default();
    config.scheduler = SimConfig::instant().scheduler;

    let mut sim = Simulation::with_clock(request.seed, config, VirtualClock::new())?;
    if request.home_roster.is_some() || request.away_roster.is_some() {
        let home = request.home_roster.clone().unwrap_or_else(SquadTemplate::home_demo);
        let away = request.away_roster.clone().unwrap_or_else(SquadTemplate::away_demo);
        sim = sim.with_rosters(home, away)?;
    }

    let settings = MatchSettings::new(request.press, request.tempo, request.formation.clone());
    let mut recorder = RecordingObserver::new();
    let outcome = sim.run(&settings, &mut recorder)?;
    debug_assert_eq!(outcome, RunOutcome::Completed);

    let summary = match recorder.summary.take() {
        Some(summary) => summary,
        None => sim.state().final_summary(),
    };
    let state = sim.state();
    Ok(MatchResponse::build(state.formation.id(), state.totals, summary, recorder))
}

pub fn simulate_match_json(request_json: &str) -> Result<String> {
    let request: MatchRequest = serde_json::from_str(request_json)?;
    let response = simulate_match(&request)?;
    Ok(serde_json::to_string(&response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;

    #[test]
    fn test_minimal_request() {
        let json = simulate_match_json(r#"{"seed": 42}"#).unwrap();
        let response: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(response["formation"], "4-4-2");
        assert_eq!(response["players"]["home"].as_array().unwrap().len(), 11);
        let events = response["events"].as_array().unwrap();
        assert_eq!(events.last().unwrap()["minute"], 89);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(simulate_match_json("{"), Err(SimError::Json(_))));
    }

    #[test]
    fn test_dial_out_of_range() {
        let err = simulate_match_json(r#"{"seed": 1, "press": 12}"#).unwrap_err();
        assert!(matches!(err, SimError::InvalidSetting { name: "press", .. }));
    }

    #[test]
    fn test_short_roster_rejected() {
        let req = r#"{"seed": 1, "home_roster": [{"name": "Solo", "rating": 70}]}"#;
        assert!(matches!(simulate_match_json(req), Err(SimError::InvalidRoster(_))));
    }
}
