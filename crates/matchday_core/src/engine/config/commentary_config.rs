//! Thresholds for the fatigue and momentum call-outs attached to events

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CommentaryConfig {
    /// First minute of the fatigue check window (default: 58)
    pub fatigue_window_start: u8,
    /// Last minute of the fatigue check window (default: 62)
    pub fatigue_window_end: u8,
    /// Fatigue above which a home player is flagged (default: 65)
    pub fatigue_threshold: f32,
    /// Momentum above which the home side is called dominant (default: 0.78)
    pub home_dominance: f32,
    /// Momentum below which the away side is called dominant (default: 0.22)
    pub away_dominance: f32,
}

impl Default for CommentaryConfig {
    fn default() -> Self {
        Self {
            fatigue_window_start: 58,
            fatigue_window_end: 62,
            fatigue_threshold: 65.0,
            home_dominance: 0.78,
            away_dominance: 0.22,
        }
    }
}

impl CommentaryConfig {
    pub fn in_fatigue_window(&self, minute: u8) -> bool {
        (self.fatigue_window_start..=self.fatigue_window_end).contains(&minute)
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.fatigue_window_start > self.fatigue_window_end {
            return Err("commentary fatigue window is inverted".to_string());
        }
        if self.away_dominance >= self.home_dominance {
            return Err("commentary.away_dominance must be below home_dominance".to_string());
        }
        Ok(())
    }
}
