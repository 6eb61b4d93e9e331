//! Synthetic match environment and opponent profile ranges

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Crowd intensity fed to the action model (default: 72)
    pub crowd: f32,
    /// Weather severity is drawn from 0..=weather_max (default: 15)
    pub weather_max: i32,
    /// Pitch degradation is drawn from 0..=pitch_max (default: 10)
    pub pitch_max: i32,
    /// Opponent pressing = base + U(spread_low..=spread_high) (default: 50, -10, 20)
    pub opponent_pressing_base: f32,
    pub opponent_pressing_spread: (i32, i32),
    /// Opponent counter-tactic tendency drawn from 0..=max (default: 30)
    pub opponent_counter_max: i32,
    /// Probability the home side starts in possession (default: 0.55)
    pub home_kickoff_chance: f32,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            crowd: 72.0,
            weather_max: 15,
            pitch_max: 10,
            opponent_pressing_base: 50.0,
            opponent_pressing_spread: (-10, 20),
            opponent_counter_max: 30,
            home_kickoff_chance: 0.55,
        }
    }
}

impl EnvironmentConfig {
    pub(crate) fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.home_kickoff_chance) {
            return Err(format!(
                "environment.home_kickoff_chance must be in 0..=1, got {}",
                self.home_kickoff_chance
            ));
        }
        if self.weather_max < 0 || self.pitch_max < 0 || self.opponent_counter_max < 0 {
            return Err("environment maxima must be >= 0".to_string());
        }
        Ok(())
    }
}
