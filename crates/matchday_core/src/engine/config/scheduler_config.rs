//! Playback timing (match minutes -> wall clock)

use serde::{Deserialize, Serialize};

/// Smallest non-zero tick accepted by `validate`
pub const MIN_TICK_MS: f64 = 1.0;

/// Time compression and tick granularity for live playback.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Wall-clock milliseconds per match minute (default: 600000/90, 10 real minutes per match)
    pub ms_per_match_minute: f64,
    /// Positioning tick increment in milliseconds (default: 350). 0 disables ticks,
    /// otherwise at least [`MIN_TICK_MS`].
    pub tick_ms: f64,
    /// Lower bound of the gap before each event (default: 30)
    pub min_event_gap_ms: f64,
    /// Lower bound of the final sleep after the last tick of a gap (default: 10)
    pub min_settle_ms: f64,
    /// Ball random-walk step per tick, pitch units (default: 9.0)
    pub ball_jitter: f32,
    /// Per-tick ball drift toward the goal of the side momentum favours (default: 2.0)
    pub momentum_ball_drift: f32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            ms_per_match_minute: 600_000.0 / 90.0,
            tick_ms: 350.0,
            min_event_gap_ms: 30.0,
            min_settle_ms: 10.0,
            ball_jitter: 9.0,
            momentum_ball_drift: 2.0,
        }
    }
}

impl SchedulerConfig {
    /// Ticks and event gaps both 100x faster than realtime.
    pub fn fast() -> Self {
        Self {
            ms_per_match_minute: 600_000.0 / 90.0 / 100.0,
            tick_ms: 3.5,
            min_event_gap_ms: 0.3,
            min_settle_ms: 0.1,
            ..Self::default()
        }
    }

    /// No waiting and no positioning ticks; events are applied back to back.
    pub fn instant() -> Self {
        Self {
            ms_per_match_minute: 0.0,
            tick_ms: 0.0,
            min_event_gap_ms: 0.0,
            min_settle_ms: 0.0,
            ..Self::default()
        }
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        let fields = [
            ("ms_per_match_minute", self.ms_per_match_minute),
            ("tick_ms", self.tick_ms),
            ("min_event_gap_ms", self.min_event_gap_ms),
            ("min_settle_ms", self.min_settle_ms),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("scheduler.{name} must be finite and >= 0, got {value}"));
            }
        }
        if self.tick_ms > 0.0 && self.tick_ms < MIN_TICK_MS {
            return Err(format!(
                "scheduler.tick_ms must be 0 or at least {MIN_TICK_MS}, got {}",
                self.tick_ms
            ));
        }
        if !self.ball_jitter.is_finite() || self.ball_jitter < 0.0 {
            return Err(format!("scheduler.ball_jitter must be >= 0, got {}", self.ball_jitter));
        }
        if !self.momentum_ball_drift.is_finite() {
            return Err("scheduler.momentum_ball_drift must be finite".to_string());
        }
        Ok(())
    }
}
