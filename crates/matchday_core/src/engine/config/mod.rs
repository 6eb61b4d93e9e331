//! # Simulation Configuration
//!
//! Every tunable the scheduler and event generator read, in one serde tree.
//!
//! ```rust
//! use matchday_core::engine::config::SimConfig;
//!
//! let live = SimConfig::realtime();
//! let tests = SimConfig::instant();
//! assert!(tests.scheduler.tick_ms < live.scheduler.tick_ms);
//! ```

mod commentary_config;
mod environment_config;
mod scheduler_config;

pub use commentary_config::CommentaryConfig;
pub use environment_config::EnvironmentConfig;
pub use scheduler_config::{SchedulerConfig, MIN_TICK_MS};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SimConfig {
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub commentary: CommentaryConfig,
    #[serde(default)]
    pub environment: EnvironmentConfig,
}

impl SimConfig {
    /// 10 real minutes per 90 match minutes (default)
    pub fn realtime() -> Self {
        Self::default()
    }

    /// Demo playback, 100x faster than realtime
    pub fn fast() -> Self {
        Self { scheduler: SchedulerConfig::fast(), ..Self::default() }
    }

    /// Back-to-back playback with no positioning ticks (tests, JSON API)
    pub fn instant() -> Self {
        Self { scheduler: SchedulerConfig::instant(), ..Self::default() }
    }

    /// Parse a (possibly partial) JSON config; missing sections take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.scheduler.validate().map_err(SimError::InvalidConfig)?;
        self.commentary.validate().map_err(SimError::InvalidConfig)?;
        self.environment.validate().map_err(SimError::InvalidConfig)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        assert!(SimConfig::realtime().validate().is_ok());
        assert!(SimConfig::fast().validate().is_ok());
        assert!(SimConfig::instant().validate().is_ok());
    }

    #[test]
    fn test_realtime_compression() {
        let cfg = SimConfig::realtime();
        let ninety = cfg.scheduler.ms_per_match_minute * 90.0;
        assert!((ninety - 600_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_fast_preset_scales_ticks_and_gaps() {
        let live = SchedulerConfig::default();
        let fast = SchedulerConfig::fast();
        for (l, f) in [
            (live.ms_per_match_minute, fast.ms_per_match_minute),
            (live.tick_ms, fast.tick_ms),
            (live.min_event_gap_ms, fast.min_event_gap_ms),
            (live.min_settle_ms, fast.min_settle_ms),
        ] {
            assert!((l / f - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let cfg = SimConfig::from_json_str(r#"{"scheduler":{"ms_per_match_minute":100.0,"tick_ms":10.0,"min_event_gap_ms":1.0,"min_settle_ms":1.0,"ball_jitter":9.0,"momentum_ball_drift":0.0}}"#)
            .expect("valid config");
        assert_eq!(cfg.scheduler.tick_ms, 10.0);
        assert_eq!(cfg.commentary, CommentaryConfig::default());
        assert_eq!(cfg.environment.crowd, 72.0);
    }

    #[test]
    fn test_single_field_overrides_keep_section_defaults() {
        let cfg = SimConfig::from_json_str(
            r#"{"scheduler":{"tick_ms":10.0},"commentary":{"fatigue_threshold":0.0},"environment":{"crowd":40.0}}"#,
        )
        .expect("valid config");
        assert_eq!(cfg.scheduler.tick_ms, 10.0);
        assert_eq!(cfg.scheduler.ms_per_match_minute, SchedulerConfig::default().ms_per_match_minute);
        assert_eq!(cfg.commentary.fatigue_threshold, 0.0);
        assert_eq!(cfg.commentary.fatigue_window_start, 58);
        assert_eq!(cfg.environment.crowd, 40.0);
        assert_eq!(cfg.environment.home_kickoff_chance, 0.55);
    }

    #[test]
    fn test_sub_millisecond_tick_rejected() {
        let mut cfg = SimConfig::default();
        cfg.scheduler.tick_ms = 1e-9;
        assert!(matches!(cfg.validate(), Err(SimError::InvalidConfig(_))));
        cfg.scheduler.tick_ms = MIN_TICK_MS;
        assert!(cfg.validate().is_ok());
        cfg.scheduler.tick_ms = 0.0;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_negative_tick_rejected() {
        let mut cfg = SimConfig::default();
        cfg.scheduler.tick_ms = -1.0;
        assert!(matches!(cfg.validate(), Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn test_inverted_dominance_rejected() {
        let mut cfg = SimConfig::default();
        cfg.commentary.away_dominance = 0.9;
        assert!(cfg.validate().is_err());
    }
}
