//! Batch simulation
//!
//! Plays many seeded matches instantly and aggregates the results. Large
//! batches are spread over the rayon pool; each match owns its simulation,
//! so results do not depend on scheduling.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::clock::VirtualClock;
use super::config::SimConfig;
use super::live_match::{MatchSettings, RunOutcome, Simulation};
use super::match_state::FinalSummary;
use super::observer::RecordingObserver;
use crate::error::Result;

/// Below this many matches the batch runs sequentially.
const PARALLEL_THRESHOLD: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub matches: usize,
    pub home_wins: usize,
    pub draws: usize,
    pub away_wins: usize,
    pub avg_goals_home: f32,
    pub avg_goals_away: f32,
    pub avg_xg_home: f32,
    pub avg_xg_away: f32,
    pub avg_final_momentum: f32,
}

impl BatchSummary {
    fn from_results(results: &[FinalSummary]) -> Self {
        let n = results.len();
        if n == 0 {
            return Self::default();
        }
        let mut s = Self { matches: n, ..Self::default() };
        for r in results {
            match r.score_home.cmp(&r.score_away) {
                std::cmp::Ordering::Greater => s.home_wins += 1,
                std::cmp::Ordering::Equal => s.draws += 1,
                std::cmp::Ordering::Less => s.away_wins += 1,
            }
            s.avg_goals_home += r.score_home as f32;
            s.avg_goals_away += r.score_away as f32;
            s.avg_xg_home += r.totals.home.xg;
            s.avg_xg_away += r.totals.away.xg;
            s.avg_final_momentum += r.momentum;
        }
        let n = n as f32;
        s.avg_goals_home /= n;
        s.avg_goals_away /= n;
        s.avg_xg_home /= n;
        s.avg_xg_away /= n;
        s.avg_final_momentum /= n;
        s
    }
}

/// One instant match for `seed`. Timing settings in `config` are ignored.
pub fn simulate_once(seed: u64, settings: &MatchSettings, config: &SimConfig) -> Result<FinalSummary> {
    let config = SimConfig { scheduler: SimConfig::instant().scheduler, ..config.clone() };
    let mut sim = Simulation::with_clock(seed, config, VirtualClock::new())?;
    let mut observer = RecordingObserver::new();
    let outcome = sim.run(settings, &mut observer)?;
    debug_assert_eq!(outcome, RunOutcome::Completed);
    Ok(observer.summary.unwrap_or_else(|| sim.state().final_summary()))
}

/// Matches for seeds `first_seed..first_seed + count`.
pub fn simulate_batch(
    first_seed: u64,
    count: usize,
    settings: &MatchSettings,
    config: &SimConfig,
) -> Result<BatchSummary> {
    settings.validate()?;
    config.validate()?;
    let seeds: Vec<u64> = (0..count as u64).map(|i| first_seed.wrapping_add(i)).collect();
    let results: Result<Vec<FinalSummary>> = if seeds.len() > PARALLEL_THRESHOLD {
        seeds.par_iter().map(|&seed| simulate_once(seed, settings, config)).collect()
    } else {
        seeds.iter().map(|&seed| simulate_once(seed, settings, config)).collect()
    };
    Ok(BatchSummary::from_results(&results?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_counts_add_up() {
        let summary = simulate_batch(100, 20, &MatchSettings::default(), &SimConfig::default()).unwrap();
        assert_eq!(summary.matches, 20);
        assert_eq!(summary.home_wins + summary.draws + summary.away_wins, 20);
        assert!(summary.avg_xg_home > 0.0);
        assert!((0.05..=0.95).contains(&summary.avg_final_momentum));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let settings = MatchSettings::new(8.0, 2.0, "3-5-2");
        let parallel = simulate_batch(7, 12, &settings, &SimConfig::default()).unwrap();
        let sequential: Vec<FinalSummary> =
            (7..19).map(|seed| simulate_once(seed, &settings, &SimConfig::default()).unwrap()).collect();
        assert_eq!(parallel, BatchSummary::from_results(&sequential));
    }

    #[test]
    fn test_empty_batch() {
        let summary = simulate_batch(0, 0, &MatchSettings::default(), &SimConfig::default()).unwrap();
        assert_eq!(summary, BatchSummary::default());
    }

    #[test]
    fn test_invalid_settings_rejected() {
        assert!(simulate_batch(0, 3, &MatchSettings::new(11.0, 5.0, "4-4-2"), &SimConfig::default()).is_err());
    }
}
