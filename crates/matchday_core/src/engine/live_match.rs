//! Live Match Playback
//!
//! State machine over Idle -> Running -> Ended. `run` generates the full
//! event list up front, then plays it back in compressed real time: between
//! two events the ball random-walks and all 22 players are repositioned on
//! every tick, and each event is applied to the match state after its gap.
//!
//! Cancellation is cooperative. A [`StopHandle`] may be triggered from any
//! thread or from inside an observer; the loop checks it before each event and
//! after every sleep.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::clock::{millis, Clock, ThreadClock};
use super::config::{SchedulerConfig, SimConfig};
use super::event_gen::generate_events;
use super::match_state::MatchState;
use super::momentum::NEUTRAL;
use super::observer::{EventUpdate, MatchObserver, TickFrame, TICK_POSITIONS};
use super::positioning::{player_position, PitchContext};
use super::rng::{self, jitter, SimRng};
use crate::error::{Result, SimError};
use crate::models::{Formation, MatchEvent, Side, Squad, SquadTemplate, DEFAULT_FORMATION_ID, SQUAD_SIZE};

/// Upper bound of both dials.
pub const DIAL_MAX: f32 = 10.0;
const BALL_MIN: f32 = 4.0;
const BALL_MAX: f32 = 96.0;

// ============================================
// Settings / outcome
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSettings {
    /// Pressing dial, 0-10
    pub press: f32,
    /// Tempo dial, 0-10
    pub tempo: f32,
    /// Formation id; unknown ids fall back to 4-4-2
    #[serde(default = "default_formation")]
    pub formation: String,
}

fn default_formation() -> String {
    DEFAULT_FORMATION_ID.to_string()
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self { press: 5.0, tempo: 5.0, formation: default_formation() }
    }
}

impl MatchSettings {
    pub fn new(press: f32, tempo: f32, formation: impl Into<String>) -> Self {
        Self { press, tempo, formation: formation.into() }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("press", self.press), ("tempo", self.tempo)] {
            if !value.is_finite() || !(0.0..=DIAL_MAX).contains(&value) {
                return Err(SimError::InvalidSetting { name, value });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    Idle,
    Running,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// Every event was played and `on_end` delivered
    Completed,
    /// Stopped before the last event
    Cancelled,
    /// Already running, or the state was not reset since the last run
    Ignored,
}

// ============================================
// StopHandle
// ============================================

/// Cloneable cancellation token shared with a [`Simulation`].
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn clear(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

// ============================================
// Simulation
// ============================================

pub struct Simulation<C: Clock = ThreadClock> {
    config: SimConfig,
    rng: SimRng,
    clock: C,
    state: MatchState,
    phase: SimPhase,
    /// Set once a run starts; cleared by `reset_state`
    needs_reset: bool,
    stop: StopHandle,
    home_roster: SquadTemplate,
    away_roster: SquadTemplate,
}

impl Simulation<ThreadClock> {
    /// Deterministic simulation: the same seed and config replay the same
    /// match.
    pub fn new(seed: u64, config: SimConfig) -> Result<Self> {
        Self::with_clock(seed, config, ThreadClock)
    }

    pub fn from_entropy(config: SimConfig) -> Result<Self> {
        Self::build(rng::from_entropy(), config, ThreadClock)
    }
}

impl<C: Clock> Simulation<C> {
    pub fn with_clock(seed: u64, config: SimConfig, clock: C) -> Result<Self> {
        Self::build(rng::seeded(seed), config, clock)
    }

    fn build(mut rng: SimRng, config: SimConfig, clock: C) -> Result<Self> {
        config.validate()?;
        let home_roster = SquadTemplate::home_demo();
        let away_roster = SquadTemplate::away_demo();
        let home = Squad::build(&mut rng, &home_roster);
        let away = Squad::build(&mut rng, &away_roster);
        Ok(Self {
            config,
            rng,
            clock,
            state: MatchState::new(home, away),
            phase: SimPhase::Idle,
            needs_reset: false,
            stop: StopHandle::new(),
            home_roster,
            away_roster,
        })
    }

    /// Replace the demo rosters and rebuild both squads.
    pub fn with_rosters(mut self, home: SquadTemplate, away: SquadTemplate) -> Result<Self> {
        home.validate()?;
        away.validate()?;
        self.home_roster = home;
        self.away_roster = away;
        self.reset_state();
        Ok(self)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Request cancellation through the shared [`StopHandle`].
    ///
    /// `run` borrows the simulation for the whole match, so a live match is
    /// stopped from an observer or another thread via `stop_handle()`. The
    /// flag is cleared when the next run starts, so stopping while idle has
    /// no effect on it.
    pub fn stop(&self) {
        self.stop.stop();
    }

    /// Fresh squads and counters; required before every run after the first.
    pub fn reset_state(&mut self) {
        if self.phase == SimPhase::Running {
            warn!("reset ignored while a match is running");
            return;
        }
        let home = Squad::build(&mut self.rng, &self.home_roster);
        let away = Squad::build(&mut self.rng, &self.away_roster);
        self.state = MatchState::new(home, away);
        self.phase = SimPhase::Idle;
        self.needs_reset = false;
    }

    /// Play one match to the end, or until stopped.
    ///
    /// Invalid dials are rejected before anything changes. A call while
    /// running, or before `reset_state` after a previous run, is ignored.
    pub fn run(&mut self, settings: &MatchSettings, observer: &mut dyn MatchObserver) -> Result<RunOutcome> {
        settings.validate()?;
        if self.phase == SimPhase::Running || self.needs_reset {
            warn!("run ignored: phase {:?}, reset required: {}", self.phase, self.needs_reset);
            return Ok(RunOutcome::Ignored);
        }

        self.phase = SimPhase::Running;
        self.needs_reset = true;
        self.stop.clear();
        let formation = Formation::resolve(&settings.formation);
        self.state.formation = formation;
        info!(
            "kick-off: formation {}, press {:.1}, tempo {:.1}",
            formation.id(),
            settings.press,
            settings.tempo
        );

        let events = generate_events(
            &mut self.state.home,
            &mut self.state.away,
            settings.press,
            settings.tempo,
            &self.config.environment,
            &mut self.rng,
        );

        observer.on_start();
        let outcome = self.play(&events, settings.press / DIAL_MAX, observer);

        match outcome {
            RunOutcome::Completed => {
                self.phase = SimPhase::Ended;
                let summary = self.state.final_summary();
                info!(
                    "full time: {}-{} (xG {:.2}-{:.2}, momentum {:.2})",
                    summary.score_home,
                    summary.score_away,
                    summary.totals.home.xg,
                    summary.totals.away.xg,
                    summary.momentum
                );
                observer.on_end(&summary);
            }
            RunOutcome::Cancelled | RunOutcome::Ignored => {
                self.phase = SimPhase::Idle;
                info!(
                    "match stopped at minute {} with the score {}-{}",
                    self.state.minute, self.state.score_home, self.state.score_away
                );
            }
        }
        Ok(outcome)
    }

    fn play(&mut self, events: &[MatchEvent], press_intensity: f32, observer: &mut dyn MatchObserver) -> RunOutcome {
        let sched = self.config.scheduler.clone();
        let mut prev_minute = 0u8;
        let mut ball = (50.0f32, 50.0f32);

        for event in events {
            if self.stop.is_stopped() {
                return RunOutcome::Cancelled;
            }
            let span = event.minute.saturating_sub(prev_minute);
            let gap = (span as f64 * sched.ms_per_match_minute).max(sched.min_event_gap_ms);
            let mut elapsed = 0.0;

            if sched.tick_ms > 0.0 {
                while elapsed + sched.tick_ms < gap {
                    self.clock.sleep(millis(sched.tick_ms));
                    elapsed += sched.tick_ms;
                    if self.stop.is_stopped() {
                        return RunOutcome::Cancelled;
                    }
                    ball = self.walk_ball(ball, &sched);
                    let minute = prev_minute as f64 + span as f64 * (elapsed / gap);
                    let frame = self.tick_frame(minute as f32, ball, event.home_possession, press_intensity);
                    observer.on_tick(&frame);
                }
            }

            self.clock.sleep(millis((gap - elapsed).max(sched.min_settle_ms)));
            if self.stop.is_stopped() {
                return RunOutcome::Cancelled;
            }

            let effects = self.state.apply_event(event, &self.config.commentary);
            ball = event.ball;
            debug!(
                "{}' applied {:?}: {}-{} momentum {:.3}",
                event.minute,
                event.kind,
                self.state.score_home,
                self.state.score_away,
                self.state.momentum.value()
            );
            observer.on_event(&EventUpdate {
                event,
                snapshot: self.state.snapshot(),
                state: &self.state,
                fatigue_warning: effects.fatigue_warning.as_ref(),
                momentum_call: effects.momentum_call,
            });
            prev_minute = event.minute;
        }
        RunOutcome::Completed
    }

    /// Random walk, drifting toward the goal of the side momentum favours.
    fn walk_ball(&mut self, (x, y): (f32, f32), sched: &SchedulerConfig) -> (f32, f32) {
        // home attacks toward y = 0
        let lean = (self.state.momentum.value() - NEUTRAL) * 2.0;
        let drift = -lean * sched.momentum_ball_drift;
        (
            (x + jitter(&mut self.rng, sched.ball_jitter)).clamp(BALL_MIN, BALL_MAX),
            (y + jitter(&mut self.rng, sched.ball_jitter) + drift).clamp(BALL_MIN, BALL_MAX),
        )
    }

    fn tick_frame(&mut self, minute: f32, ball: (f32, f32), home_possession: bool, press_intensity: f32) -> TickFrame {
        let pitch = PitchContext {
            home_has_ball: home_possession,
            ball,
            press_intensity,
            formation: self.state.formation,
        };
        let mut positions = Vec::with_capacity(TICK_POSITIONS);
        for slot in 0..SQUAD_SIZE {
            for side in [Side::Home, Side::Away] {
                let pos = player_position(self.state.squad(side).player(slot), slot, side, &pitch, &mut self.rng);
                self.state.squad_mut(side).player_mut(slot).posture = pos.posture;
                positions.push(pos);
            }
        }
        TickFrame { minute, ball, home_possession, positions }
    }
}
