//! Event Generator
//!
//! Produces the whole ordered event list for one match before playback
//! starts. Each decision minute picks an attacker or midfielder of the side in
//! possession, runs the action model for them and resolves the outcome into a
//! single [`MatchEvent`].
//!
//! The generator keeps its own running score and momentum so the context
//! handed to the action model is live. An event's own outcome always reads
//! the momentum from before that event is applied.

use log::debug;
use rand::Rng;

use super::config::EnvironmentConfig;
use super::decision::{decide, Decision, Environment, MatchContext, OpponentProfile, TeamOutlook};
use super::momentum::Momentum;
use super::rng::{chance, float_in, int_in, pick_or};
use super::xg::estimate_shot_quality;
use crate::models::{
    Action, EventKind, HeatSample, Line, MatchEvent, PassEdge, Side, Squad, TeamTotals,
};

pub const FIRST_MINUTE: u8 = 1;
pub const LAST_MINUTE: u8 = 89;

/// Goal chance multiplier per unit of the shooting side's momentum.
const MOMENTUM_GOAL_BONUS: f32 = 0.3;
const SCORER_RATING_BONUS: f32 = 0.6;
const KEEPER_RATING_SWING: f32 = 0.3;
const PASS_RATING_GAIN: f32 = 0.05;
const PASS_RATING_LOSS: f32 = 0.1;

/// Irregular decision minutes from 1 to 89, 2-5 minutes apart, always
/// ending on 89.
pub fn decision_minutes<R: Rng + ?Sized>(rng: &mut R) -> Vec<u8> {
    let mut minutes = Vec::with_capacity(32);
    let mut m = FIRST_MINUTE as f32;
    while m <= LAST_MINUTE as f32 {
        minutes.push(m.round() as u8);
        m += float_in(rng, 2.0, 5.0);
    }
    if minutes.last().copied().unwrap_or(0) < LAST_MINUTE {
        minutes.push(LAST_MINUTE);
    }
    minutes
}

#[inline]
fn spot<R: Rng + ?Sized>(rng: &mut R, x: (i32, i32), y: (i32, i32)) -> (f32, f32) {
    (int_in(rng, x.0, x.1) as f32, int_in(rng, y.0, y.1) as f32)
}

/// How one decision resolved, before it is stamped into an event.
struct Outcome {
    kind: EventKind,
    success: bool,
    description: String,
    origin: Option<(f32, f32)>,
    ball: (f32, f32),
    target: Option<u8>,
    home_ball: bool,
}

pub struct EventGenerator<'a, R: Rng + ?Sized> {
    home: &'a mut Squad,
    away: &'a mut Squad,
    rng: &'a mut R,
    outlook: TeamOutlook,
    home_ball: bool,
    score_home: u8,
    score_away: u8,
    momentum: Momentum,
    totals: TeamTotals,
}

impl<'a, R: Rng + ?Sized> EventGenerator<'a, R> {
    /// Draws the synthetic opponent profile and environment, then the
    /// kick-off possession.
    pub fn new(
        home: &'a mut Squad,
        away: &'a mut Squad,
        press: f32,
        tempo: f32,
        env: &EnvironmentConfig,
        rng: &'a mut R,
    ) -> Self {
        let (lo, hi) = env.opponent_pressing_spread;
        let opponent = OpponentProfile {
            pressing: env.opponent_pressing_base + int_in(rng, lo, hi) as f32,
            tactic_counter: int_in(rng, 0, env.opponent_counter_max) as f32,
        };
        let environment = Environment {
            crowd: env.crowd,
            weather: int_in(rng, 0, env.weather_max) as f32,
            pitch: int_in(rng, 0, env.pitch_max) as f32,
        };
        let outlook = TeamOutlook {
            mentality: TeamOutlook::mentality_from_dials(press, tempo),
            opponent,
            environment,
        };
        let home_ball = chance(rng, env.home_kickoff_chance);
        Self {
            home,
            away,
            rng,
            outlook,
            home_ball,
            score_home: 0,
            score_away: 0,
            momentum: Momentum::default(),
            totals: TeamTotals::default(),
        }
    }

    pub fn outlook(&self) -> &TeamOutlook {
        &self.outlook
    }

    pub fn generate(mut self) -> Vec<MatchEvent> {
        let minutes = decision_minutes(&mut *self.rng);
        let events: Vec<MatchEvent> = minutes.into_iter().map(|m| self.step(m)).collect();
        debug!(
            "generated {} events, provisional score {}-{}",
            events.len(),
            self.score_home,
            self.score_away
        );
        events
    }

    fn step(&mut self, minute: u8) -> MatchEvent {
        let side = Side::from_home_flag(self.home_ball);
        let goal_diff = match side {
            Side::Home => self.score_home as i32 - self.score_away as i32,
            Side::Away => self.score_away as i32 - self.score_home as i32,
        };
        // read before write: this event's outcome sees the momentum before it
        let bias = self.momentum.bias_for(side);
        let ctx = MatchContext { minute, goal_diff, big_match: true, momentum: bias };

        let squad: &mut Squad = match side {
            Side::Home => &mut *self.home,
            Side::Away => &mut *self.away,
        };
        let pool = squad.slots_in(&[Line::Attack, Line::Midfield]);
        let actor = pick_or(&mut *self.rng, &pool, 9);
        let decision = decide(squad.player_mut(actor), &self.outlook, &ctx, &mut *self.rng);

        let outcome = match decision.action {
            Action::Shoot | Action::LongShot => Some(self.shoot(side, actor, &decision, bias)),
            Action::Pass | Action::Through => self.pass(side, actor, &decision),
            Action::Dribble => Some(self.dribble(side, actor, &decision)),
            Action::Hold | Action::Press | Action::Run => Some(self.retain(side, actor, &decision)),
        };
        let (outcome, action) = match outcome {
            Some(o) => (o, Some(decision.action)),
            None => (self.neutral_possession(side), None),
        };

        let pass_edge = match (outcome.kind, outcome.target) {
            (EventKind::Pass | EventKind::DangerPass, Some(to)) => {
                Some(PassEdge { from: actor as u8, to, side })
            }
            _ => None,
        };

        self.home_ball = outcome.home_ball;
        match outcome.kind {
            EventKind::GoalFor => self.score_home = self.score_home.saturating_add(1),
            EventKind::GoalAgainst => self.score_away = self.score_away.saturating_add(1),
            _ => {}
        }
        self.momentum.apply(outcome.kind, outcome.success);

        let event = MatchEvent {
            minute,
            kind: outcome.kind,
            side,
            actor_slot: actor as u8,
            target_slot: outcome.target,
            description: outcome.description,
            origin: outcome.origin,
            ball: outcome.ball,
            action,
            success: outcome.success,
            home_possession: outcome.home_ball,
            heat: HeatSample {
                x: outcome.ball.0,
                y: outcome.ball.1,
                side: Side::from_home_flag(outcome.home_ball),
            },
            pass_edge,
            totals: self.totals,
        };
        debug!("{}' {:?} {:?}: {}", minute, side, event.kind, event.description);
        event
    }

    // ========================================================================
    // Outcome resolution
    // ========================================================================

    fn shoot(&mut self, side: Side, actor: usize, decision: &Decision, bias: f32) -> Outcome {
        let rng = &mut *self.rng;
        let (x, y) = match side {
            Side::Home => spot(rng, (28, 72), (10, 35)),
            Side::Away => spot(rng, (28, 72), (65, 90)),
        };
        let xg = estimate_shot_quality(x, y, side);
        let team = self.totals.side_mut(side);
        team.shots = team.shots.saturating_add(1);
        team.xg += xg;

        let squad: &mut Squad = match side {
            Side::Home => &mut *self.home,
            Side::Away => &mut *self.away,
        };
        let shooter = squad.player_mut(actor);
        shooter.stats.shots = shooter.stats.shots.saturating_add(1);
        shooter.stats.touches = shooter.stats.touches.saturating_add(1);
        shooter.stats.xg += xg;
        let shooter_name = shooter.name.clone();

        if chance(rng, xg * (1.0 + bias * MOMENTUM_GOAL_BONUS)) {
            shooter.stats.goals = shooter.stats.goals.saturating_add(1);
            shooter.stats.adjust_rating(SCORER_RATING_BONUS);

            let mids: Vec<usize> =
                squad.slots_in(&[Line::Midfield]).into_iter().filter(|&s| s != actor).collect();
            let assist = if mids.is_empty() {
                None
            } else {
                let slot = pick_or(rng, &mids, mids[0]);
                let provider = squad.player_mut(slot);
                provider.stats.assists = provider.stats.assists.saturating_add(1);
                Some(provider.name.clone())
            };

            let (kind, origin) = match side {
                Side::Home => (EventKind::GoalFor, spot(rng, (25, 75), (18, 40))),
                Side::Away => {
                    self.home.goalkeeper_mut().stats.adjust_rating(-KEEPER_RATING_SWING);
                    (EventKind::GoalAgainst, spot(rng, (25, 75), (55, 80)))
                }
            };
            let description = match (side, assist) {
                (Side::Home, Some(a)) => format!("GOAL! {shooter_name} scores (assist: {a})"),
                (Side::Home, None) => format!("GOAL! {shooter_name} scores"),
                (Side::Away, Some(a)) => format!("{shooter_name} scores for the visitors (assist: {a})"),
                (Side::Away, None) => format!("{shooter_name} scores for the visitors"),
            };
            // the scoring side restarts with the ball
            return Outcome {
                kind,
                success: true,
                description,
                origin: Some(origin),
                ball: (x, y),
                target: None,
                home_ball: side.is_home(),
            };
        }

        match side {
            Side::Home => {
                let attempt = if decision.action == Action::LongShot { "tries from distance" } else { "shoots" };
                let result = if chance(rng, 0.5) { "saved by the keeper" } else { "off target" };
                let origin = spot(rng, (20, 80), (20, 45));
                Outcome {
                    kind: EventKind::Shot,
                    success: false,
                    description: format!("{shooter_name} {attempt}, {result}"),
                    origin: Some(origin),
                    ball: (x, y),
                    target: None,
                    home_ball: chance(rng, 0.28),
                }
            }
            Side::Away => {
                let keeper = self.home.goalkeeper_mut();
                keeper.stats.adjust_rating(KEEPER_RATING_SWING);
                let description = format!("{shooter_name} shoots, {} saves", keeper.name);
                let origin = spot(rng, (20, 80), (55, 80));
                Outcome {
                    kind: EventKind::Save,
                    success: false,
                    description,
                    origin: Some(origin),
                    ball: (x, y),
                    target: None,
                    home_ball: chance(rng, 0.65),
                }
            }
        }
    }

    /// `None` when the passer has nobody to pass to.
    fn pass(&mut self, side: Side, actor: usize, decision: &Decision) -> Option<Outcome> {
        let rng = &mut *self.rng;
        let squad: &mut Squad = match side {
            Side::Home => &mut *self.home,
            Side::Away => &mut *self.away,
        };
        // the away side only looks for its forwards
        let lines: &[Line] = match side {
            Side::Home => &[Line::Attack, Line::Midfield],
            Side::Away => &[Line::Attack],
        };
        let targets: Vec<usize> = squad.slots_in(lines).into_iter().filter(|&s| s != actor).collect();
        let target = *targets.get(rng.gen_range(0..targets.len().max(1)))?;
        let success = decision.success;

        let passer = squad.player_mut(actor);
        passer.stats.passes = passer.stats.passes.saturating_add(1);
        passer.stats.touches = passer.stats.touches.saturating_add(1);
        passer.stats.adjust_rating(if success { PASS_RATING_GAIN } else { -PASS_RATING_LOSS });
        let passer_name = passer.name.clone();
        let receiver = squad.player_mut(target);
        receiver.stats.touches = receiver.stats.touches.saturating_add(1);
        let receiver_name = receiver.name.clone();

        let team = self.totals.side_mut(side);
        team.passes = team.passes.saturating_add(1);

        let outcome = match side {
            Side::Home => {
                let origin = spot(rng, (20, 80), (28, 65));
                let ball = spot(rng, (20, 80), (18, 58));
                let verb = if decision.action == Action::Through { "threads a through ball to" } else { "passes to" };
                let tail = if success { "" } else { " (intercepted)" };
                Outcome {
                    kind: EventKind::Pass,
                    success,
                    description: format!("{passer_name} {verb} {receiver_name}{tail}"),
                    origin: Some(origin),
                    ball,
                    target: Some(target as u8),
                    home_ball: success,
                }
            }
            Side::Away => {
                let ball = spot(rng, (20, 80), (55, 90));
                let tail = if success { "a dangerous ball in behind" } else { "cut out" };
                Outcome {
                    kind: EventKind::DangerPass,
                    success,
                    description: format!("{passer_name} to {receiver_name}, {tail}"),
                    origin: None,
                    ball,
                    target: Some(target as u8),
                    home_ball: !success,
                }
            }
        };
        Some(outcome)
    }

    fn dribble(&mut self, side: Side, actor: usize, decision: &Decision) -> Outcome {
        let rng = &mut *self.rng;
        let squad: &mut Squad = match side {
            Side::Home => &mut *self.home,
            Side::Away => &mut *self.away,
        };
        let dribbler = squad.player_mut(actor);
        dribbler.stats.touches = dribbler.stats.touches.saturating_add(1);
        let name = dribbler.name.clone();
        let success = decision.success;

        match side {
            Side::Home => Outcome {
                kind: EventKind::Duel,
                success,
                description: if success {
                    format!("{name} dribbles past a defender")
                } else {
                    format!("{name} takes on a defender and is stopped")
                },
                origin: None,
                ball: spot(rng, (20, 80), (18, 55)),
                target: None,
                home_ball: success,
            },
            Side::Away => Outcome {
                kind: EventKind::Foul,
                success,
                description: if success {
                    format!("{name} drives forward and wins a foul")
                } else {
                    format!("{name} is dispossessed")
                },
                origin: None,
                ball: spot(rng, (15, 85), (50, 85)),
                target: None,
                home_ball: !success,
            },
        }
    }

    /// Low-risk actions that mostly keep the ball.
    fn retain(&mut self, side: Side, actor: usize, decision: &Decision) -> Outcome {
        let rng = &mut *self.rng;
        let squad: &mut Squad = match side {
            Side::Home => &mut *self.home,
            Side::Away => &mut *self.away,
        };
        let player = squad.player_mut(actor);
        player.stats.touches = player.stats.touches.saturating_add(1);
        let name = player.name.clone();

        let (description, ball, home_ball) = match (side, decision.action) {
            (Side::Home, Action::Run) => {
                let ball = spot(rng, (25, 75), (18, 50));
                (format!("{name} makes an off-the-ball run"), ball, chance(rng, 0.75))
            }
            (Side::Home, _) => {
                let ball = spot(rng, (30, 70), (30, 62));
                (format!("{name} shields the ball"), ball, decision.success || chance(rng, 0.72))
            }
            (Side::Away, _) => {
                let ball = spot(rng, (20, 80), (45, 80));
                (format!("{name} keeps it for the visitors"), ball, chance(rng, 0.45))
            }
        };
        Outcome {
            kind: EventKind::Pass,
            success: true,
            description,
            origin: None,
            ball,
            target: None,
            home_ball,
        }
    }

    fn neutral_possession(&mut self, side: Side) -> Outcome {
        let ball = spot(&mut *self.rng, (20, 80), (30, 70));
        let who = if side.is_home() { "Home side" } else { "Visitors" };
        Outcome {
            kind: EventKind::Pass,
            success: true,
            description: format!("{who} keep possession"),
            origin: None,
            ball,
            target: None,
            home_ball: self.home_ball,
        }
    }
}

/// Generate a full match against the given squads.
pub fn generate_events<R: Rng + ?Sized>(
    home: &mut Squad,
    away: &mut Squad,
    press: f32,
    tempo: f32,
    env: &EnvironmentConfig,
    rng: &mut R,
) -> Vec<MatchEvent> {
    EventGenerator::new(home, away, press, tempo, env, rng).generate()
}
