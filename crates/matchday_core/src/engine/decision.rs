//! Action Selection
//!
//! Scores the eight candidate actions for one player, turns the scores into a
//! softmax distribution, samples one action and feeds the outcome back into
//! the player's psyche.
//!
//! ## Score composition
//! `base × tactical × situational × emotional × fatigue × opponent ×
//! personality × form × environment × N(1, 0.05)`, floored at 0.01.
//! Each factor reads one concern only; see the `*_factor` functions.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use super::momentum::Momentum;
use super::rng::float_in;
use crate::models::{Action, Personality, Player};

/// Floor that keeps every action selectable.
pub const SCORE_FLOOR: f32 = 0.01;
/// Spread of the multiplicative perturbation.
pub const NOISE_SIGMA: f32 = 0.05;

// ============================================================================
// Inputs
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpponentProfile {
    /// Pressing intensity, ~40-70
    pub pressing: f32,
    /// Tendency to counter the player's intent, 0-30
    pub tactic_counter: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub crowd: f32,
    pub weather: f32,
    pub pitch: f32,
}

/// Snapshot of the match as seen by the acting side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchContext {
    pub minute: u8,
    /// Acting side's goals minus the opponent's
    pub goal_diff: i32,
    pub big_match: bool,
    /// Momentum from the acting side's point of view
    pub momentum: f32,
}

/// Per-match constants shared by every decision of one side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamOutlook {
    pub mentality: f32,
    pub opponent: OpponentProfile,
    pub environment: Environment,
}

impl TeamOutlook {
    /// Team mentality from the pressing and tempo dials (0-10 each).
    pub fn mentality_from_dials(press: f32, tempo: f32) -> f32 {
        5.0 + press * 0.5 + tempo * 0.3
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub action: Action,
    pub success: bool,
    /// Post-softmax probability of the chosen action
    pub probability: f32,
}

// ============================================================================
// Factors
// ============================================================================

/// Weighted attribute sum on a 0-1 scale.
pub fn base_desirability(player: &Player, action: Action) -> f32 {
    action
        .weights()
        .iter()
        .map(|&(skill, w)| player.attributes.get(skill) * w)
        .sum::<f32>()
        / 100.0
}

fn tactical_factor(player: &Player, team_mentality: f32) -> f32 {
    let p = &player.psyche;
    (1.0 - (p.mentality - team_mentality).abs() / 20.0) * (p.role_familiarity / 100.0)
}

fn situational_factor(player: &Player, ctx: &MatchContext) -> f32 {
    let p = &player.psyche;
    (1.0 + ctx.goal_diff as f32 * p.resilience / 200.0)
        * (1.0 + (ctx.minute as f32 / 120.0) * p.urgency)
}

fn emotional_factor(player: &Player) -> f32 {
    let p = &player.psyche;
    (p.confidence / 100.0)
        * (1.0 - p.pressure / 200.0)
        * (p.morale / 100.0)
        * (1.0 - p.panic / 150.0)
}

fn fatigue_factor(player: &Player) -> f32 {
    let p = &player.psyche;
    (1.0 - p.fatigue * p.fatigue / 10_000.0) * (1.0 - p.injury_risk * 0.01)
}

fn opponent_factor(player: &Player, opp: &OpponentProfile) -> f32 {
    let balance = player.attributes.balance;
    (1.0 - opp.pressing * (1.0 - balance / 200.0) / 100.0) * (1.0 + opp.tactic_counter / 100.0)
}

/// Personality and momentum multipliers for one action.
pub fn personality_factor(personality: Personality, action: Action, ctx: &MatchContext) -> f32 {
    let mut f = match (personality, action) {
        (Personality::Selfish, Action::Shoot) => 1.18,
        (Personality::Selfish, Action::Pass) => 0.88,
        (Personality::BigMatch, _) if ctx.big_match => 1.12,
        (Personality::Nervous, _) if ctx.big_match => 0.82,
        (Personality::Normal | Personality::Selfish | Personality::BigMatch | Personality::Nervous, _) => 1.0,
    };
    if Momentum::is_high(ctx.momentum) && matches!(action, Action::Shoot | Action::Through) {
        f *= 1.1;
    }
    if Momentum::is_low(ctx.momentum) && action == Action::Hold {
        f *= 1.15;
    }
    f
}

fn form_factor(player: &Player) -> f32 {
    1.0 + (player.psyche.form - 6.5) / 10.0
}

fn environment_factor(env: &Environment) -> f32 {
    (1.0 + env.crowd / 200.0) * (1.0 - env.weather / 100.0) * (1.0 - env.pitch / 150.0)
}

// ============================================================================
// Scoring / sampling
// ============================================================================

/// Raw scores in `Action::ALL` order.
pub fn action_scores<R: Rng + ?Sized>(
    player: &Player,
    outlook: &TeamOutlook,
    ctx: &MatchContext,
    rng: &mut R,
) -> [f32; 8] {
    let shared = tactical_factor(player, outlook.mentality)
        * situational_factor(player, ctx)
        * emotional_factor(player)
        * fatigue_factor(player)
        * opponent_factor(player, &outlook.opponent)
        * form_factor(player)
        * environment_factor(&outlook.environment);

    let noise = Normal::new(1.0f32, NOISE_SIGMA).ok();
    Action::ALL.map(|action| {
        let perturbation = match &noise {
            Some(n) => n.sample(&mut *rng),
            None => 1.0,
        };
        let score = base_desirability(player, action)
            * shared
            * personality_factor(player.personality, action, ctx)
            * perturbation;
        if score.is_finite() {
            score.max(SCORE_FLOOR)
        } else {
            SCORE_FLOOR
        }
    })
}

/// Numerically stable softmax (max subtracted before exponentiating).
pub fn softmax(scores: &[f32]) -> Vec<f32> {
    if scores.is_empty() {
        return vec![];
    }
    let max = scores.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f32 = exps.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        let n = scores.len();
        return vec![1.0 / n as f32; n];
    }
    exps.iter().map(|e| e / total).collect()
}

/// Inverse-CDF draw over a probability vector. Returns the last index when
/// rounding leaves the cumulative sum just short of the draw.
pub fn weighted_choice<R: Rng + ?Sized>(probs: &[f32], rng: &mut R) -> usize {
    let r = rng.gen::<f32>();
    let mut cumulative = 0.0;
    for (i, p) in probs.iter().enumerate() {
        cumulative += p.max(0.0);
        if r < cumulative {
            return i;
        }
    }
    probs.len().saturating_sub(1)
}

/// Choose an action for `player`, roll its success and apply feedback.
pub fn decide<R: Rng + ?Sized>(
    player: &mut Player,
    outlook: &TeamOutlook,
    ctx: &MatchContext,
    rng: &mut R,
) -> Decision {
    let scores = action_scores(player, outlook, ctx, rng);
    let probs = softmax(&scores);
    let idx = weighted_choice(&probs, rng);
    let action = Action::ALL[idx.min(Action::ALL.len() - 1)];
    let probability = probs.get(idx).copied().unwrap_or(0.0);
    let success = rng.gen::<f32>() < probability;

    if success {
        player.psyche.record_success();
    } else {
        player.psyche.record_failure();
    }
    player.psyche.add_fatigue(float_in(rng, 0.3, 1.2));

    Decision { action, success, probability }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Softmax is a distribution for any finite score vector
        #[test]
        fn prop_softmax_sums_to_one(scores in proptest::collection::vec(-50.0f32..50.0, 1..16)) {
            let probs = softmax(&scores);
            let sum: f32 = probs.iter().sum();
            prop_assert!((sum - 1.0).abs() < 1e-4);
            prop_assert!(probs.iter().all(|p| *p >= 0.0));
        }

        #[test]
        fn prop_action_scores_distribution(seed in any::<u64>(), rating in 40u8..=99) {
            let mut rng = crate::engine::rng::seeded(seed);
            let player = Player::create(&mut rng, "P", rating, crate::models::Role::CM, None);
            let outlook = TeamOutlook {
                mentality: 8.0,
                opponent: OpponentProfile { pressing: 60.0, tactic_counter: 20.0 },
                environment: Environment { crowd: 72.0, weather: 15.0, pitch: 10.0 },
            };
            let ctx = MatchContext { minute: 89, goal_diff: -3, big_match: true, momentum: 0.1 };
            let scores = action_scores(&player, &outlook, &ctx, &mut rng);
            prop_assert!(scores.iter().all(|s| *s >= SCORE_FLOOR && s.is_finite()));
            let sum: f32 = softmax(&scores).iter().sum();
            prop_assert!((sum - 1.0).abs() < 1e-4);
        }
    }
}
