//! Player model: skills, psychological/condition state and per-match stats.
//!
//! Skills are rolled once from the base rating. Psychological fields move
//! during a match but every update goes through a clamping method, so the
//! documented bounds hold after any number of updates.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::rng::{float_in, int_in};

pub const SKILL_MIN: f32 = 40.0;
pub const SKILL_MAX: f32 = 99.0;
pub const NEUTRAL_SKILL: f32 = 50.0;

pub const CONFIDENCE_MAX: f32 = 100.0;
pub const MORALE_MAX: f32 = 100.0;
pub const PANIC_MAX: f32 = 150.0;
pub const FATIGUE_MAX: f32 = 100.0;

pub const RATING_START: f32 = 6.0;
pub const RATING_MIN: f32 = 4.0;
pub const RATING_MAX: f32 = 10.0;

// ============================================================================
// Role
// ============================================================================

/// Squad slot role. Fixed per slot by the squad template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    GK,
    RB,
    CB,
    LB,
    CM,
    CAM,
    LW,
    ST,
    RW,
}

/// Coarse line a role plays in; drives positioning and actor selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Line {
    Goalkeeper,
    Defence,
    Midfield,
    Attack,
}

impl Role {
    pub fn line(self) -> Line {
        match self {
            Role::GK => Line::Goalkeeper,
            Role::RB | Role::CB | Role::LB => Line::Defence,
            Role::CM | Role::CAM => Line::Midfield,
            Role::LW | Role::ST | Role::RW => Line::Attack,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Role::GK => "GK",
            Role::RB => "RB",
            Role::CB => "CB",
            Role::LB => "LB",
            Role::CM => "CM",
            Role::CAM => "CAM",
            Role::LW => "LW",
            Role::ST => "ST",
            Role::RW => "RW",
        }
    }
}

// ============================================================================
// Personality / Posture
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Personality {
    Normal,
    Selfish,
    BigMatch,
    Nervous,
}

impl Personality {
    pub const ALL: [Personality; 4] =
        [Personality::Normal, Personality::Selfish, Personality::BigMatch, Personality::Nervous];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        *Self::ALL.choose(rng).unwrap_or(&Personality::Normal)
    }
}

/// Instantaneous off-ball behaviour, recomputed every positioning tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Posture {
    #[default]
    Normal,
    Run,
    Press,
}

// ============================================================================
// Skills
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    Passing,
    Finishing,
    Dribbling,
    Technique,
    Vision,
    LongShots,
    Strength,
    Balance,
    Agility,
    Composure,
    Stamina,
    Pace,
}

impl Skill {
    pub const ALL: [Skill; 12] = [
        Skill::Passing,
        Skill::Finishing,
        Skill::Dribbling,
        Skill::Technique,
        Skill::Vision,
        Skill::LongShots,
        Skill::Strength,
        Skill::Balance,
        Skill::Agility,
        Skill::Composure,
        Skill::Stamina,
        Skill::Pace,
    ];

    /// Half-width of the uniform noise added to the base rating.
    pub fn noise(self) -> f32 {
        match self {
            Skill::Technique | Skill::Composure => 6.0,
            Skill::Passing
            | Skill::Dribbling
            | Skill::Vision
            | Skill::Balance
            | Skill::Agility
            | Skill::Stamina => 8.0,
            Skill::Finishing | Skill::Strength | Skill::Pace => 10.0,
            Skill::LongShots => 12.0,
        }
    }
}

/// Twelve skills on the 40-99 scale. `Default` is the neutral 50 used
/// whenever a skill has no rolled value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    pub passing: f32,
    pub finishing: f32,
    pub dribbling: f32,
    pub technique: f32,
    pub vision: f32,
    pub long_shots: f32,
    pub strength: f32,
    pub balance: f32,
    pub agility: f32,
    pub composure: f32,
    pub stamina: f32,
    pub pace: f32,
}

impl Default for Attributes {
    fn default() -> Self {
        Self::uniform(NEUTRAL_SKILL)
    }
}

impl Attributes {
    pub fn uniform(value: f32) -> Self {
        Self {
            passing: value,
            finishing: value,
            dribbling: value,
            technique: value,
            vision: value,
            long_shots: value,
            strength: value,
            balance: value,
            agility: value,
            composure: value,
            stamina: value,
            pace: value,
        }
    }

    /// Roll every skill as `rating ± noise`, clamped to 40-99.
    pub fn roll<R: Rng + ?Sized>(rng: &mut R, rating: f32) -> Self {
        let mut attrs = Self::default();
        for skill in Skill::ALL {
            let noise = skill.noise();
            *attrs.get_mut(skill) =
                (rating + float_in(rng, -noise, noise)).clamp(SKILL_MIN, SKILL_MAX);
        }
        attrs
    }

    pub fn get(&self, skill: Skill) -> f32 {
        match skill {
            Skill::Passing => self.passing,
            Skill::Finishing => self.finishing,
            Skill::Dribbling => self.dribbling,
            Skill::Technique => self.technique,
            Skill::Vision => self.vision,
            Skill::LongShots => self.long_shots,
            Skill::Strength => self.strength,
            Skill::Balance => self.balance,
            Skill::Agility => self.agility,
            Skill::Composure => self.composure,
            Skill::Stamina => self.stamina,
            Skill::Pace => self.pace,
        }
    }

    fn get_mut(&mut self, skill: Skill) -> &mut f32 {
        match skill {
            Skill::Passing => &mut self.passing,
            Skill::Finishing => &mut self.finishing,
            Skill::Dribbling => &mut self.dribbling,
            Skill::Technique => &mut self.technique,
            Skill::Vision => &mut self.vision,
            Skill::LongShots => &mut self.long_shots,
            Skill::Strength => &mut self.strength,
            Skill::Balance => &mut self.balance,
            Skill::Agility => &mut self.agility,
            Skill::Composure => &mut self.composure,
            Skill::Stamina => &mut self.stamina,
            Skill::Pace => &mut self.pace,
        }
    }
}

// ============================================================================
// Psyche (psychological + condition state)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Psyche {
    /// Preferred tactical mentality (5-15)
    pub mentality: f32,
    /// Familiarity with the assigned role (60-100)
    pub role_familiarity: f32,
    /// How well the player copes with the scoreline (50-100)
    pub resilience: f32,
    /// How strongly the clock pushes the player (0.5-2.0)
    pub urgency: f32,
    /// 0-100
    pub confidence: f32,
    /// 0-30 at creation, unclamped upward
    pub pressure: f32,
    /// 0-100
    pub morale: f32,
    /// 0-150
    pub panic: f32,
    /// 0-100, never decreases during a match
    pub fatigue: f32,
    /// 0-5 baseline
    pub injury_risk: f32,
    /// 6.0-8.0
    pub form: f32,
}

impl Psyche {
    pub fn roll<R: Rng + ?Sized>(rng: &mut R, rating: f32) -> Self {
        Self {
            mentality: int_in(rng, 5, 15) as f32,
            role_familiarity: (rating - 10.0).clamp(60.0, 100.0),
            resilience: (rating - 5.0).clamp(50.0, 100.0),
            urgency: float_in(rng, 0.5, 2.0),
            confidence: (rating - 5.0).clamp(50.0, CONFIDENCE_MAX),
            pressure: float_in(rng, 0.0, 30.0),
            morale: (rating - 10.0).clamp(50.0, MORALE_MAX),
            panic: float_in(rng, 0.0, 20.0),
            fatigue: float_in(rng, 0.0, 5.0),
            injury_risk: float_in(rng, 0.0, 5.0),
            form: float_in(rng, 6.0, 8.0),
        }
    }

    pub fn record_success(&mut self) {
        self.confidence = (self.confidence + 2.0).clamp(0.0, CONFIDENCE_MAX);
        self.morale = (self.morale + 1.0).clamp(0.0, MORALE_MAX);
    }

    pub fn record_failure(&mut self) {
        self.confidence = (self.confidence - 1.5).clamp(0.0, CONFIDENCE_MAX);
        self.panic = (self.panic + 1.0).clamp(0.0, PANIC_MAX);
    }

    /// Negative amounts are ignored; fatigue only accumulates.
    pub fn add_fatigue(&mut self, amount: f32) {
        self.fatigue = (self.fatigue + amount.max(0.0)).clamp(0.0, FATIGUE_MAX);
    }

    pub fn lift_morale(&mut self, amount: f32) {
        self.morale = (self.morale + amount).clamp(0.0, MORALE_MAX);
    }

    pub fn raise_panic(&mut self, amount: f32) {
        self.panic = (self.panic + amount).clamp(0.0, PANIC_MAX);
    }

    /// 1 for a fresh player, 1/3 at full fatigue.
    #[inline]
    pub fn freshness(&self) -> f32 {
        1.0 - self.fatigue / 150.0
    }
}

// ============================================================================
// Match statistics
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchStats {
    pub shots: u16,
    pub passes: u16,
    pub touches: u16,
    pub rating: f32,
    pub xg: f32,
    pub goals: u8,
    pub assists: u8,
}

impl Default for MatchStats {
    fn default() -> Self {
        Self { shots: 0, passes: 0, touches: 0, rating: RATING_START, xg: 0.0, goals: 0, assists: 0 }
    }
}

impl MatchStats {
    pub fn adjust_rating(&mut self, delta: f32) {
        self.rating = (self.rating + delta).clamp(RATING_MIN, RATING_MAX);
    }
}

// ============================================================================
// Player
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub number: u8,
    pub role: Role,
    pub rating: u8,
    pub attributes: Attributes,
    pub psyche: Psyche,
    pub personality: Personality,
    pub stats: MatchStats,
    #[serde(default)]
    pub posture: Posture,
}

impl Player {
    /// Roll a player from a base rating (clamped to 40-99). Personality is
    /// drawn uniformly when not given.
    pub fn create<R: Rng + ?Sized>(
        rng: &mut R,
        name: impl Into<String>,
        rating: u8,
        role: Role,
        personality: Option<Personality>,
    ) -> Self {
        let rating = rating.clamp(SKILL_MIN as u8, SKILL_MAX as u8);
        let base = rating as f32;
        let attributes = Attributes::roll(rng, base);
        let psyche = Psyche::roll(rng, base);
        let personality = match personality {
            Some(p) => p,
            None => Personality::random(rng),
        };
        Self {
            name: name.into(),
            number: 0,
            role,
            rating,
            attributes,
            psyche,
            personality,
            stats: MatchStats::default(),
            posture: Posture::Normal,
        }
    }

    pub fn line(&self) -> Line {
        self.role.line()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rng::seeded;

    #[test]
    fn test_attributes_within_bounds_for_extreme_ratings() {
        let mut rng = seeded(3);
        for rating in [40u8, 60, 99] {
            for _ in 0..50 {
                let p = Player::create(&mut rng, "X", rating, Role::CM, None);
                for skill in Skill::ALL {
                    let v = p.attributes.get(skill);
                    assert!((SKILL_MIN..=SKILL_MAX).contains(&v), "{skill:?}={v}");
                }
            }
        }
    }

    #[test]
    fn test_psyche_ranges() {
        let mut rng = seeded(11);
        for _ in 0..100 {
            let p = Player::create(&mut rng, "X", 80, Role::ST, Some(Personality::Selfish));
            let s = &p.psyche;
            assert!((5.0..=15.0).contains(&s.mentality));
            assert!((60.0..=100.0).contains(&s.role_familiarity));
            assert!((50.0..=100.0).contains(&s.resilience));
            assert!((0.5..2.0).contains(&s.urgency));
            assert!((6.0..8.0).contains(&s.form));
            assert!((0.0..5.0).contains(&s.injury_risk));
            assert_eq!(p.personality, Personality::Selfish);
        }
    }

    #[test]
    fn test_out_of_range_rating_clamped() {
        let mut rng = seeded(1);
        let p = Player::create(&mut rng, "X", 12, Role::GK, None);
        assert_eq!(p.rating, 40);
    }

    #[test]
    fn test_feedback_stays_clamped() {
        let mut rng = seeded(5);
        let mut p = Player::create(&mut rng, "X", 90, Role::CM, None);
        for _ in 0..500 {
            p.psyche.record_success();
            p.psyche.add_fatigue(1.0);
        }
        assert_eq!(p.psyche.confidence, CONFIDENCE_MAX);
        assert_eq!(p.psyche.morale, MORALE_MAX);
        assert_eq!(p.psyche.fatigue, FATIGUE_MAX);
        for _ in 0..500 {
            p.psyche.record_failure();
        }
        assert_eq!(p.psyche.confidence, 0.0);
        assert_eq!(p.psyche.panic, PANIC_MAX);
    }

    #[test]
    fn test_fatigue_never_decreases() {
        let mut rng = seeded(5);
        let mut p = Player::create(&mut rng, "X", 70, Role::CM, None);
        let before = p.psyche.fatigue;
        p.psyche.add_fatigue(-10.0);
        assert_eq!(p.psyche.fatigue, before);
    }

    #[test]
    fn test_rating_clamped() {
        let mut stats = MatchStats::default();
        for _ in 0..20 {
            stats.adjust_rating(0.6);
        }
        assert_eq!(stats.rating, RATING_MAX);
        for _ in 0..100 {
            stats.adjust_rating(-0.3);
        }
        assert_eq!(stats.rating, RATING_MIN);
    }

    #[test]
    fn test_role_lines() {
        assert_eq!(Role::GK.line(), Line::Goalkeeper);
        assert_eq!(Role::LB.line(), Line::Defence);
        assert_eq!(Role::CAM.line(), Line::Midfield);
        assert_eq!(Role::RW.line(), Line::Attack);
    }
}
