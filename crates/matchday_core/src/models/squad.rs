//! Eleven-slot squads built from a roster template.
//!
//! Slot order is fixed (GK, back four, three midfielders, front three) and is
//! the same index used for formation lookups and pass-map edges.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::player::{Line, Personality, Player, Role};
use crate::error::{Result, SimError};

pub const SQUAD_SIZE: usize = 11;

/// Role per slot.
pub const SLOT_ROLES: [Role; SQUAD_SIZE] = [
    Role::GK,
    Role::RB,
    Role::CB,
    Role::CB,
    Role::LB,
    Role::CM,
    Role::CAM,
    Role::CM,
    Role::LW,
    Role::ST,
    Role::RW,
];

/// Shirt number per slot.
pub const JERSEY_NUMBERS: [u8; SQUAD_SIZE] = [1, 2, 5, 6, 3, 8, 10, 7, 11, 9, 18];

// ============================================================================
// Roster input
// ============================================================================

/// One roster line supplied by the squad data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub rating: u8,
    #[serde(default)]
    pub personality: Option<Personality>,
}

impl RosterEntry {
    pub fn new(name: impl Into<String>, rating: u8, personality: Option<Personality>) -> Self {
        Self { name: name.into(), rating, personality }
    }
}

/// Names, ratings and personalities for the eleven slots, in slot order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquadTemplate {
    pub entries: Vec<RosterEntry>,
}

impl SquadTemplate {
    pub fn validate(&self) -> Result<()> {
        if self.entries.len() != SQUAD_SIZE {
            return Err(SimError::InvalidRoster(format!(
                "expected {} players, found {}",
                SQUAD_SIZE,
                self.entries.len()
            )));
        }
        for (slot, entry) in self.entries.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(SimError::InvalidRoster(format!("slot {slot} has an empty name")));
            }
            if !(40..=99).contains(&entry.rating) {
                return Err(SimError::InvalidRoster(format!(
                    "slot {slot} ({}) rating {} outside 40..=99",
                    entry.name, entry.rating
                )));
            }
        }
        Ok(())
    }

    pub fn home_demo() -> Self {
        use Personality::*;
        Self::from_rows(&[
            ("J. Kim", 82, Normal),
            ("M. Park", 76, Normal),
            ("D. Lee", 80, BigMatch),
            ("H. Choi", 78, Normal),
            ("J. Jung", 75, Normal),
            ("I. Hwang", 83, BigMatch),
            ("J. Son", 85, Selfish),
            ("K. Yi", 84, BigMatch),
            ("J. Eom", 79, Nervous),
            ("G. Cho", 81, Selfish),
            ("H. Hwang", 83, BigMatch),
        ])
    }

    pub fn away_demo() -> Self {
        use Personality::*;
        Self::from_rows(&[
            ("Gosse", 80, Normal),
            ("Rivera", 75, Normal),
            ("Marquez", 82, BigMatch),
            ("Ferrari", 79, Normal),
            ("Benteke", 76, Normal),
            ("Vidal", 81, Selfish),
            ("Alonso", 82, Normal),
            ("Caselli", 83, BigMatch),
            ("Pedrosa", 84, BigMatch),
            ("Morales", 80, Selfish),
            ("Leva", 82, Nervous),
        ])
    }

    fn from_rows(rows: &[(&str, u8, Personality)]) -> Self {
        Self {
            entries: rows
                .iter()
                .map(|&(name, rating, personality)| RosterEntry::new(name, rating, Some(personality)))
                .collect(),
        }
    }
}

// ============================================================================
// Squad
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Squad {
    pub players: [Player; SQUAD_SIZE],
}

impl Squad {
    /// Roll a squad from a validated template.
    pub fn from_template<R: Rng + ?Sized>(rng: &mut R, template: &SquadTemplate) -> Result<Self> {
        template.validate()?;
        Ok(Self::build(rng, template))
    }

    pub fn home_demo<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::build(rng, &SquadTemplate::home_demo())
    }

    pub fn away_demo<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::build(rng, &SquadTemplate::away_demo())
    }

    /// Callers validate `template` first.
    pub(crate) fn build<R: Rng + ?Sized>(rng: &mut R, template: &SquadTemplate) -> Self {
        let players = std::array::from_fn(|slot| {
            let entry = &template.entries[slot];
            let mut player = Player::create(
                &mut *rng,
                entry.name.clone(),
                entry.rating,
                SLOT_ROLES[slot],
                entry.personality,
            );
            player.number = JERSEY_NUMBERS[slot];
            player
        });
        Self { players }
    }

    pub fn player(&self, slot: usize) -> &Player {
        &self.players[slot.min(SQUAD_SIZE - 1)]
    }

    pub fn player_mut(&mut self, slot: usize) -> &mut Player {
        &mut self.players[slot.min(SQUAD_SIZE - 1)]
    }

    pub fn goalkeeper_mut(&mut self) -> &mut Player {
        &mut self.players[0]
    }

    /// Slot indices whose role sits in any of `lines`, in slot order.
    pub fn slots_in(&self, lines: &[Line]) -> Vec<usize> {
        self.players
            .iter()
            .enumerate()
            .filter(|(_, p)| lines.contains(&p.line()))
            .map(|(slot, _)| slot)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rng::seeded;
    use crate::models::player::{Skill, SKILL_MAX, SKILL_MIN};

    #[test]
    fn test_demo_squad_matches_template() {
        let mut rng = seeded(42);
        let squad = Squad::home_demo(&mut rng);
        assert_eq!(squad.players.len(), SQUAD_SIZE);
        for (slot, player) in squad.iter().enumerate() {
            assert_eq!(player.role, SLOT_ROLES[slot]);
            assert_eq!(player.number, JERSEY_NUMBERS[slot]);
            assert_eq!(player.stats.shots, 0);
            for skill in Skill::ALL {
                let v = player.attributes.get(skill);
                assert!((SKILL_MIN..=SKILL_MAX).contains(&v));
            }
        }
    }

    #[test]
    fn test_slot_lines() {
        let mut rng = seeded(1);
        let squad = Squad::away_demo(&mut rng);
        assert_eq!(squad.slots_in(&[Line::Goalkeeper]), vec![0]);
        assert_eq!(squad.slots_in(&[Line::Defence]), vec![1, 2, 3, 4]);
        assert_eq!(squad.slots_in(&[Line::Midfield]), vec![5, 6, 7]);
        assert_eq!(squad.slots_in(&[Line::Attack, Line::Midfield]), vec![5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_template_validation() {
        let mut short = SquadTemplate::home_demo();
        short.entries.pop();
        assert!(matches!(short.validate(), Err(SimError::InvalidRoster(_))));

        let mut bad_rating = SquadTemplate::home_demo();
        bad_rating.entries[3].rating = 20;
        assert!(bad_rating.validate().is_err());

        let mut rng = seeded(1);
        assert!(Squad::from_template(&mut rng, &bad_rating).is_err());
        assert!(Squad::from_template(&mut rng, &SquadTemplate::away_demo()).is_ok());
    }

    #[test]
    fn test_template_json_roundtrip_without_personality() {
        let json = r#"[{"name":"A","rating":70},{"name":"B","rating":71,"personality":"SELFISH"}]"#;
        let template: SquadTemplate = serde_json::from_str(json).expect("parse");
        assert_eq!(template.entries[0].personality, None);
        assert_eq!(template.entries[1].personality, Some(Personality::Selfish));
    }
}
