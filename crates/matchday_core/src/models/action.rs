use serde::{Deserialize, Serialize};

use super::player::Skill;

/// Closed action set the decision model chooses from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Pass,
    Shoot,
    Dribble,
    Hold,
    Through,
    LongShot,
    Press,
    Run,
}

impl Action {
    /// Fixed scoring order. Softmax output indices follow this order.
    pub const ALL: [Action; 8] = [
        Action::Pass,
        Action::Shoot,
        Action::Dribble,
        Action::Hold,
        Action::Through,
        Action::LongShot,
        Action::Press,
        Action::Run,
    ];

    /// Attribute weights for the base desirability. Each row sums to 1.0.
    pub fn weights(self) -> &'static [(Skill, f32)] {
        use Skill::*;
        match self {
            Action::Pass => &[(Passing, 0.5), (Vision, 0.3), (Technique, 0.2)],
            Action::Shoot => &[(Finishing, 0.5), (LongShots, 0.2), (Technique, 0.3)],
            Action::Dribble => &[(Dribbling, 0.5), (Agility, 0.3), (Technique, 0.2)],
            Action::Hold => &[(Strength, 0.4), (Balance, 0.4), (Composure, 0.2)],
            Action::Through => &[(Vision, 0.5), (Passing, 0.3), (Technique, 0.2)],
            Action::LongShot => &[(LongShots, 0.6), (Technique, 0.2), (Finishing, 0.2)],
            Action::Press => &[(Stamina, 0.5), (Strength, 0.3), (Agility, 0.2)],
            Action::Run => &[(Pace, 0.6), (Stamina, 0.3), (Agility, 0.1)],
        }
    }

    pub fn index(self) -> usize {
        match self {
            Action::Pass => 0,
            Action::Shoot => 1,
            Action::Dribble => 2,
            Action::Hold => 3,
            Action::Through => 4,
            Action::LongShot => 5,
            Action::Press => 6,
            Action::Run => 7,
        }
    }

    pub fn is_shot(self) -> bool {
        matches!(self, Action::Shoot | Action::LongShot)
    }

    pub fn is_pass(self) -> bool {
        matches!(self, Action::Pass | Action::Through)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_rows_sum_to_one() {
        for action in Action::ALL {
            let sum: f32 = action.weights().iter().map(|(_, w)| w).sum();
            assert!((sum - 1.0).abs() < 1e-6, "{action:?} weights sum to {sum}");
        }
    }

    #[test]
    fn test_index_matches_order() {
        for (i, action) in Action::ALL.iter().enumerate() {
            assert_eq!(action.index(), i);
        }
    }
}
