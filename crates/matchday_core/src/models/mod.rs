pub mod action;
pub mod events;
pub mod formation;
pub mod player;
pub mod side;
pub mod squad;

pub use action::Action;
pub use events::{EventKind, HeatSample, MatchEvent, PassEdge, SideTotals, TeamTotals};
pub use formation::{get_positions, Formation, DEFAULT_FORMATION_ID};
pub use player::{Attributes, Line, MatchStats, Personality, Player, Posture, Psyche, Role, Skill};
pub use side::Side;
pub use squad::{RosterEntry, Squad, SquadTemplate, JERSEY_NUMBERS, SLOT_ROLES, SQUAD_SIZE};
