//! Formation registry
//!
//! Six fixed templates, 11 base positions each, on the 0-100 pitch in the home
//! frame (x: width, y: length, own goal at y≈100). Away positions mirror y.

use serde::{Deserialize, Serialize};

use super::squad::SQUAD_SIZE;

pub type Template = [(f32, f32); SQUAD_SIZE];

pub const DEFAULT_FORMATION_ID: &str = "4-4-2";

const F442: Template = [
    (50.0, 92.0),
    (80.0, 76.0),
    (60.0, 70.0),
    (40.0, 70.0),
    (20.0, 76.0),
    (80.0, 52.0),
    (60.0, 47.0),
    (40.0, 47.0),
    (20.0, 52.0),
    (38.0, 27.0),
    (62.0, 27.0),
];
const F433: Template = [
    (50.0, 92.0),
    (80.0, 76.0),
    (60.0, 70.0),
    (40.0, 70.0),
    (20.0, 76.0),
    (65.0, 51.0),
    (50.0, 45.0),
    (35.0, 51.0),
    (20.0, 25.0),
    (50.0, 19.0),
    (80.0, 25.0),
];
const F4231: Template = [
    (50.0, 92.0),
    (80.0, 76.0),
    (60.0, 70.0),
    (40.0, 70.0),
    (20.0, 76.0),
    (65.0, 59.0),
    (35.0, 59.0),
    (78.0, 42.0),
    (50.0, 37.0),
    (22.0, 42.0),
    (50.0, 22.0),
];
const F352: Template = [
    (50.0, 92.0),
    (65.0, 73.0),
    (50.0, 68.0),
    (35.0, 73.0),
    (83.0, 55.0),
    (63.0, 47.0),
    (50.0, 42.0),
    (37.0, 47.0),
    (17.0, 55.0),
    (38.0, 25.0),
    (62.0, 25.0),
];
const F532: Template = [
    (50.0, 92.0),
    (87.0, 70.0),
    (68.0, 76.0),
    (50.0, 79.0),
    (32.0, 76.0),
    (13.0, 70.0),
    (65.0, 51.0),
    (50.0, 45.0),
    (35.0, 51.0),
    (38.0, 25.0),
    (62.0, 25.0),
];
const F343: Template = [
    (50.0, 92.0),
    (65.0, 76.0),
    (50.0, 70.0),
    (35.0, 76.0),
    (80.0, 53.0),
    (60.0, 47.0),
    (40.0, 47.0),
    (20.0, 53.0),
    (20.0, 25.0),
    (50.0, 19.0),
    (80.0, 25.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Formation {
    #[default]
    #[serde(rename = "4-4-2")]
    F442,
    #[serde(rename = "4-3-3")]
    F433,
    #[serde(rename = "4-2-3-1")]
    F4231,
    #[serde(rename = "3-5-2")]
    F352,
    #[serde(rename = "5-3-2")]
    F532,
    #[serde(rename = "3-4-3")]
    F343,
}

impl Formation {
    pub const ALL: [Formation; 6] = [
        Formation::F442,
        Formation::F433,
        Formation::F4231,
        Formation::F352,
        Formation::F532,
        Formation::F343,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Formation::F442 => "4-4-2",
            Formation::F433 => "4-3-3",
            Formation::F4231 => "4-2-3-1",
            Formation::F352 => "3-5-2",
            Formation::F532 => "5-3-2",
            Formation::F343 => "3-4-3",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.id() == id.trim())
    }

    /// Unknown ids fall back to the default formation.
    pub fn resolve(id: &str) -> Self {
        match Self::from_id(id) {
            Some(formation) => formation,
            None => {
                log::warn!("Unknown formation '{}', using {}", id, DEFAULT_FORMATION_ID);
                Self::default()
            }
        }
    }

    pub fn positions(self) -> &'static Template {
        match self {
            Formation::F442 => &F442,
            Formation::F433 => &F433,
            Formation::F4231 => &F4231,
            Formation::F352 => &F352,
            Formation::F532 => &F532,
            Formation::F343 => &F343,
        }
    }
}

/// Template lookup by id, falling back to 4-4-2.
pub fn get_positions(id: &str) -> &'static Template {
    Formation::resolve(id).positions()
}
