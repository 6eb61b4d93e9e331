use serde::{Deserialize, Serialize};

/// Which team. The home side attacks toward y = 0 on the 0-100 pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }

    pub fn is_home(self) -> bool {
        self == Side::Home
    }

    /// Side in possession for a home-possession flag.
    pub fn from_home_flag(home: bool) -> Self {
        if home {
            Side::Home
        } else {
            Side::Away
        }
    }

    /// Mirror a y coordinate into this side's frame (identity for home).
    #[inline]
    pub fn mirror_y(self, y: f32) -> f32 {
        match self {
            Side::Home => y,
            Side::Away => 100.0 - y,
        }
    }
}
