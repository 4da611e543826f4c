use serde::{Deserialize, Serialize};

/// Static cell kind, fixed once generation finishes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Open,
    Wall,
    /// Cell the freezing hazard originates from at tick 0.
    Seed,
}

impl Tile {
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Wall)
    }

    pub const fn is_seed(self) -> bool {
        matches!(self, Self::Seed)
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::Open
    }
}
