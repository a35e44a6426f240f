use serde::{Deserialize, Serialize};

use crate::{BoardConfig, CellCount, Coord};

/// Standard board sizes, plus free-form custom games.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
    Custom {
        width: Coord,
        height: Coord,
        mines: CellCount,
    },
}

impl Difficulty {
    /// `(width, height, mines)` for this difficulty.
    pub const fn params(self) -> (Coord, Coord, CellCount) {
        match self {
            Self::Beginner => (9, 9, 10),
            Self::Intermediate => (16, 16, 40),
            Self::Expert => (30, 16, 99),
            Self::Custom {
                width,
                height,
                mines,
            } => (width, height, mines),
        }
    }

    pub fn board_config(self, safe_first_click: bool) -> BoardConfig {
        let (width, height, mines) = self.params();
        BoardConfig::new(width, height, mines, safe_first_click)
    }

    /// Stable identifier, used to key best-time records.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Expert => "expert",
            Self::Custom { .. } => "custom",
        }
    }

    pub const fn is_preset(self) -> bool {
        !matches!(self, Self::Custom { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_parameters_match_the_classic_ladder() {
        assert_eq!(Difficulty::Beginner.params(), (9, 9, 10));
        assert_eq!(Difficulty::Intermediate.params(), (16, 16, 40));
        assert_eq!(Difficulty::Expert.params(), (30, 16, 99));
    }

    #[test]
    fn custom_games_clamp_through_board_config() {
        let difficulty = Difficulty::Custom {
            width: 4,
            height: 4,
            mines: 100,
        };
        let config = difficulty.board_config(true);
        assert_eq!(config.mines, 15);
        assert!(config.safe_first_click);
        assert!(!difficulty.is_preset());
    }
}
