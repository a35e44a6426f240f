use std::ops::BitOr;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use difficulty::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use scores::*;
pub use types::*;

mod cell;
mod difficulty;
mod engine;
mod error;
mod generator;
mod scores;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
    /// Defer mine placement to the first reveal, excluding the clicked cell.
    pub safe_first_click: bool,
}

impl BoardConfig {
    pub const fn new_unchecked(
        width: Coord,
        height: Coord,
        mines: CellCount,
        safe_first_click: bool,
    ) -> Self {
        Self {
            width,
            height,
            mines,
            safe_first_click,
        }
    }

    /// Clamps the request into a playable range: at least 1x2 cells, and a
    /// mine count within `1..=cells-1` so at least one safe cell remains.
    pub fn new(width: Coord, height: Coord, mines: CellCount, safe_first_click: bool) -> Self {
        let width = width.max(1);
        let mut height = height.max(1);
        if width == 1 && height == 1 {
            // a playable board needs a mine and a safe cell
            height = 2;
        }
        let mines = mines.clamp(1, cells_in(width, height) - 1);
        Self::new_unchecked(width, height, mines, safe_first_click)
    }

    pub const fn total_cells(&self) -> CellCount {
        cells_in(self.width, self.height)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }

    pub(crate) fn grid_shape(&self) -> (usize, usize) {
        (usize::from(self.height), usize::from(self.width))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Toggled,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Toggled)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Opened,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Merge for chord reveals that touch several neighbors in one call: a mine
/// hit dominates, then a win, then any plain open.
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) | (_, HitMine) => HitMine,
            (Won, _) | (_, Won) => Won,
            (Opened, _) | (_, Opened) => Opened,
            (NoChange, NoChange) => NoChange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_mine_count_is_clamped() {
        let config = BoardConfig::new(3, 3, 50, false);
        assert_eq!(config.mines, 8);
        assert_eq!(config.safe_cells(), 1);
    }

    #[test]
    fn degenerate_dimensions_are_bumped() {
        let config = BoardConfig::new(0, 0, 0, false);
        assert_eq!((config.width, config.height), (1, 2));
        assert_eq!(config.mines, 1);
    }

    #[test]
    fn mine_hit_dominates_merged_outcomes() {
        use RevealOutcome::*;
        assert_eq!(Opened | HitMine, HitMine);
        assert_eq!(Won | Opened, Won);
        assert_eq!(NoChange | NoChange, NoChange);
    }
}
