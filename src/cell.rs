use serde::{Deserialize, Serialize};

/// One cell of the playing field.
///
/// `adjacent_mines` is meaningful only for non-mine cells; it stays 0 until
/// mines are placed and is computed once, right after placement.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub is_open: bool,
    pub is_flagged: bool,
    pub adjacent_mines: u8,
}

impl Cell {
    pub const fn is_closed(self) -> bool {
        !self.is_open
    }

    /// Closed and unflagged: the only cells a reveal or flood-fill may open.
    pub const fn is_revealable(self) -> bool {
        !self.is_open && !self.is_flagged
    }
}
