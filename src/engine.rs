use std::collections::{HashSet, VecDeque};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Lifecycle of a single game.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardState {
    #[default]
    Ready,
    Active,
    Won,
    Lost,
}

impl BoardState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// The board engine: owns every cell and all state transitions.
///
/// Commands (`reveal`, `toggle_flag`, `reset`) mutate state and report an
/// outcome; everything else is a read-only query. Rejected commands
/// (out-of-bounds targets, moves after the game ended) are no-ops, not
/// errors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    config: BoardConfig,
    grid: Array2<Cell>,
    generator: MineGenerator,
    open_count: CellCount,
    flag_count: CellCount,
    state: BoardState,
    mines_pending: bool,
    triggered_mine: Option<Pos>,
}

impl Board {
    /// Fresh board. Mines go down immediately, or on the first reveal when
    /// the config asks for a safe first click.
    pub fn new(config: BoardConfig, seed: u64) -> Self {
        let mut board = Self {
            grid: Array2::default(config.grid_shape()),
            generator: MineGenerator::new(seed),
            open_count: 0,
            flag_count: 0,
            state: BoardState::default(),
            mines_pending: true,
            triggered_mine: None,
            config,
        };
        if !board.config.safe_first_click {
            board.place_mines(None);
        }
        board
    }

    /// Board with an explicit mine layout, for tests and fixed puzzles.
    ///
    /// Rejects coordinates outside the grid and layouts that leave no safe
    /// cell. An empty layout is allowed.
    pub fn with_mine_coords(width: Coord, height: Coord, mines: &[Pos]) -> Result<Self> {
        let mut grid: Array2<Cell> =
            Array2::default((usize::from(height.max(1)), usize::from(width.max(1))));
        for &(row, col) in mines {
            if row >= height || col >= width {
                return Err(GameError::InvalidCoords);
            }
            grid[(row, col).grid_index()].is_mine = true;
        }

        let mine_count = grid.iter().filter(|cell| cell.is_mine).count() as CellCount;
        if mine_count >= cells_in(width.max(1), height.max(1)) {
            return Err(GameError::TooManyMines);
        }

        let mut board = Self {
            config: BoardConfig::new_unchecked(width.max(1), height.max(1), mine_count, false),
            grid,
            generator: MineGenerator::new(0),
            open_count: 0,
            flag_count: 0,
            state: BoardState::default(),
            mines_pending: false,
            triggered_mine: None,
        };
        board.compute_adjacency();
        Ok(board)
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn game_over(&self) -> bool {
        self.state.is_final()
    }

    pub fn won(&self) -> bool {
        matches!(self.state, BoardState::Won)
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    /// Mines not yet flagged. Never negative: flag supply is capped at the
    /// mine count.
    pub fn remaining_mines(&self) -> CellCount {
        self.config.mines - self.flag_count
    }

    /// Cell snapshot by value, `None` outside the grid.
    pub fn cell_at(&self, pos: Pos) -> Option<Cell> {
        self.grid.get(pos.grid_index()).copied()
    }

    /// The mine that ended a lost game.
    pub fn triggered_mine(&self) -> Option<Pos> {
        self.triggered_mine
    }

    /// Whether revealing this open numbered cell again would chord its
    /// neighbors open.
    pub fn is_chordable(&self, pos: Pos) -> bool {
        if self.state.is_final() {
            return false;
        }
        let Some(cell) = self.cell_at(pos) else {
            return false;
        };
        cell.is_open
            && cell.adjacent_mines > 0
            && self.count_flagged_neighbors(pos) == cell.adjacent_mines
    }

    /// Reveal a cell.
    ///
    /// Revealing an open numbered cell whose flagged neighbors match its
    /// count chords instead: every closed, unflagged neighbor is revealed in
    /// the same call, flood-fill included. The first reveal places the mines
    /// when placement was deferred.
    pub fn reveal(&mut self, pos: Pos) -> RevealOutcome {
        use RevealOutcome::*;

        if !self.in_bounds(pos) || self.state.is_final() {
            return NoChange;
        }

        if self.mines_pending {
            self.place_mines(Some(pos));
        }

        let cell = self.grid[pos.grid_index()];
        if cell.is_open && !cell.is_flagged && cell.adjacent_mines > 0 {
            if self.count_flagged_neighbors(pos) != cell.adjacent_mines {
                return NoChange;
            }
            log::debug!("chord reveal at {pos:?}");
            self.grid
                .neighbors(pos)
                .map(|neighbor| self.open_cell(neighbor))
                .reduce(std::ops::BitOr::bitor)
                .unwrap_or(NoChange)
        } else {
            self.open_cell(pos)
        }
    }

    /// Flag or unflag a closed cell. Flagging is refused once every flag in
    /// the supply (one per mine) is placed.
    pub fn toggle_flag(&mut self, pos: Pos) -> FlagOutcome {
        use FlagOutcome::*;

        if !self.in_bounds(pos) || self.state.is_final() {
            return NoChange;
        }

        let cell = self.grid[pos.grid_index()];
        if cell.is_open {
            return NoChange;
        }

        if cell.is_flagged {
            self.grid[pos.grid_index()].is_flagged = false;
            self.flag_count -= 1;
            Toggled
        } else if self.flag_count < self.config.mines {
            self.grid[pos.grid_index()].is_flagged = true;
            self.flag_count += 1;
            Toggled
        } else {
            log::debug!("flag refused at {pos:?}, all {} flags placed", self.config.mines);
            NoChange
        }
    }

    /// Discard all progress and lay a fresh field with the same config.
    pub fn reset(&mut self) {
        self.grid.fill(Cell::default());
        self.open_count = 0;
        self.flag_count = 0;
        self.state = BoardState::default();
        self.triggered_mine = None;
        self.mines_pending = true;
        if !self.config.safe_first_click {
            self.place_mines(None);
        }
    }

    fn in_bounds(&self, (row, col): Pos) -> bool {
        usize::from(row) < self.grid.nrows() && usize::from(col) < self.grid.ncols()
    }

    fn place_mines(&mut self, exclude: Option<Pos>) {
        let mask = self.generator.layout(
            self.config.width,
            self.config.height,
            self.config.mines,
            exclude,
        );
        for (cell, &is_mine) in self.grid.iter_mut().zip(mask.iter()) {
            cell.is_mine = is_mine;
        }
        self.compute_adjacency();
        self.mines_pending = false;
    }

    /// One pass after placement; the counts stay put for the rest of the
    /// game.
    fn compute_adjacency(&mut self) {
        for row in 0..self.config.height {
            for col in 0..self.config.width {
                let pos = (row, col);
                if self.grid[pos.grid_index()].is_mine {
                    self.grid[pos.grid_index()].adjacent_mines = 0;
                    continue;
                }
                let count = self
                    .grid
                    .neighbors(pos)
                    .filter(|&neighbor| self.grid[neighbor.grid_index()].is_mine)
                    .count() as u8;
                self.grid[pos.grid_index()].adjacent_mines = count;
            }
        }
    }

    fn count_flagged_neighbors(&self, pos: Pos) -> u8 {
        self.grid
            .neighbors(pos)
            .filter(|&neighbor| self.grid[neighbor.grid_index()].is_flagged)
            .count() as u8
    }

    /// Open a single cell, flood-filling from it when it has no adjacent
    /// mines, then evaluate the win condition.
    fn open_cell(&mut self, pos: Pos) -> RevealOutcome {
        use RevealOutcome::*;

        // a chord neighbor revealed after a mine hit must stay closed
        if self.state.is_final() {
            return NoChange;
        }

        let cell = self.grid[pos.grid_index()];
        if cell.is_open || cell.is_flagged {
            return NoChange;
        }

        self.grid[pos.grid_index()].is_open = true;

        if cell.is_mine {
            self.triggered_mine = Some(pos);
            self.state = BoardState::Lost;
            log::debug!("mine hit at {pos:?}");
            return HitMine;
        }

        self.open_count += 1;
        log::trace!("opened {pos:?}, {} adjacent", cell.adjacent_mines);

        if cell.adjacent_mines == 0 {
            self.flood_fill(pos);
        }

        if self.open_count == self.config.safe_cells() {
            self.state = BoardState::Won;
            Won
        } else {
            if self.state.is_ready() {
                self.state = BoardState::Active;
            }
            Opened
        }
    }

    /// Worklist traversal through the zero-count region around `start`.
    /// Every cell is visited at most once; flagged cells and cells with a
    /// positive count stop the fill, so mines are never auto-opened.
    fn flood_fill(&mut self, start: Pos) {
        let mut visited = HashSet::from([start]);
        let mut frontier: VecDeque<Pos> = self
            .grid
            .neighbors(start)
            .filter(|&pos| self.grid[pos.grid_index()].is_revealable())
            .collect();
        log::trace!("flood-fill from {start:?}, {} frontier cells", frontier.len());

        while let Some(pos) = frontier.pop_front() {
            if !visited.insert(pos) {
                continue;
            }

            let cell = self.grid[pos.grid_index()];
            if !cell.is_revealable() {
                continue;
            }

            self.grid[pos.grid_index()].is_open = true;
            self.open_count += 1;

            if cell.adjacent_mines == 0 {
                frontier.extend(
                    self.grid
                        .neighbors(pos)
                        .filter(|&neighbor| self.grid[neighbor.grid_index()].is_revealable())
                        .filter(|neighbor| !visited.contains(neighbor)),
                );
            }
        }
    }
}
