use ndarray::Array2;

/// Single axis of a board position, also used for widths and heights.
pub type Coord = u8;

/// Count type for mines, flags, and cell totals.
pub type CellCount = u16;

/// Board position as `(row, col)`.
pub type Pos = (Coord, Coord);

/// Cells in a `width x height` grid, saturating at `CellCount::MAX`.
pub const fn cells_in(width: Coord, height: Coord) -> CellCount {
    (width as CellCount).saturating_mul(height as CellCount)
}

pub trait GridIndex {
    fn grid_index(self) -> [usize; 2];
}

impl GridIndex for Pos {
    fn grid_index(self) -> [usize; 2] {
        [self.0.into(), self.1.into()]
    }
}

/// King-move displacements, row-major.
const NEIGHBOR_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

fn offset((row, col): Pos, (dr, dc): (i8, i8), (rows, cols): Pos) -> Option<Pos> {
    let row = row.checked_add_signed(dr)?;
    let col = col.checked_add_signed(dc)?;
    (row < rows && col < cols).then_some((row, col))
}

/// Iterator over the in-bounds king-move neighbors of a position.
///
/// Holds no reference to the grid it was created from, so the grid can be
/// mutated while iterating.
#[derive(Debug)]
pub struct Neighbors {
    center: Pos,
    bounds: Pos,
    cursor: u8,
}

impl Neighbors {
    fn new(center: Pos, bounds: Pos) -> Self {
        Self {
            center,
            bounds,
            cursor: 0,
        }
    }
}

impl Iterator for Neighbors {
    type Item = Pos;

    fn next(&mut self) -> Option<Pos> {
        while usize::from(self.cursor) < NEIGHBOR_OFFSETS.len() {
            let delta = NEIGHBOR_OFFSETS[usize::from(self.cursor)];
            self.cursor += 1;
            if let Some(pos) = offset(self.center, delta, self.bounds) {
                return Some(pos);
            }
        }
        None
    }
}

pub trait GridNeighbors {
    /// Iterate the up-to-8 neighbors of `pos` that fall inside the grid.
    fn neighbors(&self, pos: Pos) -> Neighbors;
}

impl<T> GridNeighbors for Array2<T> {
    fn neighbors(&self, pos: Pos) -> Neighbors {
        let (rows, cols) = self.dim();
        Neighbors::new(pos, (rows.try_into().unwrap(), cols.try_into().unwrap()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_has_three_neighbors() {
        let grid: Array2<u8> = Array2::default((3, 3));
        let neighbors: Vec<Pos> = grid.neighbors((0, 0)).collect();
        assert_eq!(neighbors, vec![(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn interior_has_eight_neighbors() {
        let grid: Array2<u8> = Array2::default((3, 3));
        assert_eq!(grid.neighbors((1, 1)).count(), 8);
    }

    #[test]
    fn edge_clipping_on_non_square_grid() {
        let grid: Array2<u8> = Array2::default((1, 4));
        let neighbors: Vec<Pos> = grid.neighbors((0, 3)).collect();
        assert_eq!(neighbors, vec![(0, 2)]);
    }
}
