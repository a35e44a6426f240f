use ndarray::Array2;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{CellCount, Coord, GridIndex, Pos};

/// Seeded mine placement.
///
/// Every layout draw re-arms the seed from the same RNG stream, so
/// consecutive games differ while the whole sequence stays reproducible from
/// the first seed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MineGenerator {
    next_seed: u64,
}

impl MineGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { next_seed: seed }
    }

    /// Mark `mines` distinct cells uniformly at random, never touching
    /// `exclude`. Requests that do not fit the eligible cell set are clamped.
    pub fn layout(
        &mut self,
        width: Coord,
        height: Coord,
        mines: CellCount,
        exclude: Option<Pos>,
    ) -> Array2<bool> {
        let mut rng = SmallRng::seed_from_u64(self.next_seed);
        self.next_seed = rng.random();

        let mut eligible = Vec::with_capacity(usize::from(width) * usize::from(height));
        for row in 0..height {
            for col in 0..width {
                if exclude != Some((row, col)) {
                    eligible.push((row, col));
                }
            }
        }

        let requested = usize::from(mines);
        let amount = requested.min(eligible.len());
        if amount < requested {
            log::warn!("only {amount} of {requested} mines fit the board, placing {amount}");
        }

        let mut mask = Array2::from_elem((usize::from(height), usize::from(width)), false);
        for index in rand::seq::index::sample(&mut rng, eligible.len(), amount) {
            mask[eligible[index].grid_index()] = true;
        }
        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mine_count(mask: &Array2<bool>) -> usize {
        mask.iter().filter(|&&is_mine| is_mine).count()
    }

    #[test]
    fn same_seed_yields_same_layout() {
        let first = MineGenerator::new(9).layout(16, 16, 40, None);
        let second = MineGenerator::new(9).layout(16, 16, 40, None);
        assert_eq!(first, second);
        assert_eq!(mine_count(&first), 40);
    }

    #[test]
    fn consecutive_draws_differ() {
        let mut generator = MineGenerator::new(1);
        let first = generator.layout(30, 16, 99, None);
        let second = generator.layout(30, 16, 99, None);
        assert_ne!(first, second);
        assert_eq!(mine_count(&second), 99);
    }

    #[test]
    fn excluded_cell_is_never_mined() {
        for seed in 0..16 {
            // every eligible cell must carry a mine, except the excluded one
            let mask = MineGenerator::new(seed).layout(5, 5, 24, Some((2, 3)));
            assert!(!mask[[2, 3]]);
            assert_eq!(mine_count(&mask), 24);
        }
    }

    #[test]
    fn oversized_request_is_clamped() {
        let mask = MineGenerator::new(3).layout(3, 3, 200, Some((0, 0)));
        assert!(!mask[[0, 0]]);
        assert_eq!(mine_count(&mask), 8);
    }
}
