use super::*;
use ndarray::Array2;

/// Uniformly random placement that never puts a mine on the first revealed cell.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
    exclude: Coord2,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64, exclude: Coord2) -> Self {
        Self { seed, exclude }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Result<Board> {
        use rand::prelude::*;

        config.validate()?;
        let (size_x, size_y) = config.size;
        if self.exclude.0 >= size_x || self.exclude.1 >= size_y {
            return Err(GameError::InvalidCoords);
        }

        let mut mines: Array2<bool> = Array2::default(config.size.to_nd_index());

        // reserve the excluded cell so it is never picked, released below
        mines[self.exclude.to_nd_index()] = true;
        let mut free_cells = config.total_cells() - 1;
        let mut mines_placed = 0;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        while mines_placed < config.mines {
            if free_cells == 0 {
                break;
            }
            // pick the n-th free cell, skipping the taken ones
            let mut place: CellCount = rng.random_range(0..free_cells);
            for (i, cell) in mines.iter_mut().enumerate() {
                let i = i as CellCount;
                if *cell {
                    place += 1;
                }
                if i == place {
                    *cell = true;
                    mines_placed += 1;
                    free_cells -= 1;
                    break;
                }
            }
        }

        mines[self.exclude.to_nd_index()] = false;

        let board = Board::from_mine_mask(&mines)?;
        if board.mine_count() != config.mines {
            log::warn!(
                "Generated board mine count mismatch, actual: {}, requested: {}",
                board.mine_count(),
                config.mines
            );
        }
        log::debug!(
            "generated {}x{} board with {} mines, first cell {:?}",
            size_x,
            size_y,
            board.mine_count(),
            self.exclude
        );

        Ok(board)
    }
}
