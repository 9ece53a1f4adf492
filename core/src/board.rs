use alloc::vec;
use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Result of revealing a cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    /// Cells that went from hidden to visible.
    Revealed(Vec<Coord2>),
    HitMine(Coord2),
    /// Last safe cells revealed, same payload as `Revealed`.
    Won(Vec<Coord2>),
}

impl RevealOutcome {
    pub const fn has_update(&self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub fn changed_cells(&self) -> &[Coord2] {
        match self {
            Self::NoChange => &[],
            Self::Revealed(changed) | Self::Won(changed) => changed,
            Self::HitMine(coords) => core::slice::from_ref(coords),
        }
    }
}

/// Fixed-size grid of cells together with the number of mines placed on it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl Board {
    /// All hidden, no mines. Used until the first reveal generates the real board.
    pub fn empty(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
            mine_count: 0,
        }
    }

    /// Rejects masks with a side longer than a `Coord` can address.
    pub fn from_mine_mask(mine_mask: &Array2<bool>) -> Result<Self> {
        let (size_x, size_y) = mine_mask.dim();
        let size = (
            Coord::try_from(size_x).map_err(|_| GameError::InvalidSize)?,
            Coord::try_from(size_y).map_err(|_| GameError::InvalidSize)?,
        );
        let mut board = Self::empty(size);

        for ((x, y), &is_mine) in mine_mask.indexed_iter() {
            if is_mine {
                // both fit, the sides were checked above
                board.place_mine((x as Coord, y as Coord));
            }
        }

        Ok(board)
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut board = Self::empty(size);

        for &coords in mine_coords {
            let coords = board.validate_coords(coords)?;
            board.place_mine(coords);
        }

        Ok(board)
    }

    /// Turns `coords` into a mine and bumps the count of every non-mine neighbour.
    fn place_mine(&mut self, coords: Coord2) -> bool {
        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.value.is_mine() {
            return false;
        }
        cell.value = CellValue::Mine;
        self.mine_count += 1;

        for pos in self.iter_neighbors(coords) {
            if let CellValue::Count(count) = &mut self.cells[pos.to_nd_index()].value {
                *count += 1;
            }
        }

        true
    }

    pub fn size(&self) -> Coord2 {
        let (x, y) = self.cells.dim();
        (x as Coord, y as Coord)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        let (x, y) = self.size();
        mult(x, y)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn get(&self, coords: Coord2) -> Option<Cell> {
        self.validate_coords(coords)
            .ok()
            .map(|coords| self.cells[coords.to_nd_index()])
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    /// Cells in row-major order (`y` outer, `x` inner), the order they are painted in.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        let (x_end, y_end) = self.size();
        (0..y_end).flat_map(move |y| (0..x_end).map(move |x| ((x, y), self[(x, y)])))
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self[pos].is_mine())
            .count() as u8
    }

    pub fn visible_safe_count(&self) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| cell.is_visible() && !cell.is_mine())
            .count() as CellCount
    }

    pub fn all_safe_visible(&self) -> bool {
        self.visible_safe_count() == self.safe_cell_count()
    }

    /// Reveals a hidden cell. Zero cells flood outward through their neighbours, stopping at
    /// numbered cells, which are shown, and at mines and flags, which are left alone.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = self[coords];

        if !cell.is_hidden() {
            return Ok(RevealOutcome::NoChange);
        }

        if cell.is_mine() {
            self.cells[coords.to_nd_index()].status = CellStatus::Visible;
            return Ok(RevealOutcome::HitMine(coords));
        }

        let mut changed = Vec::new();
        let mut to_visit = vec![coords];

        while let Some(visit_coords) = to_visit.pop() {
            let cell = &mut self.cells[visit_coords.to_nd_index()];
            // status guard: every cell flips hidden -> visible at most once
            if !cell.is_hidden() || cell.is_mine() {
                continue;
            }
            cell.status = CellStatus::Visible;
            changed.push(visit_coords);

            if cell.value == CellValue::Count(0) {
                to_visit.extend(
                    self.iter_neighbors(visit_coords)
                        .filter(|&pos| self[pos].is_hidden()),
                );
            }
        }

        Ok(RevealOutcome::Revealed(changed))
    }

    /// Flips hidden and flagged. Returns the new status, `None` for visible cells.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<Option<CellStatus>> {
        use CellStatus::*;

        let coords = self.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];

        let next = match cell.status {
            Hidden => Flagged,
            Flagged => Hidden,
            Visible => return Ok(None),
        };
        cell.status = next;

        Ok(Some(next))
    }

    pub fn reveal_all(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.status = CellStatus::Visible;
        }
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
