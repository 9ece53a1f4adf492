use serde::{Deserialize, Serialize};

/// What lies under a cell. Fixed once the board is generated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    Mine,
    /// Number of mines among the 8 neighbours.
    Count(u8),
}

impl CellValue {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    /// Compact form where `-1` stands for a mine.
    pub const fn raw(self) -> i8 {
        match self {
            Self::Mine => -1,
            Self::Count(count) => count as i8,
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        Self::Count(0)
    }
}

impl From<CellValue> for i8 {
    fn from(value: CellValue) -> Self {
        value.raw()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellStatus {
    Hidden,
    Visible,
    Flagged,
}

impl Default for CellStatus {
    fn default() -> Self {
        Self::Hidden
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) value: CellValue,
    pub(crate) status: CellStatus,
}

impl Cell {
    pub const fn value(self) -> CellValue {
        self.value
    }

    pub const fn status(self) -> CellStatus {
        self.status
    }

    pub const fn is_mine(self) -> bool {
        self.value.is_mine()
    }

    pub const fn is_hidden(self) -> bool {
        matches!(self.status, CellStatus::Hidden)
    }

    pub const fn is_visible(self) -> bool {
        matches!(self.status, CellStatus::Visible)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self.status, CellStatus::Flagged)
    }
}
