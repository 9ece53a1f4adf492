use alloc::string::ToString;

use crate::*;

/// Minimal 2D drawing sink the board is painted onto.
pub trait Surface {
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str);
    fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &str, color: &str);
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Palette {
    pub background: &'static str,
    pub hidden: &'static str,
    pub flagged: &'static str,
    pub visible: &'static str,
    pub mine: &'static str,
    pub text: &'static str,
    pub grid: &'static str,
    pub font: &'static str,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: "gray",
            hidden: "darkgray",
            flagged: "pink",
            visible: "violet",
            mine: "red",
            text: "black",
            grid: "black",
            font: "20px serif",
        }
    }
}

impl Palette {
    pub fn cell_color(&self, cell: Cell) -> &'static str {
        match cell.status() {
            CellStatus::Hidden => self.hidden,
            CellStatus::Flagged => self.flagged,
            CellStatus::Visible if cell.is_mine() => self.mine,
            CellStatus::Visible => self.visible,
        }
    }
}

const GRID_LINE_WIDTH: f64 = 2.0;

/// Draws the whole board: background, one square per cell, the counts of visible cells and the grid lines.
pub fn paint(board: &Board, geometry: Geometry, palette: &Palette, surface: &mut impl Surface) {
    let size = board.size();
    let (width, height) = geometry.surface_size(size);
    let (width, height) = (f64::from(width), f64::from(height));
    let cell_size = geometry.cell_size;

    surface.fill_rect(0.0, 0.0, width, height, palette.background);

    for (coords, cell) in board.iter_cells() {
        let (x, y) = geometry.cell_origin(coords);
        surface.fill_rect(x, y, cell_size, cell_size, palette.cell_color(cell));

        if let (CellStatus::Visible, CellValue::Count(count @ 1..)) = (cell.status(), cell.value()) {
            surface.fill_text(
                &count.to_string(),
                x + cell_size / 2.0 - 5.0,
                y + cell_size / 2.0 + 7.0,
                palette.font,
                palette.text,
            );
        }
    }

    for column in 1..size.0 {
        let (x, _) = geometry.cell_origin((column, 0));
        surface.fill_rect(x, 0.0, GRID_LINE_WIDTH, height, palette.grid);
    }
    for row in 1..size.1 {
        let (_, y) = geometry.cell_origin((0, row));
        surface.fill_rect(0.0, y, width, GRID_LINE_WIDTH, palette.grid);
    }
}
