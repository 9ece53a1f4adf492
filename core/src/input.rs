use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Secondary,
    Other,
}

impl PointerButton {
    /// From `MouseEvent.button`: 0 is the main button, 2 the secondary one.
    pub const fn from_dom_button(button: i16) -> Self {
        match button {
            0 => Self::Primary,
            2 => Self::Secondary,
            _ => Self::Other,
        }
    }
}

/// A pointer-down with offsets relative to the drawing surface, in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerInput {
    pub button: PointerButton,
    pub offset_x: f64,
    pub offset_y: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Reveal(Coord2),
    ToggleFlag(Coord2),
}

impl Command {
    pub fn from_pointer(input: PointerInput, geometry: Geometry, size: Coord2) -> Option<Self> {
        let coords = geometry.cell_at(input.offset_x, input.offset_y, size)?;
        match input.button {
            PointerButton::Primary => Some(Self::Reveal(coords)),
            PointerButton::Secondary => Some(Self::ToggleFlag(coords)),
            PointerButton::Other => None,
        }
    }
}

/// Pixel layout of the grid on the drawing surface.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub cell_size: f64,
}

impl Geometry {
    pub const DEFAULT: Self = Self { cell_size: 50.0 };

    pub fn surface_size(self, (x, y): Coord2) -> (u32, u32) {
        let side = |cells: Coord| (f64::from(cells) * self.cell_size) as u32;
        (side(x), side(y))
    }

    pub fn cell_origin(self, (x, y): Coord2) -> (f64, f64) {
        (
            f64::from(x) * self.cell_size,
            f64::from(y) * self.cell_size,
        )
    }

    /// `floor(offset / cell_size)` on both axes, `None` outside the grid.
    pub fn cell_at(self, offset_x: f64, offset_y: f64, size: Coord2) -> Option<Coord2> {
        let axis = |offset: f64, cells: Coord| -> Option<Coord> {
            if offset.is_nan() || offset < 0.0 || self.cell_size <= 0.0 {
                return None;
            }
            // truncation is floor for non-negative values
            let index = (offset / self.cell_size) as u64;
            Coord::try_from(index).ok().filter(|&index| index < cells)
        };
        Some((axis(offset_x, size.0)?, axis(offset_y, size.1)?))
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click(button: PointerButton, offset_x: f64, offset_y: f64) -> PointerInput {
        PointerInput {
            button,
            offset_x,
            offset_y,
        }
    }

    #[test]
    fn offsets_floor_to_cells() {
        let geometry = Geometry::DEFAULT;

        assert_eq!(geometry.cell_at(0.0, 0.0, (9, 9)), Some((0, 0)));
        assert_eq!(geometry.cell_at(49.9, 50.0, (9, 9)), Some((0, 1)));
        assert_eq!(geometry.cell_at(449.0, 10.0, (9, 9)), Some((8, 0)));
    }

    #[test]
    fn offsets_outside_grid_are_ignored() {
        let geometry = Geometry::DEFAULT;

        assert_eq!(geometry.cell_at(450.0, 0.0, (9, 9)), None);
        assert_eq!(geometry.cell_at(-1.0, 0.0, (9, 9)), None);
        assert_eq!(geometry.cell_at(f64::NAN, 0.0, (9, 9)), None);
        assert_eq!(geometry.cell_at(1e12, 0.0, (9, 9)), None);
    }

    #[test]
    fn buttons_map_to_commands() {
        let geometry = Geometry::DEFAULT;
        let primary = click(PointerButton::from_dom_button(0), 120.0, 60.0);
        let secondary = click(PointerButton::from_dom_button(2), 120.0, 60.0);
        let middle = click(PointerButton::from_dom_button(1), 120.0, 60.0);

        assert_eq!(
            Command::from_pointer(primary, geometry, (9, 9)),
            Some(Command::Reveal((2, 1)))
        );
        assert_eq!(
            Command::from_pointer(secondary, geometry, (9, 9)),
            Some(Command::ToggleFlag((2, 1)))
        );
        assert_eq!(Command::from_pointer(middle, geometry, (9, 9)), None);
    }

    #[test]
    fn surface_fits_the_grid() {
        assert_eq!(Geometry::DEFAULT.surface_size((9, 9)), (450, 450));
        assert_eq!(Geometry::DEFAULT.cell_origin((2, 3)), (100.0, 150.0));
    }
}
