//! Per-cell render codes for an external viewer.

use crate::grid::{Cell, Grid};
use serde::{Deserialize, Serialize};

/// Display code of a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Water,
    Ground,
    Erbast,
    Carviz,
    Both,
}

impl CellView {
    pub fn of(cell: &Cell) -> Self {
        if !cell.is_ground() {
            return CellView::Water;
        }
        match (cell.herd.is_empty(), cell.pride.is_empty()) {
            (false, false) => CellView::Both,
            (false, true) => CellView::Erbast,
            (true, false) => CellView::Carviz,
            (true, true) => CellView::Ground,
        }
    }

    /// Numeric color code used by the viewer palette
    pub fn code(self) -> u8 {
        match self {
            CellView::Water => 5,
            CellView::Ground => 15,
            CellView::Erbast => 25,
            CellView::Carviz => 35,
            CellView::Both => 45,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            5 => Some(CellView::Water),
            15 => Some(CellView::Ground),
            25 => Some(CellView::Erbast),
            35 => Some(CellView::Carviz),
            45 => Some(CellView::Both),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            CellView::Water => '~',
            CellView::Ground => '.',
            CellView::Erbast => 'e',
            CellView::Carviz => 'C',
            CellView::Both => '#',
        }
    }
}

/// Row-major color codes plus population counts
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: usize,
    pub codes: Vec<u8>,
    pub erbast: usize,
    pub carviz: usize,
}

impl Snapshot {
    pub fn from_grid(grid: &Grid) -> Self {
        Self {
            size: grid.size(),
            codes: grid.cells().map(|c| CellView::of(c).code()).collect(),
            erbast: grid.erbast_count(),
            carviz: grid.carviz_count(),
        }
    }

    /// Code at (row, column)
    pub fn code_at(&self, row: usize, column: usize) -> u8 {
        self.codes[row * self.size + column]
    }

    /// Text map, one line per row
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.size * (self.size + 1));
        for (idx, &code) in self.codes.iter().enumerate() {
            out.push(CellView::from_code(code).map_or('?', CellView::symbol));
            if (idx + 1) % self.size == 0 {
                out.push('\n');
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::Species;

    #[test]
    fn test_codes_by_occupancy() {
        let mut grid = Grid::from_fn(3, |row, column| {
            if (row, column) == (0, 0) {
                Cell::water(row, column)
            } else {
                Cell::ground(row, column, 10)
            }
        });
        grid.place(Species::Erbast, (0, 1), 10, 50);
        grid.place(Species::Carviz, (0, 2), 10, 50);
        grid.place(Species::Erbast, (1, 0), 10, 50);
        grid.place(Species::Carviz, (1, 0), 10, 50);

        let snapshot = Snapshot::from_grid(&grid);

        assert_eq!(snapshot.code_at(0, 0), 5);
        assert_eq!(snapshot.code_at(0, 1), 25);
        assert_eq!(snapshot.code_at(0, 2), 35);
        assert_eq!(snapshot.code_at(1, 0), 45);
        assert_eq!(snapshot.code_at(2, 2), 15);
        assert_eq!(snapshot.erbast, 2);
        assert_eq!(snapshot.carviz, 2);
    }

    #[test]
    fn test_render_lines() {
        let mut grid = Grid::uniform(3, 10);
        grid.place(Species::Carviz, (2, 1), 10, 50);
        let snapshot = Snapshot::from_grid(&grid);

        assert_eq!(snapshot.render(), "...\n...\n.C.\n");
    }
}
