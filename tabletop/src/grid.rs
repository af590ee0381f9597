use serde::{Deserialize, Serialize};

use crate::DecodeError;

/// A square board of cells that are either empty or hold a value.
///
/// Stored in row-major order, i.e. indexed by `[row * size + col]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "GridCells<T>",
    bound(deserialize = "T: Copy + Deserialize<'de>")
)]
pub struct Grid<T> {
    size: usize,
    cells: Vec<Option<T>>,
}

// The serialized form of a grid, before its shape is checked.
#[derive(Deserialize)]
struct GridCells<T> {
    size: usize,
    cells: Vec<Option<T>>,
}

impl<T: Copy> TryFrom<GridCells<T>> for Grid<T> {
    type Error = DecodeError;

    fn try_from(raw: GridCells<T>) -> Result<Self, Self::Error> {
        if raw.size.checked_mul(raw.size) != Some(raw.cells.len()) {
            return Err(DecodeError::GridShape {
                size: raw.size,
                cells: raw.cells.len(),
            });
        }
        Ok(Self {
            size: raw.size,
            cells: raw.cells,
        })
    }
}

impl<T: Copy> Grid<T> {
    /// Creates a `size` x `size` grid with every cell empty.
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Creates a grid from its rows. Panics if the rows don't form a square.
    pub fn from_rows(rows: &[Vec<Option<T>>]) -> Self {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            assert_eq!(row.len(), size, "Grid rows must form a square");
            cells.extend_from_slice(row);
        }
        Self { size, cells }
    }

    /// The number of rows (and columns).
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    /// Returns `None` both for empty cells and for coordinates outside of the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if self.in_bounds(row, col) {
            self.cells[row * self.size + col]
        } else {
            None
        }
    }

    /// Panics if the coordinates are out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: Option<T>) {
        assert!(self.in_bounds(row, col));
        self.cells[row * self.size + col] = value;
    }

    /// Like [`Self::get()`], but with signed coordinates for walking in arbitrary directions.
    pub(crate) fn get_signed(&self, row: isize, col: isize) -> Option<T> {
        if row < 0 || col < 0 {
            return None;
        }
        self.get(row as usize, col as usize)
    }

    pub fn is_empty_at(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_none()
    }

    /// Rescans the grid. Games track this incrementally, this is for checking them.
    pub fn count_occupied(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// The coordinates of all empty cells, in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        (0..self.size)
            .flat_map(|row| (0..self.size).map(move |col| (row, col)))
            .filter(|&(row, col)| self.is_empty_at(row, col))
            .collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<T>]> + '_ {
        self.cells.chunks(self.size.max(1))
    }

    pub fn to_rows(&self) -> Vec<Vec<Option<T>>> {
        self.rows().map(|row| row.to_vec()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_grid() {
        let grid = Grid::<u32>::empty(4);
        assert_eq!(grid.size(), 4);
        assert_eq!(grid.count_occupied(), 0);
        assert_eq!(grid.empty_cells().len(), 16);
        assert_eq!(grid.rows().count(), 4);
    }

    #[test]
    fn get_outside_is_none() {
        let mut grid = Grid::empty(2);
        grid.set(1, 1, Some('X'));
        assert_eq!(grid.get(1, 1), Some('X'));
        assert_eq!(grid.get(2, 1), None);
        assert_eq!(grid.get_signed(-1, 1), None);
        assert_eq!(grid.get_signed(1, 1), Some('X'));
        assert_eq!(grid.empty_cells(), vec![(0, 0), (0, 1), (1, 0)]);
    }

    #[test]
    fn deserializing_checks_the_shape() {
        let grid: Grid<u32> =
            serde_json::from_str(r#"{"size":2,"cells":[2,null,null,4]}"#).unwrap();
        assert_eq!(grid.get(1, 1), Some(4));

        let err = serde_json::from_str::<Grid<u32>>(r#"{"size":4,"cells":[2]}"#).unwrap_err();
        assert!(err.to_string().contains("needs 16 cells, but got 1"), "{}", err);
        assert!(serde_json::from_str::<Grid<u32>>(r#"{"size":1,"cells":[]}"#).is_err());
    }

    #[test]
    fn rows_round_trip() {
        let rows = vec![vec![Some(2), None], vec![None, Some(4)]];
        let grid = Grid::from_rows(&rows);
        assert_eq!(grid.get(0, 0), Some(2));
        assert_eq!(grid.get(1, 1), Some(4));
        assert_eq!(grid.count_occupied(), 2);
        assert_eq!(grid.to_rows(), rows);
    }
}
