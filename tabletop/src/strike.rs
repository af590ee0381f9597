use crate::Grid;

/// Horizontal, vertical, main diagonal, anti-diagonal.
const AXES: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Does the value just placed at `(row, col)` complete a line of `length` equal values?
///
/// Only lines through the filled cell are checked, since a new line can only
/// appear where the last move was made. This makes it O(`length`) instead of
/// a scan of the whole board.
///
/// When `length` equals the grid size, the only diagonals long enough are the
/// two full-length ones.
pub fn check_strike<T: Copy + PartialEq>(
    grid: &Grid<T>,
    row: usize,
    col: usize,
    length: usize,
) -> bool {
    let Some(value) = grid.get(row, col) else {
        return false;
    };
    AXES.iter().any(|&(d_row, d_col)| {
        let count = 1
            + run_length(grid, row, col, d_row, d_col, value)
            + run_length(grid, row, col, -d_row, -d_col, value);
        count >= length
    })
}

// Number of consecutive cells equal to `value`, starting next to (row, col)
// and walking in direction (d_row, d_col).
fn run_length<T: Copy + PartialEq>(
    grid: &Grid<T>,
    row: usize,
    col: usize,
    d_row: isize,
    d_col: isize,
    value: T,
) -> usize {
    let mut count = 0;
    let mut r = row as isize + d_row;
    let mut c = col as isize + d_col;
    while grid.get_signed(r, c) == Some(value) {
        count += 1;
        r += d_row;
        c += d_col;
    }
    count
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::SymbolGrid;

    fn grid(rows: &[&str]) -> Grid<char> {
        let rows: Vec<Vec<Option<char>>> = rows
            .iter()
            .map(|row| row.chars().map(|c| (c != '.').then_some(c)).collect())
            .collect();
        Grid::from_rows(&rows)
    }

    // Reference implementation: look at every full line of the board.
    fn full_line_through(grid: &Grid<char>, row: usize, col: usize) -> bool {
        let n = grid.size();
        let Some(value) = grid.get(row, col) else {
            return false;
        };
        let same = |cells: Vec<(usize, usize)>| cells.iter().all(|&(r, c)| grid.get(r, c) == Some(value));
        same((0..n).map(|c| (row, c)).collect())
            || same((0..n).map(|r| (r, col)).collect())
            || (row == col && same((0..n).map(|i| (i, i)).collect()))
            || (row + col == n - 1 && same((0..n).map(|i| (i, n - 1 - i)).collect()))
    }

    quickcheck! {
        fn agrees_with_full_line_scan(input: SymbolGrid) -> bool {
            let grid = input.grid;
            let n = grid.size();
            (0..n).all(|row| (0..n).all(|col| {
                check_strike(&grid, row, col, n) == full_line_through(&grid, row, col)
            }))
        }
    }

    #[test]
    fn rows_and_columns() {
        let g = grid(&["XXX", "OO.", "..."]);
        assert!(check_strike(&g, 0, 0, 3));
        assert!(check_strike(&g, 0, 2, 3));
        assert!(!check_strike(&g, 1, 0, 3));

        let g = grid(&["X.O", "X.O", ".XO"]);
        assert!(check_strike(&g, 2, 2, 3));
        assert!(!check_strike(&g, 0, 0, 3));
    }

    #[test]
    fn diagonals() {
        let g = grid(&["X..O", ".XO.", ".OX.", "O..X"]);
        assert!(check_strike(&g, 3, 3, 4));
        assert!(check_strike(&g, 1, 1, 4));
        assert!(check_strike(&g, 0, 3, 4));
        assert!(check_strike(&g, 2, 1, 4));
    }

    #[test]
    fn short_diagonals_do_not_count() {
        let g = grid(&[".X..", "..X.", "...X", "...."]);
        assert!(!check_strike(&g, 2, 3, 4));
        // ...unless the required run is short enough
        assert!(check_strike(&g, 2, 3, 3));
    }

    #[test]
    fn empty_cell_is_never_a_strike() {
        let g = grid(&["...", "...", "..."]);
        assert!(!check_strike(&g, 1, 1, 1));
        assert!(!check_strike(&g, 5, 5, 3));
    }

    #[test]
    fn mixed_symbols_break_the_line() {
        let g = grid(&["XOX", "...", "..."]);
        assert!(!check_strike(&g, 0, 2, 3));
        assert!(check_strike(&g, 0, 2, 1));
    }
}
