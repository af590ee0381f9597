use quickcheck::Arbitrary;

use crate::{Direction, Grid, TOFE_BOARD_SIZE};

/// A TicTacToe-like board of any allowed size, with random marks on it.
#[derive(Clone, Debug)]
pub struct SymbolGrid {
    pub grid: Grid<char>,
}

impl quickcheck::Arbitrary for SymbolGrid {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let size = usize::from(u8::arbitrary(g) % 4) + 2;
        let rows: Vec<Vec<Option<char>>> = (0..size)
            .map(|_| {
                (0..size)
                    .map(|_| *g.choose(&[None, Some('X'), Some('O')]).unwrap())
                    .collect()
            })
            .collect();
        SymbolGrid {
            grid: Grid::from_rows(&rows),
        }
    }
}

/// A 4x4 puzzle board with small powers of two on it.
///
/// Values are kept small so that equal neighbours are common.
#[derive(Clone, Debug)]
pub struct TileRows {
    pub rows: [[Option<u32>; TOFE_BOARD_SIZE]; TOFE_BOARD_SIZE],
}

impl quickcheck::Arbitrary for TileRows {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let mut rows = [[None; TOFE_BOARD_SIZE]; TOFE_BOARD_SIZE];
        for row in rows.iter_mut() {
            for cell in row.iter_mut() {
                *cell = *g
                    .choose(&[None, None, Some(2), Some(4), Some(8), Some(16)])
                    .unwrap();
            }
        }
        TileRows { rows }
    }
}

impl quickcheck::Arbitrary for Direction {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&Direction::ALL).unwrap()
    }
}
