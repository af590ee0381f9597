use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{ConfigError, Game, GameBase, Grid, Player, PlayerCountRange, UsageError};

pub const TOFE_BOARD_SIZE: usize = 4;
/// Reaching a tile of this value wins the game.
pub const WIN_MAX_NUMBER: u32 = 2048;

const CELL_COUNT: usize = TOFE_BOARD_SIZE * TOFE_BOARD_SIZE;

/// Which edge the tiles are pushed towards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// How to walk the board for one direction.
///
/// Each of the four lines starts on the target edge at `origin + k * advance`
/// and continues away from the edge in steps of `step`.
struct LineGeometry {
    origin: (isize, isize),
    step: (isize, isize),
    advance: (isize, isize),
}

const LAST: isize = TOFE_BOARD_SIZE as isize - 1;

// Indexed by `Direction as usize`.
const GEOMETRY: [LineGeometry; 4] = [
    // Up
    LineGeometry {
        origin: (0, 0),
        step: (1, 0),
        advance: (0, 1),
    },
    // Down
    LineGeometry {
        origin: (LAST, 0),
        step: (-1, 0),
        advance: (0, 1),
    },
    // Left
    LineGeometry {
        origin: (0, 0),
        step: (0, 1),
        advance: (1, 0),
    },
    // Right
    LineGeometry {
        origin: (0, LAST),
        step: (0, -1),
        advance: (1, 0),
    },
];

type Line = [(usize, usize); TOFE_BOARD_SIZE];

/// The cells of every line for this direction, each ordered from the target edge inwards.
fn lines(direction: Direction) -> [Line; TOFE_BOARD_SIZE] {
    let geometry = &GEOMETRY[direction as usize];
    let mut lines = [[(0, 0); TOFE_BOARD_SIZE]; TOFE_BOARD_SIZE];
    for (a, line) in lines.iter_mut().enumerate() {
        let a = a as isize;
        for (b, cell) in line.iter_mut().enumerate() {
            let b = b as isize;
            let row = geometry.origin.0 + a * geometry.advance.0 + b * geometry.step.0;
            let col = geometry.origin.1 + a * geometry.advance.1 + b * geometry.step.1;
            *cell = (row as usize, col as usize);
        }
    }
    lines
}

/// Slides all tiles towards the target edge, without merging.
fn push(board: &mut Grid<u32>, direction: Direction) -> bool {
    let mut moved = false;
    for line in lines(direction) {
        let mut free = 0;
        for b in 0..TOFE_BOARD_SIZE {
            let (row, col) = line[b];
            if let Some(value) = board.get(row, col) {
                if b != free {
                    let (free_row, free_col) = line[free];
                    board.set(free_row, free_col, Some(value));
                    board.set(row, col, None);
                    moved = true;
                }
                free += 1;
            }
        }
    }
    moved
}

/// Combines equal neighbours, scanning each line from the target edge.
///
/// A tile produced by a merge is never merged again in the same call.
fn merge(
    board: &mut Grid<u32>,
    direction: Direction,
    max_number: &mut u32,
    occupied: &mut usize,
) -> bool {
    let mut merged = false;
    for line in lines(direction) {
        for pair in line.windows(2) {
            let ((row, col), (next_row, next_col)) = (pair[0], pair[1]);
            match (board.get(row, col), board.get(next_row, next_col)) {
                (Some(value), Some(next)) if value == next => {
                    let doubled = value * 2;
                    board.set(row, col, Some(doubled));
                    board.set(next_row, next_col, None);
                    *max_number = (*max_number).max(doubled);
                    *occupied -= 1;
                    merged = true;
                }
                _ => {}
            }
        }
    }
    merged
}

/// The board after moving in `direction`, before a new tile spawns.
///
/// Returns `None` if nothing would move, or if the board is not 4x4. Lets
/// players look ahead without touching the game.
pub fn slide(board: &Grid<u32>, direction: Direction) -> Option<Grid<u32>> {
    if board.size() != TOFE_BOARD_SIZE {
        return None;
    }
    let mut board = board.clone();
    let mut max_number = 1;
    let mut occupied = board.count_occupied();
    let mut moved = push(&mut board, direction);
    moved |= merge(&mut board, direction, &mut max_number, &mut occupied);
    moved |= push(&mut board, direction);
    moved.then_some(board)
}

/// Maps a uniform draw from `[0, 1)` to the exponent of a new tile.
///
/// The draw is raised to the 6th power, so most new tiles are small, and
/// the largest possible tile grows with `max_number` (roughly `max_number / 16`).
/// The result always lies in `[1, max(2, log2(max_number) - 4)]`.
pub fn spawn_exponent(draw: f64, max_number: u32) -> u32 {
    let lo = 1;
    let hi = max_number.max(1).ilog2().saturating_sub(4).max(2);
    let mapped = draw.clamp(0.0, 1.0).powi(6);
    let exponent = (mapped * f64::from(hi - lo + 1)).floor() as u32 + lo;
    exponent.clamp(lo, hi)
}

/// A 2048-style puzzle for a single player.
///
/// The random source for new tiles can be injected with [`Self::with_rng()`].
#[derive(Clone, Debug)]
pub struct Tofe<R: Rng = StdRng> {
    base: GameBase,
    hard_mode: bool,
    /// Allocated by `initialize()`.
    board: Option<Grid<u32>>,
    // The largest tile ever placed, starting at 1. Never decreases.
    max_number: u32,
    // Number of non-empty cells, updated wherever a cell changes.
    occupied: usize,
    rng: R,
}

impl Tofe<StdRng> {
    pub fn new(players: Vec<Player>, hard_mode: bool) -> Result<Self, ConfigError> {
        Self::with_rng(players, hard_mode, StdRng::from_entropy())
    }
}

impl<R: Rng> Tofe<R> {
    pub fn with_rng(players: Vec<Player>, hard_mode: bool, rng: R) -> Result<Self, ConfigError> {
        let base = GameBase::new(players, PlayerCountRange::exactly(1), false)?;
        Ok(Self {
            base,
            hard_mode,
            board: None,
            max_number: 1,
            occupied: 0,
            rng,
        })
    }

    /// Moves all tiles in a direction: push, merge, push again.
    ///
    /// Returns `Ok(false)` if nothing could move, in which case the board is
    /// untouched and no tile is spawned. Otherwise a new tile appears.
    pub fn operate(&mut self, direction: Direction) -> Result<bool, UsageError> {
        self.base.ensure_ongoing()?;
        let board = self.board.as_mut().ok_or(UsageError::NotInitialized)?;
        let mut success = push(board, direction);
        success |= merge(board, direction, &mut self.max_number, &mut self.occupied);
        success |= push(board, direction);
        trace!(?direction, success, "Operated");
        if success {
            self.generate();
        }
        Ok(success)
    }

    pub fn win(&self) -> bool {
        self.max_number >= WIN_MAX_NUMBER
    }

    /// The board is full and no direction can change it anymore.
    pub fn lose(&self) -> bool {
        self.occupied >= CELL_COUNT && !self.operable()
    }

    /// `None` before the game is initialized.
    pub fn board(&self) -> Option<&Grid<u32>> {
        self.board.as_ref()
    }

    pub fn max_number(&self) -> u32 {
        self.max_number
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied
    }

    pub fn hard_mode(&self) -> bool {
        self.hard_mode
    }

    /// Spawns a tile on a random empty cell. Does nothing if the board is full.
    fn generate(&mut self) {
        let Some(board) = self.board.as_mut() else {
            return;
        };
        if self.occupied >= CELL_COUNT {
            return;
        }
        let empty_cells = board.empty_cells();
        debug_assert_eq!(empty_cells.len(), CELL_COUNT - self.occupied);
        let (row, col) = empty_cells[self.rng.gen_range(0..empty_cells.len())];
        let value = 1u32 << spawn_exponent(self.rng.gen::<f64>(), self.max_number);
        board.set(row, col, Some(value));
        self.max_number = self.max_number.max(value);
        self.occupied += 1;
        trace!(row, col, value, "Spawned tile");
    }

    /// Is there any pair of equal neighbours?
    fn operable(&self) -> bool {
        let Some(board) = self.board.as_ref() else {
            return false;
        };
        for i in 0..TOFE_BOARD_SIZE {
            for j in 0..TOFE_BOARD_SIZE - 1 {
                let right = board.get(i, j);
                if right.is_some() && right == board.get(i, j + 1) {
                    return true;
                }
                let down = board.get(j, i);
                if down.is_some() && down == board.get(j + 1, i) {
                    return true;
                }
            }
        }
        false
    }

    // Replaces the board of an initialized game and recomputes the counters.
    #[cfg(test)]
    fn load_rows(&mut self, rows: [[Option<u32>; TOFE_BOARD_SIZE]; TOFE_BOARD_SIZE]) {
        let rows: Vec<Vec<Option<u32>>> = rows.iter().map(|row| row.to_vec()).collect();
        let board = Grid::from_rows(&rows);
        self.occupied = board.count_occupied();
        self.max_number = rows.iter().flatten().flatten().copied().fold(1, u32::max);
        self.board = Some(board);
    }
}

impl<R: Rng> Game for Tofe<R> {
    fn base(&self) -> &GameBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut GameBase {
        &mut self.base
    }

    fn initialize(&mut self) -> Result<(), UsageError> {
        self.base.initialize()?;
        self.board = Some(Grid::empty(TOFE_BOARD_SIZE));
        self.generate();
        self.generate();
        Ok(())
    }
}
