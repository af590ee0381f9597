use tracing::trace;

use crate::{
    check_strike, ConfigError, Game, GameBase, Grid, Player, PlayerCountRange, UsageError,
};

pub const MIN_BOARD_SIZE: usize = 2;
pub const MAX_BOARD_SIZE: usize = 5;
pub const DEFAULT_BOARD_SIZE: usize = 3;

/// N in a row on an N x N board, for two or more players.
///
/// The game doesn't advance turns by itself: after [`Self::fill()`], the
/// caller checks [`Self::win()`] and [`Self::draw()`] (in that order) and
/// then calls [`PlayerManager::next()`](crate::PlayerManager::next).
#[derive(Clone, Debug)]
pub struct TicTacToe {
    base: GameBase,
    board_size: usize,
    /// Allocated by `initialize()`.
    board: Option<Grid<char>>,
    // Number of non-empty cells in `board`, kept up to date by `fill()`.
    occupied: usize,
}

impl TicTacToe {
    pub fn new(players: Vec<Player>, board_size: usize) -> Result<Self, ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&board_size) {
            return Err(ConfigError::BoardSizeOutOfRange {
                size: board_size,
                min: MIN_BOARD_SIZE,
                max: MAX_BOARD_SIZE,
            });
        }
        let base = GameBase::new(players, PlayerCountRange::at_least(2), true)?;
        Ok(Self {
            base,
            board_size,
            board: None,
            occupied: 0,
        })
    }

    /// Puts the current player's symbol on a cell.
    ///
    /// Filling a cell twice is an error, cells are never overwritten.
    pub fn fill(&mut self, row: usize, col: usize) -> Result<(), UsageError> {
        self.base.ensure_ongoing()?;
        let player_manager = self.base.player_manager();
        let symbol = player_manager
            .now_player()
            .symbol()
            .ok_or(UsageError::PlayerWithoutSymbol {
                player_idx: player_manager.now_index(),
            })?;
        let board = self.board.as_mut().ok_or(UsageError::NotInitialized)?;
        if !board.in_bounds(row, col) {
            return Err(UsageError::CellOutOfBounds { row, col });
        }
        if !board.is_empty_at(row, col) {
            return Err(UsageError::CellOccupied { row, col });
        }
        board.set(row, col, Some(symbol));
        self.occupied += 1;
        trace!(row, col, %symbol, "Filled cell");
        Ok(())
    }

    /// Does the symbol at `(row, col)`, which should be the cell filled last, complete a line?
    pub fn win(&self, row: usize, col: usize) -> bool {
        self.board
            .as_ref()
            .is_some_and(|board| check_strike(board, row, col, self.board_size))
    }

    /// Is the board full? A full board can still be a win, so check [`Self::win()`] first.
    pub fn draw(&self) -> bool {
        self.occupied == self.board_size * self.board_size
    }

    /// `None` before the game is initialized.
    pub fn board(&self) -> Option<&Grid<char>> {
        self.board.as_ref()
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    pub fn occupied(&self) -> usize {
        self.occupied
    }
}

impl Game for TicTacToe {
    fn base(&self) -> &GameBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut GameBase {
        &mut self.base
    }

    fn initialize(&mut self) -> Result<(), UsageError> {
        self.base.initialize()?;
        self.board = Some(Grid::empty(self.board_size));
        Ok(())
    }
}
