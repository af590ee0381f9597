//! Game logic for small turn-based games: the turn management shared by all
//! games, N-in-a-row on a square board, and a 2048-style sliding puzzle.
//!
//! Nothing in here renders or waits for input. A driver constructs a game,
//! calls [`Game::initialize()`] once, and then alternates between a move
//! ([`TicTacToe::fill()`], [`Tofe::operate()`]), the matching queries, and
//! [`PlayerManager::next()`].
pub use errors::*;
pub use game::*;
pub use grid::*;
pub use player::*;
pub use strike::*;
pub use tictactoe::*;
pub use tofe::*;
pub use trick::*;

#[cfg(test)]
mod arbitrary;
mod errors;
mod game;
mod grid;
mod player;
mod strike;
mod tictactoe;
mod tofe;
mod trick;
