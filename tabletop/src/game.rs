use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{ConfigError, Player, PlayerCountRange, PlayerManager, TicTacToe, Tofe, UsageError};

/// The marks handed out to players of symbol-based games, in this order.
pub const SYMBOLS: [char; 8] = ['X', 'O', '△', '□', '◇', '☆', '♡', '♧'];

/// Why a game ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EndReason {
    Win,
    Draw,
    Lose,
    /// Nobody made a move in time.
    Idle,
    /// The driving layer aborted the game.
    Stopped,
    /// The surface the game was shown on is gone.
    Deleted,
}

/// Where a game is in its lifecycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Constructed, but [`Game::initialize()`] has not been called.
    Created,
    Ongoing,
    Ended(EndReason),
}

/// The state every game has: its players and its lifecycle status.
///
/// Concrete games hold one of these and implement [`Game`] on top of it.
#[derive(Clone, Debug)]
pub struct GameBase {
    player_manager: PlayerManager,
    status: GameStatus,
}

impl GameBase {
    /// Validates the player count and, if `require_symbol` is set, hands every
    /// player a distinct symbol from [`SYMBOLS`].
    pub fn new(
        players: Vec<Player>,
        range: PlayerCountRange,
        require_symbol: bool,
    ) -> Result<Self, ConfigError> {
        let mut player_manager = PlayerManager::new(players, range)?;
        if require_symbol {
            let count = player_manager.player_count();
            if count > SYMBOLS.len() {
                return Err(ConfigError::NotEnoughSymbols {
                    players: count,
                    symbols: SYMBOLS.len(),
                });
            }
            for (player, &symbol) in player_manager.players_mut().iter_mut().zip(SYMBOLS.iter()) {
                player.set_symbol(symbol);
            }
        }
        Ok(Self {
            player_manager,
            status: GameStatus::Created,
        })
    }

    pub fn initialize(&mut self) -> Result<(), UsageError> {
        match self.status {
            GameStatus::Created => {
                debug!(players = self.player_manager.player_count(), "Game started");
                self.status = GameStatus::Ongoing;
                Ok(())
            }
            GameStatus::Ongoing => Err(UsageError::AlreadyInitialized),
            GameStatus::Ended(_) => Err(UsageError::GameEnded),
        }
    }

    /// Fails unless the game has been initialized and has not ended yet.
    pub fn ensure_ongoing(&self) -> Result<(), UsageError> {
        match self.status {
            GameStatus::Created => Err(UsageError::NotInitialized),
            GameStatus::Ongoing => Ok(()),
            GameStatus::Ended(_) => Err(UsageError::GameEnded),
        }
    }

    pub fn end(&mut self, reason: EndReason) -> Result<(), UsageError> {
        self.ensure_ongoing()?;
        debug!(?reason, "Game ended");
        self.status = GameStatus::Ended(reason);
        Ok(())
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn player_manager(&self) -> &PlayerManager {
        &self.player_manager
    }

    pub fn player_manager_mut(&mut self) -> &mut PlayerManager {
        &mut self.player_manager
    }
}

/// The capabilities shared by all games.
///
/// Move operations and win conditions differ too much between games to
/// be part of this trait, so they live on the concrete types.
pub trait Game {
    fn base(&self) -> &GameBase;

    fn base_mut(&mut self) -> &mut GameBase;

    /// Allocates the board and starts the game. May be called only once.
    fn initialize(&mut self) -> Result<(), UsageError>;

    fn status(&self) -> GameStatus {
        self.base().status()
    }

    fn end(&mut self, reason: EndReason) -> Result<(), UsageError> {
        self.base_mut().end(reason)
    }

    fn player_manager(&self) -> &PlayerManager {
        self.base().player_manager()
    }

    fn player_manager_mut(&mut self) -> &mut PlayerManager {
        self.base_mut().player_manager_mut()
    }
}

/// All the games this crate implements.
#[derive(Clone, Debug)]
pub enum AnyGame<R: Rng = StdRng> {
    TicTacToe(TicTacToe),
    Tofe(Tofe<R>),
}

impl<R: Rng> Game for AnyGame<R> {
    fn base(&self) -> &GameBase {
        match self {
            AnyGame::TicTacToe(game) => game.base(),
            AnyGame::Tofe(game) => game.base(),
        }
    }

    fn base_mut(&mut self) -> &mut GameBase {
        match self {
            AnyGame::TicTacToe(game) => game.base_mut(),
            AnyGame::Tofe(game) => game.base_mut(),
        }
    }

    fn initialize(&mut self) -> Result<(), UsageError> {
        match self {
            AnyGame::TicTacToe(game) => game.initialize(),
            AnyGame::Tofe(game) => game.initialize(),
        }
    }
}

impl<R: Rng> From<TicTacToe> for AnyGame<R> {
    fn from(game: TicTacToe) -> Self {
        AnyGame::TicTacToe(game)
    }
}

impl<R: Rng> From<Tofe<R>> for AnyGame<R> {
    fn from(game: Tofe<R>) -> Self {
        AnyGame::Tofe(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlayerStatus;

    fn players(n: usize) -> Vec<Player> {
        (0..n)
            .map(|i| Player::new(format!("id{}", i), format!("player {}", i)))
            .collect()
    }

    #[test]
    fn symbols_are_distinct_and_in_order() {
        let base = GameBase::new(players(3), PlayerCountRange::at_least(2), true).unwrap();
        let symbols: Vec<_> = base
            .player_manager()
            .players()
            .iter()
            .map(|p| p.symbol())
            .collect();
        assert_eq!(symbols, vec![Some('X'), Some('O'), Some('△')]);
    }

    #[test]
    fn no_symbols_unless_required() {
        let base = GameBase::new(players(1), PlayerCountRange::exactly(1), false).unwrap();
        assert_eq!(base.player_manager().now_player().symbol(), None);
    }

    #[test]
    fn too_many_players_for_the_alphabet() {
        let err = GameBase::new(players(9), PlayerCountRange::at_least(2), true).unwrap_err();
        assert_eq!(
            err,
            ConfigError::NotEnoughSymbols {
                players: 9,
                symbols: 8
            }
        );
        // Without symbols, any count in range is fine
        assert!(GameBase::new(players(9), PlayerCountRange::at_least(2), false).is_ok());
    }

    #[test]
    fn lifecycle() {
        let mut base = GameBase::new(players(2), PlayerCountRange::at_least(2), true).unwrap();
        assert_eq!(base.status(), GameStatus::Created);
        assert_eq!(base.ensure_ongoing(), Err(UsageError::NotInitialized));
        assert_eq!(base.end(EndReason::Stopped), Err(UsageError::NotInitialized));

        base.initialize().unwrap();
        assert_eq!(base.status(), GameStatus::Ongoing);
        assert_eq!(base.initialize(), Err(UsageError::AlreadyInitialized));
        assert_eq!(base.ensure_ongoing(), Ok(()));

        base.end(EndReason::Win).unwrap();
        assert_eq!(base.status(), GameStatus::Ended(EndReason::Win));
        assert_eq!(base.ensure_ongoing(), Err(UsageError::GameEnded));
        assert_eq!(base.end(EndReason::Draw), Err(UsageError::GameEnded));
        assert_eq!(base.initialize(), Err(UsageError::GameEnded));
    }

    #[test]
    fn any_game_delegates_to_the_variant() {
        let mut game: AnyGame = TicTacToe::new(players(2), 3).unwrap().into();
        assert_eq!(game.status(), GameStatus::Created);
        game.initialize().unwrap();
        assert_eq!(game.status(), GameStatus::Ongoing);
        game.player_manager_mut()
            .now_player_mut()
            .set_status(PlayerStatus::Left);
        assert_eq!(game.player_manager().active_count(), 1);
        game.end(EndReason::Stopped).unwrap();
        match &game {
            AnyGame::TicTacToe(inner) => {
                assert_eq!(inner.status(), GameStatus::Ended(EndReason::Stopped))
            }
            AnyGame::Tofe(_) => panic!("Expected a TicTacToe game"),
        }
    }
}
