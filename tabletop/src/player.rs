use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::ConfigError;

/// What a player is currently doing, as far as the driving layer knows.
///
/// The [`PlayerManager`] never changes a status on its own, except that
/// [`PlayerManager::next()`] skips players who have [left](PlayerStatus::Left).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlayerStatus {
    #[default]
    Waiting,
    Playing,
    Idle,
    /// Terminal. Replaces removing the player from the game.
    Left,
}

/// A participant of one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: String,
    username: String,
    symbol: Option<char>,
    status: PlayerStatus,
    steps: u32,
}

impl Player {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            symbol: None,
            status: PlayerStatus::Waiting,
            steps: 0,
        }
    }

    /// The opaque id the front end knows this player by.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// The mark of this player in symbol-based games.
    pub fn symbol(&self) -> Option<char> {
        self.symbol
    }

    pub(crate) fn set_symbol(&mut self, symbol: char) {
        self.symbol = Some(symbol);
    }

    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    pub fn set_status(&mut self, status: PlayerStatus) {
        self.status = status;
    }

    /// How many moves this player has made so far.
    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn add_step(&mut self) {
        self.steps += 1;
    }
}

/// How many players a game accepts. `max: None` means there is no upper bound.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCountRange {
    pub min: usize,
    pub max: Option<usize>,
}

impl PlayerCountRange {
    pub const fn at_least(min: usize) -> Self {
        Self { min, max: None }
    }

    pub const fn exactly(count: usize) -> Self {
        Self {
            min: count,
            max: Some(count),
        }
    }

    pub const fn between(min: usize, max: usize) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    pub fn contains(&self, count: usize) -> bool {
        count >= self.min && self.max.map_or(true, |max| count <= max)
    }
}

impl std::fmt::Display for PlayerCountRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.max {
            None => write!(f, "at least {}", self.min),
            Some(max) if max == self.min => write!(f, "exactly {}", max),
            Some(max) => write!(f, "between {} and {}", self.min, max),
        }
    }
}

/// Owns the players of a game, in turn order, and knows whose turn it is.
#[derive(Clone, Debug)]
pub struct PlayerManager {
    // Never empty, since every range requires at least one player.
    players: Vec<Player>,
    cursor: usize,
}

impl PlayerManager {
    pub fn new(players: Vec<Player>, range: PlayerCountRange) -> Result<Self, ConfigError> {
        if players.is_empty() || !range.contains(players.len()) {
            return Err(ConfigError::PlayerCountOutOfRange {
                count: players.len(),
                range,
            });
        }
        Ok(Self { players, cursor: 0 })
    }

    pub fn now_player(&self) -> &Player {
        &self.players[self.cursor]
    }

    pub fn now_player_mut(&mut self) -> &mut Player {
        &mut self.players[self.cursor]
    }

    pub fn now_index(&self) -> usize {
        self.cursor
    }

    /// Passes the turn to the next player in insertion order who hasn't left.
    ///
    /// If everybody has left, the cursor simply moves on by one.
    pub fn next(&mut self) -> &Player {
        let count = self.players.len();
        let mut candidate = (self.cursor + 1) % count;
        for _ in 0..count {
            if self.players[candidate].status() != PlayerStatus::Left {
                break;
            }
            candidate = (candidate + 1) % count;
        }
        if self.players[candidate].status() == PlayerStatus::Left {
            candidate = (self.cursor + 1) % count;
        }
        self.cursor = candidate;
        trace!(player = self.players[candidate].username(), "Next turn");
        &self.players[candidate]
    }

    /// The position of the player with this external id, or `None` if they don't take part.
    pub fn get_index(&self, id: &str) -> Option<usize> {
        self.players.iter().position(|player| player.id() == id)
    }

    pub fn player(&self, idx: usize) -> Option<&Player> {
        self.players.get(idx)
    }

    pub fn player_mut(&mut self, idx: usize) -> Option<&mut Player> {
        self.players.get_mut(idx)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub(crate) fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// The number of players who haven't left.
    pub fn active_count(&self) -> usize {
        self.players
            .iter()
            .filter(|player| player.status() != PlayerStatus::Left)
            .count()
    }
}
