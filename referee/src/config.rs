use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tabletop::DEFAULT_BOARD_SIZE;

use crate::bots::BotKind;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    /// N-in-a-row on a square board
    Tictactoe,
    /// The 2048 sliding puzzle, for a single bot
    Tofe,
}

impl GameKind {
    pub fn default_player_count(self) -> usize {
        match self {
            GameKind::Tictactoe => 2,
            GameKind::Tofe => 1,
        }
    }
}

/// The settings of a match, read from a JSON file. Missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchConfig {
    pub game: GameKind,
    pub num_games: usize,
    pub seed: Option<u64>,
    pub board_size: usize,
    /// Defaults to what the game is usually played with.
    pub players: Option<usize>,
    /// Cycled through if there are more players than bots.
    pub bots: Vec<BotKind>,
    pub hard_mode: bool,
    pub stop_on_illegal_move: bool,
    pub record_games_to_directory: Option<PathBuf>,
    pub max_moves: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            game: GameKind::Tictactoe,
            num_games: 100,
            seed: None,
            board_size: DEFAULT_BOARD_SIZE,
            players: None,
            bots: vec![BotKind::Greedy, BotKind::Random],
            hard_mode: false,
            stop_on_illegal_move: false,
            record_games_to_directory: None,
            max_moves: 10_000,
        }
    }
}

impl MatchConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Could not open config file '{}'", path.display()))?;
        let config = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Could not parse config file '{}'", path.display()))?;
        Ok(config)
    }

    /// The bot kind for each seat.
    pub fn lineup(&self) -> anyhow::Result<Vec<BotKind>> {
        if self.bots.is_empty() {
            anyhow::bail!("At least one bot kind is needed");
        }
        let count = self
            .players
            .unwrap_or_else(|| self.game.default_player_count());
        Ok(self.bots.iter().copied().cycle().take(count).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "game": "tofe", "bots": ["random"], "max_moves": 50 }}"#).unwrap();
        let config = MatchConfig::load(file.path()).unwrap();
        assert_eq!(config.game, GameKind::Tofe);
        assert_eq!(config.max_moves, 50);
        assert_eq!(config.num_games, 100);
        assert_eq!(config.lineup().unwrap(), vec![BotKind::Random]);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "num_gmaes": 3 }}"#).unwrap();
        assert!(MatchConfig::load(file.path()).is_err());
        assert!(MatchConfig::load(Path::new("/does/not/exist.json")).is_err());
    }

    #[test]
    fn lineup_cycles_bots() {
        let config = MatchConfig {
            players: Some(3),
            ..MatchConfig::default()
        };
        assert_eq!(
            config.lineup().unwrap(),
            vec![BotKind::Greedy, BotKind::Random, BotKind::Greedy]
        );
        let tofe = MatchConfig {
            game: GameKind::Tofe,
            ..MatchConfig::default()
        };
        assert_eq!(tofe.lineup().unwrap(), vec![BotKind::Greedy]);
        let no_bots = MatchConfig {
            bots: Vec::new(),
            ..MatchConfig::default()
        };
        assert!(no_bots.lineup().is_err());
    }
}
