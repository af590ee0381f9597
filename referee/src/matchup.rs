use tracing::{debug, info};

use crate::bots::Bot;
use crate::config::{GameKind, MatchConfig};
use crate::game::{play_tictactoe, play_tofe, GameResult};
use crate::Config;

/// The tally of a series of games.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchScore {
    pub games: usize,
    /// Per bot. For the puzzle, a win means reaching 2048.
    pub wins: Vec<usize>,
    pub illegal_moves: Vec<usize>,
    pub draws: usize,
    pub lost: usize,
    pub stopped: usize,
    /// The highest tile seen in any puzzle game that didn't reach 2048.
    pub best_tile: u32,
}

impl MatchScore {
    fn new(num_bots: usize) -> Self {
        Self {
            wins: vec![0; num_bots],
            illegal_moves: vec![0; num_bots],
            ..Self::default()
        }
    }

    fn tally(&mut self, result: &GameResult) {
        self.games += 1;
        match *result {
            GameResult::WonByPlayer { player_idx } => self.wins[player_idx] += 1,
            GameResult::Draw => self.draws += 1,
            GameResult::Reached2048 { .. } => self.wins[0] += 1,
            GameResult::Lost { max_number } => {
                self.lost += 1;
                self.best_tile = self.best_tile.max(max_number);
            }
            GameResult::Stopped { max_number } => {
                self.stopped += 1;
                self.best_tile = self.best_tile.max(max_number);
            }
            GameResult::IllegalMoveByPlayer { player_idx, .. } => {
                self.illegal_moves[player_idx] += 1
            }
        }
    }

    /// A human-readable summary, one line per bot.
    pub fn summary(&self, bots: &[Box<dyn Bot>]) -> String {
        let mut lines = vec![format!("End result after {} games:", self.games)];
        for (idx, bot) in bots.iter().enumerate() {
            let mut line = format!("- {} wins by bot {} ({})", self.wins[idx], idx, bot.name());
            if self.illegal_moves[idx] > 0 {
                line += &format!(", {} illegal moves", self.illegal_moves[idx]);
            }
            lines.push(line);
        }
        if self.draws > 0 {
            lines.push(format!("- {} draws", self.draws));
        }
        if self.lost > 0 || self.stopped > 0 {
            lines.push(format!(
                "- {} lost, {} stopped, best tile {}",
                self.lost, self.stopped, self.best_tile
            ));
        }
        lines.join("\n")
    }
}

/// Plays `settings.num_games` games between the bots and tallies the results.
///
/// With `stop_on_illegal_move`, the match ends early at the first illegal move.
pub fn play_matchup(
    config: &mut Config,
    settings: &MatchConfig,
    bots: &mut [Box<dyn Bot>],
) -> anyhow::Result<MatchScore> {
    if settings.game == GameKind::Tofe && bots.len() != 1 {
        anyhow::bail!("The puzzle is played by exactly one bot, got {}", bots.len());
    }
    let mut score = MatchScore::new(bots.len());

    for game_idx in 0..settings.num_games {
        let result = match settings.game {
            GameKind::Tictactoe => play_tictactoe(config, bots, settings.board_size)?,
            GameKind::Tofe => {
                play_tofe(config, bots[0].as_mut(), settings.hard_mode, settings.max_moves)?
            }
        };
        score.tally(&result);

        if let GameResult::IllegalMoveByPlayer { player_idx, err } = &result {
            info!(
                bot = bots[*player_idx].name(),
                player_idx, game_idx, "Illegal move by player"
            );
            info!("{}", err);
            if settings.stop_on_illegal_move {
                break;
            }
        } else {
            debug!(game_idx, %result);
        }
    }

    Ok(score)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::bots::BotKind;

    fn config(seed: u64) -> Config {
        Config {
            rng: StdRng::seed_from_u64(seed),
            recorder: None,
        }
    }

    fn bots(settings: &MatchConfig, seed: u64) -> Vec<Box<dyn Bot>> {
        let mut rng = StdRng::seed_from_u64(seed);
        settings
            .lineup()
            .unwrap()
            .into_iter()
            .map(|kind| kind.build(&mut rng))
            .collect()
    }

    #[test]
    fn every_game_is_counted() {
        let settings = MatchConfig {
            num_games: 30,
            ..MatchConfig::default()
        };
        let mut bots = bots(&settings, 1);
        let score = play_matchup(&mut config(1), &settings, &mut bots).unwrap();
        assert_eq!(score.games, 30);
        assert_eq!(score.wins.iter().sum::<usize>() + score.draws, 30);
        assert_eq!(score.illegal_moves, vec![0, 0]);
        // Greedy always completes a line when it can, so random rarely gets far
        assert!(score.wins[0] > score.wins[1]);
        assert!(score.summary(&bots).contains("(greedy)"));
    }

    #[test]
    fn puzzle_games_are_counted() {
        let settings = MatchConfig {
            game: GameKind::Tofe,
            num_games: 3,
            max_moves: 20,
            ..MatchConfig::default()
        };
        let mut bots = bots(&settings, 2);
        let score = play_matchup(&mut config(2), &settings, &mut bots).unwrap();
        assert_eq!(score, MatchScore {
            games: 3,
            wins: vec![0],
            illegal_moves: vec![0],
            stopped: 3,
            best_tile: score.best_tile,
            ..MatchScore::default()
        });
        assert!(score.best_tile >= 4);
        assert!(score.summary(&bots).contains("3 stopped"));
    }

    #[test]
    fn puzzle_needs_exactly_one_bot() {
        let settings = MatchConfig {
            game: GameKind::Tofe,
            players: Some(2),
            ..MatchConfig::default()
        };
        let mut bots = bots(&settings, 3);
        assert!(play_matchup(&mut config(3), &settings, &mut bots).is_err());
    }

    #[test]
    fn tally_counts_illegal_moves() {
        let mut score = MatchScore::new(2);
        score.tally(&GameResult::IllegalMoveByPlayer {
            player_idx: 1,
            err: tabletop::UsageError::CellOccupied { row: 0, col: 0 },
        });
        score.tally(&GameResult::Draw);
        assert_eq!(score.illegal_moves, vec![0, 1]);
        assert_eq!(score.draws, 1);
        assert_eq!(score.games, 2);
    }

    #[test]
    fn matchup_is_reproducible() {
        let settings = MatchConfig {
            num_games: 10,
            board_size: 4,
            ..MatchConfig::default()
        };
        let play = || {
            let mut bots = bots(&settings, 8);
            play_matchup(&mut config(8), &settings, &mut bots).unwrap()
        };
        assert_eq!(play(), play());
    }
}
