use anyhow::Context;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tabletop::{EndReason, Game, Player, PlayerStatus, TicTacToe, Tofe, UsageError};
use tracing::trace;

use crate::bots::Bot;
use crate::recording::{Action, Recorder};
use crate::Config;

#[derive(Debug)]
pub enum GameResult {
    WonByPlayer { player_idx: usize },
    Draw,
    /// The puzzle board filled up with no move left.
    Lost { max_number: u32 },
    Reached2048 { moves: u32 },
    /// The move cap was hit before the puzzle was decided.
    Stopped { max_number: u32 },
    IllegalMoveByPlayer { player_idx: usize, err: UsageError },
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::WonByPlayer { player_idx } => write!(f, "Won by player {}", player_idx),
            GameResult::Draw => write!(f, "Draw"),
            GameResult::Lost { max_number } => write!(f, "Lost with highest tile {}", max_number),
            GameResult::Reached2048 { moves } => write!(f, "Reached 2048 in {} moves", moves),
            GameResult::Stopped { max_number } => {
                write!(f, "Stopped with highest tile {}", max_number)
            }
            GameResult::IllegalMoveByPlayer { player_idx, err } => {
                write!(f, "Illegal move by player {}: {}", player_idx, err)
            }
        }
    }
}

/// Plays one game of N-in-a-row between the bots. The bots take turns in a random order.
///
/// The `player_idx` in the result is the index into `bots`. Returns an error only
/// when the game could not be set up or recorded, not when an illegal move is played.
pub fn play_tictactoe(
    config: &mut Config,
    bots: &mut [Box<dyn Bot>],
    board_size: usize,
) -> anyhow::Result<GameResult> {
    let mut seating: Vec<usize> = (0..bots.len()).collect();
    seating.shuffle(&mut config.rng);

    let players = seating
        .iter()
        .map(|&bot_idx| Player::new(format!("bot{}", bot_idx), bots[bot_idx].name()))
        .collect();
    let mut game = TicTacToe::new(players, board_size)?;
    game.initialize()?;
    for seat in 0..seating.len() {
        if let Some(player) = game.player_manager_mut().player_mut(seat) {
            player.set_status(PlayerStatus::Playing);
        }
    }

    if let Some(recorder) = &mut config.recorder {
        recorder.start_game();
    }
    let result = run_tictactoe(&mut game, bots, &seating, &mut config.recorder)?;
    if let Some(recorder) = &mut config.recorder {
        recorder.write_game_recording(&result)?;
    }
    Ok(result)
}

fn run_tictactoe(
    game: &mut TicTacToe,
    bots: &mut [Box<dyn Bot>],
    seating: &[usize],
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<GameResult> {
    loop {
        let player = game.player_manager().now_player();
        let player_idx = seating[game.player_manager().now_index()];
        let symbol = player
            .symbol()
            .context("Every N-in-a-row player has a symbol")?;
        let board = game.board().context("The board exists after initialize")?;
        let (row, col) = bots[player_idx].choose_cell(board, symbol);
        trace!(player = player.id(), row, col, "Fill");
        if let Some(recorder) = recorder {
            recorder.store_move(player.id(), Action::Fill { row, col });
        }

        if let Err(err) = game.fill(row, col) {
            game.end(EndReason::Stopped)?;
            return Ok(GameResult::IllegalMoveByPlayer { player_idx, err });
        }
        game.player_manager_mut().now_player_mut().add_step();

        if game.win(row, col) {
            game.end(EndReason::Win)?;
            return Ok(GameResult::WonByPlayer { player_idx });
        }
        if game.draw() {
            game.end(EndReason::Draw)?;
            return Ok(GameResult::Draw);
        }
        game.player_manager_mut().next();
    }
}

/// Lets a bot play the sliding puzzle until it wins, loses, or has tried `max_moves` moves.
///
/// The puzzle gets its own rng seeded from the config, so that recorded games can
/// be replayed from the seed.
pub fn play_tofe(
    config: &mut Config,
    bot: &mut dyn Bot,
    hard_mode: bool,
    max_moves: usize,
) -> anyhow::Result<GameResult> {
    let rng = StdRng::seed_from_u64(config.rng.gen());
    let mut game = Tofe::with_rng(vec![Player::new("bot0", bot.name())], hard_mode, rng)?;
    game.initialize()?;
    game.player_manager_mut()
        .now_player_mut()
        .set_status(PlayerStatus::Playing);

    if let Some(recorder) = &mut config.recorder {
        recorder.start_game();
    }
    let result = run_tofe(&mut game, bot, max_moves, &mut config.recorder)?;
    if let Some(recorder) = &mut config.recorder {
        recorder.write_game_recording(&result)?;
    }
    Ok(result)
}

fn run_tofe(
    game: &mut Tofe,
    bot: &mut dyn Bot,
    max_moves: usize,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<GameResult> {
    // Bots may keep choosing directions that don't move anything, so count
    // attempts rather than steps
    let mut attempts = 0;
    loop {
        if game.win() {
            game.end(EndReason::Win)?;
            let moves = game.player_manager().now_player().steps();
            return Ok(GameResult::Reached2048 { moves });
        }
        if game.lose() {
            game.end(EndReason::Lose)?;
            return Ok(GameResult::Lost {
                max_number: game.max_number(),
            });
        }
        if attempts >= max_moves {
            game.end(EndReason::Stopped)?;
            return Ok(GameResult::Stopped {
                max_number: game.max_number(),
            });
        }
        attempts += 1;

        let board = game.board().context("The board exists after initialize")?;
        let direction = bot.choose_direction(board);
        let moved = match game.operate(direction) {
            Ok(moved) => moved,
            Err(err) => {
                game.end(EndReason::Stopped)?;
                return Ok(GameResult::IllegalMoveByPlayer { player_idx: 0, err });
            }
        };
        if let Some(recorder) = recorder {
            let player = game.player_manager().now_player();
            recorder.store_move(player.id(), Action::Operate { direction, moved });
        }
        if moved {
            game.player_manager_mut().now_player_mut().add_step();
        }
        game.player_manager_mut().next();
    }
}
