use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tabletop::{check_strike, slide, Direction, Grid};

/// An automated player. The same bot can play every game.
pub trait Bot {
    fn name(&self) -> &str;

    /// Picks the cell to fill, given the board and the symbol of this bot.
    fn choose_cell(&mut self, board: &Grid<char>, symbol: char) -> (usize, usize);

    fn choose_direction(&mut self, board: &Grid<u32>) -> Direction;
}

/// The kinds of bots the referee can field.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotKind {
    Random,
    Greedy,
}

impl BotKind {
    /// Creates a bot whose randomness is derived from `rng`, so that seeded matches can be replayed.
    pub fn build(self, rng: &mut StdRng) -> Box<dyn Bot> {
        let rng = StdRng::seed_from_u64(rng.gen());
        match self {
            BotKind::Random => Box::new(RandomBot { rng }),
            BotKind::Greedy => Box::new(GreedyBot { rng }),
        }
    }
}

/// Plays uniformly random moves. Never plays an illegal cell, but happily
/// pushes tiles in directions where nothing moves.
pub struct RandomBot {
    rng: StdRng,
}

impl Bot for RandomBot {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_cell(&mut self, board: &Grid<char>, _symbol: char) -> (usize, usize) {
        board
            .empty_cells()
            .choose(&mut self.rng)
            .copied()
            .unwrap_or((0, 0))
    }

    fn choose_direction(&mut self, _board: &Grid<u32>) -> Direction {
        *Direction::ALL
            .choose(&mut self.rng)
            .unwrap_or(&Direction::Left)
    }
}

/// Looks one move ahead and takes the best-scoring move, picking randomly among equals.
pub struct GreedyBot {
    rng: StdRng,
}

impl GreedyBot {
    // Completing a line beats blocking one, which beats taking the center.
    fn cell_score(board: &Grid<char>, row: usize, col: usize, symbol: char) -> u32 {
        let size = board.size();
        let completes = |mark: char| {
            let mut scratch = board.clone();
            scratch.set(row, col, Some(mark));
            check_strike(&scratch, row, col, size)
        };
        if completes(symbol) {
            return 3;
        }
        let mut opponents: Vec<char> = board
            .rows()
            .flatten()
            .flatten()
            .copied()
            .filter(|&mark| mark != symbol)
            .collect();
        opponents.sort_unstable();
        opponents.dedup();
        if opponents.into_iter().any(completes) {
            return 2;
        }
        let center = (size - 1) as f32 / 2.0;
        let is_central =
            (row as f32 - center).abs() < 1.0 && (col as f32 - center).abs() < 1.0;
        u32::from(is_central)
    }
}

impl Bot for GreedyBot {
    fn name(&self) -> &str {
        "greedy"
    }

    fn choose_cell(&mut self, board: &Grid<char>, symbol: char) -> (usize, usize) {
        let mut top_choices = Vec::new();
        let mut top_score = 0;
        for (row, col) in board.empty_cells() {
            let score = Self::cell_score(board, row, col, symbol);
            match score.cmp(&top_score) {
                std::cmp::Ordering::Less => {}
                std::cmp::Ordering::Equal => {
                    top_choices.push((row, col));
                }
                std::cmp::Ordering::Greater => {
                    top_choices = vec![(row, col)];
                    top_score = score;
                }
            }
        }
        top_choices
            .choose(&mut self.rng)
            .copied()
            .unwrap_or((0, 0))
    }

    /// Prefers the direction that leaves the most empty cells.
    fn choose_direction(&mut self, board: &Grid<u32>) -> Direction {
        let mut top_choices = Vec::new();
        let mut top_score = 0;
        for direction in Direction::ALL {
            let Some(after) = slide(board, direction) else {
                continue;
            };
            let score = after.empty_cells().len() + 1;
            match score.cmp(&top_score) {
                std::cmp::Ordering::Less => {}
                std::cmp::Ordering::Equal => {
                    top_choices.push(direction);
                }
                std::cmp::Ordering::Greater => {
                    top_choices = vec![direction];
                    top_score = score;
                }
            }
        }
        top_choices
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Direction::Left)
    }
}
