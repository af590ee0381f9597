use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use referee::{play_matchup, Bot, BotKind, Config, GameKind, MatchConfig, Recorder};
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Flags given here take precedence over the config file.
#[derive(Parser)]
struct Args {
    /// Path to a JSON file with the match settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Which game to play
    #[arg(short, long, value_enum)]
    game: Option<GameKind>,

    /// How many games to play
    #[arg(short, long)]
    num_games: Option<usize>,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Width and height of the N-in-a-row board
    #[arg(short, long)]
    board_size: Option<usize>,

    /// How many bots take a seat, cycling through the bot kinds
    #[arg(short, long)]
    players: Option<usize>,

    /// The kinds of bots, in seating order
    #[arg(long, value_enum, num_args(1..), value_delimiter = ',')]
    bots: Vec<BotKind>,

    /// Play the puzzle in hard mode
    #[arg(long, default_value_t = false)]
    hard_mode: bool,

    /// Stop the match as soon as one bot makes an illegal move
    #[arg(short, long, default_value_t = false)]
    stop_on_illegal_move: bool,

    /// Record the games' moves as JSON files into this directory
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// Give up on a puzzle game after this many moves
    #[arg(short, long)]
    max_moves: Option<usize>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

impl Args {
    fn into_match_config(self) -> anyhow::Result<MatchConfig> {
        let mut settings = match &self.config {
            Some(path) => MatchConfig::load(path)?,
            None => MatchConfig::default(),
        };
        if let Some(game) = self.game {
            settings.game = game;
        }
        if let Some(num_games) = self.num_games {
            settings.num_games = num_games;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        if let Some(board_size) = self.board_size {
            settings.board_size = board_size;
        }
        if self.players.is_some() {
            settings.players = self.players;
        }
        if !self.bots.is_empty() {
            settings.bots = self.bots;
        }
        settings.hard_mode |= self.hard_mode;
        settings.stop_on_illegal_move |= self.stop_on_illegal_move;
        if self.record_games_to_directory.is_some() {
            settings.record_games_to_directory = self.record_games_to_directory;
        }
        if let Some(max_moves) = self.max_moves {
            settings.max_moves = max_moves;
        }
        Ok(settings)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let settings = args.into_match_config()?;

    // Get a random seed
    let seed = settings.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let recorder = if let Some(dir_path) = &settings.record_games_to_directory {
        Some(Recorder::new(dir_path.clone())?)
    } else {
        None
    };

    let mut bots: Vec<Box<dyn Bot>> = settings
        .lineup()?
        .into_iter()
        .map(|kind| kind.build(&mut rng))
        .collect();

    let mut config = Config { rng, recorder };
    let score = play_matchup(&mut config, &settings, &mut bots)?;
    eprintln!("{}", score.summary(&bots));

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
