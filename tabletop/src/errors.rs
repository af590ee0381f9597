use crate::PlayerCountRange;

/// The error type for constructing a game, i.e. for invalid game options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    PlayerCountOutOfRange {
        count: usize,
        range: PlayerCountRange,
    },
    BoardSizeOutOfRange {
        size: usize,
        min: usize,
        max: usize,
    },
    NotEnoughSymbols {
        players: usize,
        symbols: usize,
    },
}

impl std::error::Error for ConfigError {}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::PlayerCountOutOfRange { count, range } => {
                write!(f, "Player count must be {}, but was {}", range, count)
            }
            ConfigError::BoardSizeOutOfRange { size, min, max } => write!(
                f,
                "The size of the board should be between {} and {}, but was {}",
                min, max, size
            ),
            ConfigError::NotEnoughSymbols { players, symbols } => write!(
                f,
                "Every player needs a distinct symbol, but there are {} players and only {} symbols",
                players, symbols
            ),
        }
    }
}

/// The error type for calling a game operation at the wrong time or with invalid arguments.
///
/// These indicate a bug in the driving layer, not a legitimate game outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    NotInitialized,
    AlreadyInitialized,
    GameEnded,
    CellOutOfBounds { row: usize, col: usize },
    CellOccupied { row: usize, col: usize },
    PlayerWithoutSymbol { player_idx: usize },
}

impl std::error::Error for UsageError {}

impl std::fmt::Display for UsageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UsageError::NotInitialized => write!(f, "The game has not been initialized yet"),
            UsageError::AlreadyInitialized => write!(f, "The game has already been initialized"),
            UsageError::GameEnded => write!(f, "The game has already ended"),
            UsageError::CellOutOfBounds { row, col } => {
                write!(f, "Cell ({}, {}) is outside of the board", row, col)
            }
            UsageError::CellOccupied { row, col } => write!(
                f,
                "Trying to fill cell ({}, {}) that has already been filled",
                row, col
            ),
            UsageError::PlayerWithoutSymbol { player_idx } => {
                write!(f, "Player {} has no symbol assigned", player_idx)
            }
        }
    }
}

/// The error type for deserializing a value that breaks the invariants of its type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    CardIndexOutOfRange(u8),
    GridShape { size: usize, cells: usize },
}

impl std::error::Error for DecodeError {}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::CardIndexOutOfRange(index) => {
                write!(f, "Card index must be below 52, but was {}", index)
            }
            DecodeError::GridShape { size, cells } => write!(
                f,
                "A grid of size {} needs {} cells, but got {}",
                size,
                size * size,
                cells
            ),
        }
    }
}
