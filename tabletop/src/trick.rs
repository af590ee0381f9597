use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{DecodeError, UsageError};

/// A card of a standard 52-card deck, identified by its index in `0..52`.
///
/// Cards are ordered the way a climbing game ranks them: by [`Rank`] first,
/// then by [`Suit`]. So `index >> 2` is the rank and `index & 3` the suit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Card(u8);

/// The suit of a [card](Card), from lowest to highest.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    #[serde(rename = "♦")]
    Diamond,
    #[serde(rename = "♣")]
    Club,
    #[serde(rename = "♥")]
    Heart,
    #[serde(rename = "♠")]
    Spade,
}

/// The rank of a [card](Card), from lowest to highest. Two is the highest rank.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
    #[serde(rename = "A")]
    Ace,
    #[serde(rename = "2")]
    Two,
}

const RANKS: [Rank; 13] = [
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
    Rank::Two,
];

const SUITS: [Suit; 4] = [Suit::Diamond, Suit::Club, Suit::Heart, Suit::Spade];

impl Card {
    /// Returns `None` for indices outside of `0..52`.
    pub fn from_index(index: u8) -> Option<Self> {
        (index < 52).then_some(Card(index))
    }

    pub fn new(rank: Rank, suit: Suit) -> Self {
        Card(((rank as u8) << 2) | suit as u8)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn rank(self) -> Rank {
        RANKS[usize::from(self.0 >> 2)]
    }

    pub fn suit(self) -> Suit {
        SUITS[usize::from(self.0 & 3)]
    }
}

impl TryFrom<u8> for Card {
    type Error = DecodeError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Card::from_index(index).ok_or(DecodeError::CardIndexOutOfRange(index))
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> u8 {
        card.0
    }
}

impl Rank {
    pub fn as_str(self) -> &'static str {
        match self {
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
            Rank::Two => "2",
        }
    }
}

impl Suit {
    pub fn symbol(self) -> char {
        match self {
            Suit::Diamond => '♦',
            Suit::Club => '♣',
            Suit::Heart => '♥',
            Suit::Spade => '♠',
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank().as_str(), self.suit().symbol())
    }
}

/// The error type for the [`FromStr`] instance of [`Card`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardFromStrErr {
    MissingSuit,
    InvalidRank,
    InvalidSuit,
}

impl FromStr for Card {
    type Err = CardFromStrErr;

    /// Parses the [`Display`](std::fmt::Display) format, e.g. `10♥` or `A♠`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let suit_char = s.chars().last().ok_or(CardFromStrErr::MissingSuit)?;
        let rank_str = &s[..s.len() - suit_char.len_utf8()];
        let rank = RANKS
            .iter()
            .copied()
            .find(|rank| rank.as_str() == rank_str)
            .ok_or(CardFromStrErr::InvalidRank)?;
        let suit = SUITS
            .iter()
            .copied()
            .find(|suit| suit.symbol() == suit_char)
            .ok_or(CardFromStrErr::InvalidSuit)?;
        Ok(Card::new(rank, suit))
    }
}

/// The category of a combination of cards, from lowest to highest.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TrickKind {
    /// Not a valid combination.
    None,
    Single,
    Pair,
    Straight,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

/// A classified combination of cards.
///
/// `card` is the card that decides between two tricks of the same kind,
/// e.g. the highest card of a straight or the rank of the triple in a full house.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trick {
    pub kind: TrickKind,
    pub card: Card,
}

/// The contract between a card-game driver and a trick-based card engine.
///
/// The driver asks the engine to classify the selected cards, checks whether
/// they beat the trick on the table, and then plays or passes. Turn order
/// stays with the game's [`PlayerManager`](crate::PlayerManager).
pub trait TrickEngine {
    /// Classifies a combination of cards. Invalid combinations have kind [`TrickKind::None`].
    fn cards_to_trick(&self, cards: &[Card]) -> Trick;

    /// Can this trick be played on top of the current table?
    fn playable(&self, trick: &Trick) -> bool;

    /// The current player plays these cards from their hand.
    fn play(&mut self, cards: &[Card]) -> Result<(), UsageError>;

    /// The current player passes.
    fn pass(&mut self);

    /// Has the player who played last emptied their hand?
    fn win(&self) -> bool;

    /// The cards of the trick on the table.
    fn current_cards(&self) -> &[Card];

    /// The hand of the player at this index.
    fn hand(&self, player_idx: usize) -> &[Card];
}
