use std::fmt;
use std::str::FromStr;

use super::PokerError;

/// Card rank.
///
/// The discriminant is the face value, so a Deuce is 2 and an Ace is 14.
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rank {
    /// 2
    Two = 2,
    /// 3
    Three = 3,
    /// 4
    Four = 4,
    /// 5
    Five = 5,
    /// 6
    Six = 6,
    /// 7
    Seven = 7,
    /// 8
    Eight = 8,
    /// 9
    Nine = 9,
    /// T
    Ten = 10,
    /// J
    Jack = 11,
    /// Q
    Queen = 12,
    /// K
    King = 13,
    /// A
    Ace = 14,
}

/// Constant of all the ranks, lowest first.
/// This is what `Rank::ranks()` returns
const RANKS: [Rank; 13] = [
    Rank::Two,
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
];

impl Rank {
    /// Get all of the `Rank`'s that are possible, lowest first.
    /// This is used to iterate through all possible
    /// ranks when creating a new deck.
    pub const fn ranks() -> [Rank; 13] {
        RANKS
    }

    /// The face value of the rank, 2 through 14.
    ///
    /// ```
    /// use poker_odds::core::Rank;
    ///
    /// assert_eq!(2, Rank::Two.value());
    /// assert_eq!(14, Rank::Ace.value());
    /// ```
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Convert a face value back into a rank.
    pub fn from_value(value: u8) -> Option<Rank> {
        match value {
            2..=14 => Some(RANKS[usize::from(value - 2)]),
            _ => None,
        }
    }

    /// Parse the char used to display a rank.
    pub fn from_char(c: char) -> Option<Rank> {
        match c {
            'A' | 'a' => Some(Rank::Ace),
            'K' | 'k' => Some(Rank::King),
            'Q' | 'q' => Some(Rank::Queen),
            'J' | 'j' => Some(Rank::Jack),
            'T' | 't' => Some(Rank::Ten),
            '9' => Some(Rank::Nine),
            '8' => Some(Rank::Eight),
            '7' => Some(Rank::Seven),
            '6' => Some(Rank::Six),
            '5' => Some(Rank::Five),
            '4' => Some(Rank::Four),
            '3' => Some(Rank::Three),
            '2' => Some(Rank::Two),
            _ => None,
        }
    }

    /// The char used to display a rank.
    pub fn to_char(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Enum for the four different suits.
/// While this has support for ordering it's not
/// sensical. The sorting is only there to allow sorting cards.
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Suit {
    /// Clubs
    Club = 0,
    /// Diamonds
    Diamond = 1,
    /// Hearts
    Heart = 2,
    /// Spades
    Spade = 3,
}

/// All of the `Suit`'s. This is what `Suit::suits()` returns.
const SUITS: [Suit; 4] = [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade];

impl Suit {
    /// Provide all the Suit's that there are.
    pub const fn suits() -> [Suit; 4] {
        SUITS
    }

    /// Parse the char used to display a suit.
    pub fn from_char(s: char) -> Option<Suit> {
        match s {
            'c' | 'C' => Some(Suit::Club),
            'd' | 'D' => Some(Suit::Diamond),
            'h' | 'H' => Some(Suit::Heart),
            's' | 'S' => Some(Suit::Spade),
            _ => None,
        }
    }

    /// The char used to display a suit.
    pub fn to_char(self) -> char {
        match self {
            Suit::Club => 'c',
            Suit::Diamond => 'd',
            Suit::Heart => 'h',
            Suit::Spade => 's',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A playing card: a rank and a suit.
///
/// Two cards are the same card only when both the rank and the suit match.
/// Ordering is by rank first, the suit only breaks ties so cards can be sorted.
#[derive(PartialEq, PartialOrd, Eq, Ord, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    /// The face value of this card.
    pub rank: Rank,
    /// The suit of this card.
    pub suit: Suit,
}

impl Card {
    /// Create a new card
    ///
    /// ```
    /// use poker_odds::core::{Card, Rank, Suit};
    ///
    /// let card = Card::new(Rank::Ace, Suit::Spade);
    /// assert_eq!("As", card.to_string());
    /// ```
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Position of the card in a 0..52 index, unique per card.
    pub(crate) fn index(self) -> usize {
        usize::from(self.rank.value() - 2) * 4 + self.suit as usize
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl FromStr for Card {
    type Err = PokerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let card = parse_card(&mut chars)?;
        if chars.next().is_some() {
            return Err(PokerError::UnparsedCharsRemaining);
        }
        Ok(card)
    }
}

fn parse_card(chars: &mut std::str::Chars<'_>) -> Result<Card, PokerError> {
    let rank = chars.next().ok_or(PokerError::TooFewChars)?;
    let suit = chars.next().ok_or(PokerError::TooFewChars)?;
    let rank = Rank::from_char(rank).ok_or(PokerError::UnexpectedRankChar)?;
    let suit = Suit::from_char(suit).ok_or(PokerError::UnexpectedSuitChar)?;
    Ok(Card::new(rank, suit))
}

/// Parse a run of cards written back to back, like `"AsAcQh"`.
///
/// Whitespace between cards is skipped. The same card twice is an error.
///
/// ```
/// use poker_odds::core::{cards_from_str, Card, Rank, Suit};
///
/// let cards = cards_from_str("AsKd").unwrap();
/// assert_eq!(
///     vec![Card::new(Rank::Ace, Suit::Spade), Card::new(Rank::King, Suit::Diamond)],
///     cards
/// );
///
/// assert!(cards_from_str("AsAs").is_err());
/// ```
pub fn cards_from_str(s: &str) -> Result<Vec<Card>, PokerError> {
    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    let mut chars = compact.chars();
    let mut cards: Vec<Card> = Vec::with_capacity(compact.len() / 2);

    while !chars.as_str().is_empty() {
        let card = parse_card(&mut chars)?;
        if cards.contains(&card) {
            return Err(PokerError::DuplicateCard(card));
        }
        cards.push(card);
    }

    Ok(cards)
}
