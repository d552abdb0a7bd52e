use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::{Card, Rank};

/// All the different possible hand categories, weakest first.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HandType {
    /// The lowest rank.
    /// No matches
    HighCard,
    /// One Card matches another.
    Pair,
    /// Two diffent pair of matching cards.
    TwoPair,
    /// Three of the same rank.
    ThreeOfAKind,
    /// Five cards in a sequence
    Straight,
    /// Five cards of the same suit
    Flush,
    /// Three of one rank and two of another rank
    FullHouse,
    /// Four of the same rank.
    FourOfAKind,
    /// Five cards in a sequence all of the same suit.
    StraightFlush,
}

impl HandType {
    /// Every hand type, weakest first.
    pub const ALL: [HandType; 9] = [
        HandType::HighCard,
        HandType::Pair,
        HandType::TwoPair,
        HandType::ThreeOfAKind,
        HandType::Straight,
        HandType::Flush,
        HandType::FullHouse,
        HandType::FourOfAKind,
        HandType::StraightFlush,
    ];

    /// Position in `HandType::ALL`, used to index per type counters.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Base of the score band for this type.
    ///
    /// Bands are disjoint and far enough apart that no kicker can lift a
    /// hand into the band above.
    ///
    /// ```
    /// use poker_odds::core::HandType;
    ///
    /// assert_eq!(0, HandType::HighCard.base_score());
    /// assert_eq!(80_000, HandType::StraightFlush.base_score());
    /// ```
    pub const fn base_score(self) -> u32 {
        self as u32 * 10_000
    }
}

impl fmt::Display for HandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandType::HighCard => "High Card",
            HandType::Pair => "Pair",
            HandType::TwoPair => "Two Pair",
            HandType::ThreeOfAKind => "Three of a Kind",
            HandType::Straight => "Straight",
            HandType::Flush => "Flush",
            HandType::FullHouse => "Full House",
            HandType::FourOfAKind => "Four of a Kind",
            HandType::StraightFlush => "Straight Flush",
        };
        f.write_str(name)
    }
}

/// A classified five card hand.
///
/// The cards are in kicker order: the card that matters most for breaking a
/// tie between two hands of the same type comes first. Two hands compare by
/// type and then rank by rank along that order. Suits never matter, so two
/// hands with the same type and ranks are equal even when every suit differs.
///
/// In a wheel (`5 4 3 2 A`) the Ace is last and counts as a one.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hand {
    hand_type: HandType,
    cards: [Card; 5],
}

impl Hand {
    /// Build a hand from a type and cards already in kicker order.
    ///
    /// This doesn't check that the cards make that type, the classifier in
    /// [`crate::core::best_hand`] is the way to get a hand from loose cards.
    pub const fn new(hand_type: HandType, cards: [Card; 5]) -> Self {
        Self { hand_type, cards }
    }

    /// The category of the hand.
    pub const fn hand_type(&self) -> HandType {
        self.hand_type
    }

    /// The five cards in kicker order.
    pub const fn cards(&self) -> &[Card; 5] {
        &self.cards
    }

    /// Rank values in kicker order, the key that ties are broken on.
    ///
    /// ```
    /// use poker_odds::core::{best_hand, cards_from_str};
    ///
    /// let wheel = best_hand(&cards_from_str("Ac2c3c4c5c").unwrap()).unwrap();
    /// assert_eq!([5, 4, 3, 2, 1], wheel.ranks());
    /// ```
    pub fn ranks(&self) -> [u8; 5] {
        let mut ranks = self.cards.map(|c| c.rank.value());
        if self.is_wheel() {
            ranks[4] = 1;
        }
        ranks
    }

    fn is_wheel(&self) -> bool {
        matches!(
            self.hand_type,
            HandType::Straight | HandType::StraightFlush
        ) && self.cards[0].rank == Rank::Five
            && self.cards[4].rank == Rank::Ace
    }
}

impl PartialEq for Hand {
    fn eq(&self, other: &Self) -> bool {
        self.hand_type == other.hand_type && self.ranks() == other.ranks()
    }
}

impl Eq for Hand {}

impl Hash for Hand {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hand_type.hash(state);
        self.ranks().hash(state);
    }
}

impl Ord for Hand {
    fn cmp(&self, other: &Self) -> Ordering {
        self.hand_type
            .base_score()
            .cmp(&other.hand_type.base_score())
            .then_with(|| self.ranks().cmp(&other.ranks()))
    }
}

impl PartialOrd for Hand {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{} {} {} {} {}]",
            self.hand_type,
            self.cards[0],
            self.cards[1],
            self.cards[2],
            self.cards[3],
            self.cards[4]
        )
    }
}
