//! This is the core module. It exports the non-holdem
//! related code.

/// card.rs has rank and suit.
mod card;
/// Re-export Card, Rank, and Suit
pub use self::card::{Card, Rank, Suit, cards_from_str};

/// Error type shared by the whole crate.
mod error;
/// Export `PokerError`
pub use self::error::PokerError;

/// Classified five card hands and their ordering.
mod hand;
/// Export `Hand` and `HandType`
pub use self::hand::{Hand, HandType};

/// Deck is the normal 52 card deck.
mod deck;
/// Export `Deck`
pub use self::deck::Deck;

/// Best five card hand classification.
mod rank;
/// Export the trait and the classifier.
pub use self::rank::{Rankable, best_hand};
