//! Poker hand classification and Texas Hold'em odds estimation.
//!
//! `core` classifies any five or more cards into the best five card hand
//! and orders hands the way a showdown does. `holdem` deals out the unknown
//! cards over and over to estimate how often a player wins, ties, or loses,
//! and how often each hand type shows up.
//!
//! ```
//! use poker_odds::core::{HandType, Rankable, cards_from_str};
//!
//! let cards = cards_from_str("AdKdQdJdTd9c2h").unwrap();
//! let hand = cards.best_hand().unwrap();
//! assert_eq!(HandType::StraightFlush, hand.hand_type());
//! ```

/// Allow all the core poker functionality to be used
/// externally. Everything in core should be agnostic
/// to poker style.
pub mod core;
/// Allow all the holdem specific code to be used externally.
pub mod holdem;
