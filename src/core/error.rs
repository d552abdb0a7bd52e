use thiserror::Error;

use super::Card;

/// This is the core error type for the library.
/// It uses `thiserror` to provide readable error messages.
///
/// Every variant is fatal to the single operation that returned it. Nothing
/// is retried internally and no default result is produced in its place.
#[derive(Error, Debug, Clone, Hash, PartialEq, Eq)]
pub enum PokerError {
    #[error("Unable to parse rank")]
    UnexpectedRankChar,
    #[error("Unable to parse suit")]
    UnexpectedSuitChar,
    #[error("Error reading characters while parsing")]
    TooFewChars,
    #[error("Extra un-used characters found after parsing")]
    UnparsedCharsRemaining,
    #[error("Card {0} appears more than once")]
    DuplicateCard(Card),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Can't draw from an empty deck")]
    DeckExhausted,
    #[error("Card {0} is not in the deck")]
    CardIdentityViolation(Card),
    #[error("A hand needs at least 5 cards, got {0}")]
    MalformedHand(usize),
    #[error("The simulation was stopped before any trial completed")]
    NoTrialsCompleted,
}
