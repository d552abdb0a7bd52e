use rand::Rng;
use rand::seq::SliceRandom;
use std::slice::Iter;

use super::{Card, PokerError, Rank, Suit};

/// Deck of cards that can be shuffled, drawn from, and have known cards
/// removed.
///
/// A deck never holds the same card twice. Cards are drawn from the top,
/// which is the end of the backing vector.
#[derive(Debug, PartialEq)]
pub struct Deck {
    /// Card storage.
    cards: Vec<Card>,
}

impl Deck {
    /// The number of cards in a full deck.
    pub const SIZE: usize = 52;

    /// Create the default 52 card deck, in rank then suit order.
    ///
    /// ```
    /// use poker_odds::core::Deck;
    ///
    /// assert_eq!(52, Deck::new().len());
    /// ```
    pub fn new() -> Self {
        let mut deck = Self::empty();
        deck.reset();
        deck
    }

    /// Create a deck with no cards in it.
    pub fn empty() -> Self {
        Self {
            cards: Vec::with_capacity(Self::SIZE),
        }
    }

    /// Put all 52 cards back into the deck in their canonical order.
    pub fn reset(&mut self) {
        self.cards.clear();
        for r in Rank::ranks() {
            for s in Suit::suits() {
                self.cards.push(Card::new(r, s));
            }
        }
    }

    /// Randomly shuffle the deck.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng)
    }

    /// Given a card, is it in the current deck?
    pub fn contains(&self, c: &Card) -> bool {
        self.cards.contains(c)
    }

    /// Remove a known card from the deck.
    ///
    /// Removing a card that isn't there means some card was claimed twice,
    /// so it's reported instead of being ignored.
    ///
    /// ```
    /// use poker_odds::core::{Card, Deck, PokerError, Rank, Suit};
    ///
    /// let mut deck = Deck::new();
    /// let ace = Card::new(Rank::Ace, Suit::Heart);
    ///
    /// assert!(deck.remove(&ace).is_ok());
    /// assert_eq!(51, deck.len());
    /// assert_eq!(Err(PokerError::CardIdentityViolation(ace)), deck.remove(&ace));
    /// ```
    pub fn remove(&mut self, c: &Card) -> Result<(), PokerError> {
        let idx = self
            .cards
            .iter()
            .position(|card| card == c)
            .ok_or(PokerError::CardIdentityViolation(*c))?;
        // Keep the order so a shuffled deck stays shuffled the same way.
        self.cards.remove(idx);
        Ok(())
    }

    /// Draw the top card.
    pub fn draw(&mut self) -> Result<Card, PokerError> {
        self.cards.pop().ok_or(PokerError::DeckExhausted)
    }

    /// Draw a card chosen uniformly at random from the cards left.
    ///
    /// This doesn't need the deck to be shuffled first. Repeated calls draw
    /// without replacement.
    pub fn draw_random<R: Rng>(&mut self, rng: &mut R) -> Result<Card, PokerError> {
        if self.cards.is_empty() {
            return Err(PokerError::DeckExhausted);
        }
        let idx = rng.random_range(0..self.cards.len());
        Ok(self.cards.swap_remove(idx))
    }

    /// How many cards are there in the deck.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Have all of the cards been dealt from this deck?
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Get an iterator from this deck
    pub fn iter(&self) -> Iter<'_, Card> {
        self.cards.iter()
    }
}

impl Clone for Deck {
    fn clone(&self) -> Self {
        Self {
            cards: self.cards.clone(),
        }
    }

    // Refilling a deck between trials reuses its buffer.
    fn clone_from(&mut self, source: &Self) {
        self.cards.clone_from(&source.cards);
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn a deck into an iterator
impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::HashSet;

    #[test]
    fn test_new_is_full_and_unique() {
        let d = Deck::new();
        assert_eq!(Deck::SIZE, d.len());
        let unique: HashSet<Card> = d.iter().copied().collect();
        assert_eq!(Deck::SIZE, unique.len());
    }

    #[test]
    fn test_contains_in() {
        let d = Deck::default();
        assert!(d.contains(&Card::new(Rank::Eight, Suit::Heart)));
    }

    #[test]
    fn test_remove() {
        let mut d = Deck::new();
        let c = Card::new(Rank::Ace, Suit::Heart);
        assert!(d.contains(&c));
        assert!(d.remove(&c).is_ok());
        assert!(!d.contains(&c));
        assert_eq!(Err(PokerError::CardIdentityViolation(c)), d.remove(&c));
        assert_eq!(51, d.len());
    }

    #[test]
    fn test_draw_until_empty() {
        let mut d = Deck::new();
        let mut drawn = HashSet::new();
        while !d.is_empty() {
            assert!(drawn.insert(d.draw().unwrap()));
        }
        assert_eq!(Deck::SIZE, drawn.len());
        assert_eq!(Err(PokerError::DeckExhausted), d.draw());
    }

    #[test]
    fn test_draw_random_without_replacement() {
        let mut rng = StdRng::seed_from_u64(420);
        let mut d = Deck::new();
        let mut drawn = HashSet::new();
        for _ in 0..Deck::SIZE {
            assert!(drawn.insert(d.draw_random(&mut rng).unwrap()));
        }
        assert!(d.is_empty());
        assert_eq!(Err(PokerError::DeckExhausted), d.draw_random(&mut rng));
    }

    #[test]
    fn test_reset_after_draws() {
        let mut d = Deck::new();
        d.draw().unwrap();
        d.remove(&Card::new(Rank::Two, Suit::Club)).unwrap();
        d.reset();
        assert_eq!(Deck::new(), d);
    }

    #[test]
    fn test_shuffle_rng() {
        let mut d_one = Deck::new();
        let mut d_two = Deck::new();

        let mut rng_one = StdRng::seed_from_u64(420);
        let mut rng_two = StdRng::seed_from_u64(420);

        d_one.shuffle(&mut rng_one);
        d_two.shuffle(&mut rng_two);

        assert_eq!(d_one, d_two);
        assert_ne!(Deck::new(), d_one);
    }

    #[test]
    fn test_clone_from_refills() {
        let mut full = Deck::new();
        full.remove(&Card::new(Rank::Ace, Suit::Spade)).unwrap();

        let mut d = full.clone();
        d.draw().unwrap();
        d.draw().unwrap();
        d.clone_from(&full);
        assert_eq!(full, d);
        assert_eq!(51, d.len());
    }

    #[test]
    fn test_empty() {
        let mut d = Deck::empty();
        assert!(d.is_empty());
        assert_eq!(Err(PokerError::DeckExhausted), d.draw());
    }
}
