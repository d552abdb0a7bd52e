use super::{Card, Hand, HandType, PokerError};

/// Cards of a hand grouped the ways the category checks need them.
///
/// Every list is ordered highest rank first.
#[derive(Debug)]
struct CardGroups {
    /// All the cards.
    sorted: Vec<Card>,
    /// One group per distinct rank, highest rank group first.
    by_rank: Vec<Vec<Card>>,
    /// One group per suit, indexed by `Suit as usize`.
    by_suit: [Vec<Card>; 4],
}

impl CardGroups {
    fn new(cards: &[Card]) -> Self {
        let mut sorted = cards.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));

        let by_rank = sorted
            .chunk_by(|a, b| a.rank == b.rank)
            .map(|g| g.to_vec())
            .collect();

        let mut by_suit: [Vec<Card>; 4] = Default::default();
        for c in &sorted {
            by_suit[c.suit as usize].push(*c);
        }

        Self {
            sorted,
            by_rank,
            by_suit,
        }
    }

    /// Highest rank group with at least `size` cards, skipping `except`.
    fn group_of(&self, size: usize, except: Option<&[Card]>) -> Option<&[Card]> {
        self.by_rank
            .iter()
            .filter(|g| g.len() >= size)
            .find(|g| except.is_none_or(|e| e[0].rank != g[0].rank))
            .map(|g| g.as_slice())
    }

    /// The highest cards that aren't already part of the hand.
    fn kickers<'a>(&'a self, used: &'a [Card]) -> impl Iterator<Item = Card> + 'a {
        self.sorted.iter().copied().filter(|c| !used.contains(c))
    }

    /// Suits holding five or more cards.
    fn flush_suits(&self) -> impl Iterator<Item = &[Card]> {
        self.by_suit
            .iter()
            .filter(|s| s.len() >= 5)
            .map(|s| s.as_slice())
    }
}

/// Collect exactly five cards, `None` if there aren't enough.
fn five(cards: impl IntoIterator<Item = Card>) -> Option<[Card; 5]> {
    let cards: Vec<Card> = cards.into_iter().take(5).collect();
    cards.try_into().ok()
}

/// Highest five card run in `cards`, highest card first.
///
/// `cards` must be sorted highest rank first. An Ace also plays below the
/// Deuce, so the wheel comes back as `5 4 3 2 A`.
fn highest_straight(cards: &[Card]) -> Option<[Card; 5]> {
    // Slot 1 is the Ace playing low, slots 2..=14 are the face values.
    let mut slots: [Option<Card>; 15] = [None; 15];
    for c in cards {
        let slot = &mut slots[usize::from(c.rank.value())];
        if slot.is_none() {
            *slot = Some(*c);
        }
    }
    slots[1] = slots[14];

    (5..=14).rev().find_map(|high| {
        let run: Option<Vec<Card>> = (0..5).map(|i| slots[high - i]).collect();
        run.and_then(|r| r.try_into().ok())
    })
}

impl HandType {
    /// Check whether `groups` holds a hand of this type.
    ///
    /// Returns the best hand of this type that can be made, with the cards in
    /// kicker order, or `None` when the cards can't make this type at all.
    fn evaluate(self, groups: &CardGroups) -> Option<Hand> {
        let cards = match self {
            HandType::StraightFlush => {
                return groups
                    .flush_suits()
                    .filter_map(highest_straight)
                    .map(|c| Hand::new(self, c))
                    .max();
            }
            HandType::FourOfAKind => {
                let quads = &groups.group_of(4, None)?[..4];
                five(quads.iter().copied().chain(groups.kickers(quads)))?
            }
            HandType::FullHouse => {
                let trips = groups.group_of(3, None)?;
                let pair = groups.group_of(2, Some(trips))?;
                five(trips[..3].iter().chain(&pair[..2]).copied())?
            }
            HandType::Flush => {
                return groups
                    .flush_suits()
                    .filter_map(|s| five(s.iter().copied()))
                    .map(|c| Hand::new(self, c))
                    .max();
            }
            HandType::Straight => highest_straight(&groups.sorted)?,
            HandType::ThreeOfAKind => {
                let trips = &groups.group_of(3, None)?[..3];
                five(trips.iter().copied().chain(groups.kickers(trips)))?
            }
            HandType::TwoPair => {
                let high = groups.group_of(2, None)?;
                let low = groups.group_of(2, Some(high))?;
                let pairs = [high[0], high[1], low[0], low[1]];
                five(pairs.iter().copied().chain(groups.kickers(&pairs)))?
            }
            HandType::Pair => {
                let pair = &groups.group_of(2, None)?[..2];
                five(pair.iter().copied().chain(groups.kickers(pair)))?
            }
            HandType::HighCard => five(groups.sorted.iter().copied())?,
        };
        Some(Hand::new(self, cards))
    }
}

/// Find the best five card hand that can be made from `cards`.
///
/// Any number of distinct cards from five up works; Hold'em hands have
/// five to seven. Every category is checked from the strongest down and the
/// first one that matches is returned, with its cards in kicker order.
///
/// # Errors
///
/// `MalformedHand` with fewer than five cards and `DuplicateCard` when a
/// card is given twice.
///
/// # Examples
///
/// ```
/// use poker_odds::core::{best_hand, cards_from_str, HandType, Rank};
///
/// let cards = cards_from_str("QhQcQd3s3hAsAc").unwrap();
/// let hand = best_hand(&cards).unwrap();
///
/// assert_eq!(HandType::FullHouse, hand.hand_type());
/// assert_eq!(Rank::Queen, hand.cards()[0].rank);
/// assert_eq!(Rank::Ace, hand.cards()[4].rank);
/// ```
pub fn best_hand(cards: &[Card]) -> Result<Hand, PokerError> {
    if cards.len() < 5 {
        return Err(PokerError::MalformedHand(cards.len()));
    }

    let mut seen: u64 = 0;
    for c in cards {
        let bit = 1u64 << c.index();
        if seen & bit != 0 {
            return Err(PokerError::DuplicateCard(*c));
        }
        seen |= bit;
    }

    let groups = CardGroups::new(cards);
    HandType::ALL
        .iter()
        .rev()
        .find_map(|t| t.evaluate(&groups))
        .ok_or(PokerError::MalformedHand(cards.len()))
}

/// Can this turn into a hand?
pub trait Rankable {
    /// Best five card hand out of these cards. See [`best_hand`].
    fn best_hand(&self) -> Result<Hand, PokerError>;
}

impl Rankable for [Card] {
    fn best_hand(&self) -> Result<Hand, PokerError> {
        best_hand(self)
    }
}

impl Rankable for Vec<Card> {
    fn best_hand(&self) -> Result<Hand, PokerError> {
        best_hand(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Deck, Rank, Suit, cards_from_str};
    use rand::{SeedableRng, rngs::StdRng};

    fn rank(s: &str) -> Hand {
        cards_from_str(s).unwrap().best_hand().unwrap()
    }

    fn ranks_of(h: &Hand) -> Vec<Rank> {
        h.cards().iter().map(|c| c.rank).collect()
    }

    #[test]
    fn test_high_card_hand() {
        let h = rank("Ad8h9cTc5c");
        assert_eq!(HandType::HighCard, h.hand_type());
        assert_eq!(
            vec![Rank::Ace, Rank::Ten, Rank::Nine, Rank::Eight, Rank::Five],
            ranks_of(&h)
        );
    }

    #[test]
    fn test_high_card_from_seven() {
        let h = rank("2d8h9cTc5cKs3h");
        assert_eq!(HandType::HighCard, h.hand_type());
        assert_eq!([13, 10, 9, 8, 5], h.ranks());
    }

    #[test]
    fn test_flush() {
        let h = rank("Ad8d9dTd5d");
        assert_eq!(HandType::Flush, h.hand_type());
        assert_eq!([14, 10, 9, 8, 5], h.ranks());
    }

    #[test]
    fn test_flush_takes_top_five_of_suit() {
        let h = rank("2h8h9hKh5hJh3c");
        assert_eq!(HandType::Flush, h.hand_type());
        assert_eq!([13, 11, 9, 8, 5], h.ranks());
        assert!(h.cards().iter().all(|c| c.suit == Suit::Heart));
    }

    #[test]
    fn test_full_house() {
        let h = rank("AdAc9d9c9s");
        assert_eq!(HandType::FullHouse, h.hand_type());
        assert_eq!([9, 9, 9, 14, 14], h.ranks());
    }

    #[test]
    fn test_full_house_picks_highest_trips_and_pair() {
        let h = rank("QhQcQd3s3h");
        assert_eq!(HandType::FullHouse, h.hand_type());
        assert_eq!([12, 12, 12, 3, 3], h.ranks());

        let h = rank("QhQcQd3s3hAsAc");
        assert_eq!(HandType::FullHouse, h.hand_type());
        assert_eq!([12, 12, 12, 14, 14], h.ranks());
    }

    #[test]
    fn test_full_house_from_two_trips() {
        let h = rank("7h7c7dKsKhKd2c");
        assert_eq!(HandType::FullHouse, h.hand_type());
        assert_eq!([13, 13, 13, 7, 7], h.ranks());
    }

    #[test]
    fn test_two_pair() {
        let h = rank("AdAc9d9cTs");
        assert_eq!(HandType::TwoPair, h.hand_type());
        assert_eq!([14, 14, 9, 9, 10], h.ranks());
    }

    #[test]
    fn test_two_pair_from_three_pairs() {
        // The third pair's card can still be the kicker.
        let h = rank("4d4c9d9cJsJh8c");
        assert_eq!(HandType::TwoPair, h.hand_type());
        assert_eq!([11, 11, 9, 9, 8], h.ranks());

        let h = rank("4d4c9d9cJsJh2c");
        assert_eq!([11, 11, 9, 9, 4], h.ranks());
    }

    #[test]
    fn test_one_pair() {
        let h = rank("AdAc9d8cTs");
        assert_eq!(HandType::Pair, h.hand_type());
        assert_eq!([14, 14, 10, 9, 8], h.ranks());
    }

    #[test]
    fn test_one_pair_from_seven() {
        let h = rank("2d2cKd8cTs3h4h");
        assert_eq!(HandType::Pair, h.hand_type());
        assert_eq!([2, 2, 13, 10, 8], h.ranks());
    }

    #[test]
    fn test_four_of_a_kind() {
        let h = rank("AdAcAsAhTs");
        assert_eq!(HandType::FourOfAKind, h.hand_type());
        assert_eq!([14, 14, 14, 14, 10], h.ranks());
    }

    #[test]
    fn test_four_of_a_kind_kicker_from_pair() {
        let h = rank("5d5c5s5hKsKh2c");
        assert_eq!(HandType::FourOfAKind, h.hand_type());
        assert_eq!([5, 5, 5, 5, 13], h.ranks());
    }

    #[test]
    fn test_three_of_a_kind() {
        let h = rank("2c2s2h5s6d");
        assert_eq!(HandType::ThreeOfAKind, h.hand_type());
        assert_eq!([2, 2, 2, 6, 5], h.ranks());
    }

    #[test]
    fn test_three_of_a_kind_from_seven() {
        let h = rank("Jc2sJh5s6dJd9c");
        assert_eq!(HandType::ThreeOfAKind, h.hand_type());
        assert_eq!([11, 11, 11, 9, 6], h.ranks());
    }

    #[test]
    fn test_straight() {
        let h = rank("2c3s4h5s6d");
        assert_eq!(HandType::Straight, h.hand_type());
        assert_eq!([6, 5, 4, 3, 2], h.ranks());
    }

    #[test]
    fn test_straight_with_paired_ranks() {
        let h = rank("9c9sTh8sJd7d7h");
        assert_eq!(HandType::Straight, h.hand_type());
        assert_eq!([11, 10, 9, 8, 7], h.ranks());
    }

    #[test]
    fn test_straight_takes_highest_run() {
        let h = rank("4c5s6h7s8d9dTh");
        assert_eq!(HandType::Straight, h.hand_type());
        assert_eq!([10, 9, 8, 7, 6], h.ranks());
    }

    #[test]
    fn test_wheel() {
        let h = rank("Ad2c3s4h5s");
        assert_eq!(HandType::Straight, h.hand_type());
        assert_eq!([5, 4, 3, 2, 1], h.ranks());
        assert_eq!(Rank::Ace, h.cards()[4].rank);
    }

    #[test]
    fn test_six_high_beats_wheel() {
        let h = rank("Ad2c3s4h5s6c");
        assert_eq!([6, 5, 4, 3, 2], h.ranks());
        assert!(h > rank("Ad2c3s4h5s"));
    }

    #[test]
    fn test_broadway() {
        let h = rank("TcJsQhKsAd");
        assert_eq!(HandType::Straight, h.hand_type());
        assert_eq!([14, 13, 12, 11, 10], h.ranks());
    }

    #[test]
    fn test_no_wrap_around() {
        let h = rank("QcKsAh2s3d");
        assert_eq!(HandType::HighCard, h.hand_type());
    }

    #[test]
    fn test_straight_flush_high() {
        let h = rank("ThJhQhKhAh");
        assert_eq!(HandType::StraightFlush, h.hand_type());
        assert_eq!([14, 13, 12, 11, 10], h.ranks());
    }

    #[test]
    fn test_straight_flush_wheel() {
        let wheel = rank("Ac2c3c4c5c");
        assert_eq!(HandType::StraightFlush, wheel.hand_type());
        assert_eq!([5, 4, 3, 2, 1], wheel.ranks());

        let higher = rank("6h7h8h9hTh");
        assert_eq!(HandType::StraightFlush, higher.hand_type());
        assert!(higher > wheel);

        let quads = rank("AdAcAsAhKs");
        assert!(wheel > quads);
    }

    #[test]
    fn test_not_straight_flush_due_to_suits() {
        let h = rank("ThJhQhKsAh");
        assert_eq!(HandType::Straight, h.hand_type());
    }

    #[test]
    fn test_not_straight_flush_due_to_sequence() {
        let h = rank("TcJcQcAc9c");
        assert_eq!(HandType::Flush, h.hand_type());
    }

    #[test]
    fn test_straight_flush_with_extra_card() {
        let h = rank("9dTdJdQdKd8d");
        assert_eq!(HandType::StraightFlush, h.hand_type());
        assert_eq!([13, 12, 11, 10, 9], h.ranks());
    }

    #[test]
    fn test_straight_flush_ignores_off_suit_run() {
        // The straight is 5-9 but only 5-8 plus 4 are clubs.
        let h = rank("4c5c6c7c8c9hTh");
        assert_eq!(HandType::StraightFlush, h.hand_type());
        assert_eq!([8, 7, 6, 5, 4], h.ranks());
    }

    #[test]
    fn test_errors() {
        let cards = cards_from_str("AsKsQs2d").unwrap();
        assert_eq!(Err(PokerError::MalformedHand(4)), best_hand(&cards));
        assert_eq!(Err(PokerError::MalformedHand(0)), best_hand(&[]));

        let ace = Card::new(Rank::Ace, Suit::Spade);
        let mut cards = cards_from_str("AsKsQs2d3d").unwrap();
        cards.push(ace);
        assert_eq!(Err(PokerError::DuplicateCard(ace)), best_hand(&cards));
    }

    #[test]
    fn test_suit_invariance() {
        let a = rank("AsAcKd7h2c");
        let b = rank("AhAdKs7c2d");
        assert_eq!(a, b);
    }

    #[test]
    fn test_more_than_seven_cards() {
        // Two flush suits, the spade straight flush wins.
        let h = rank("2h5h7h9hJh3s4s5s6s7s");
        assert_eq!(HandType::StraightFlush, h.hand_type());
        assert_eq!([7, 6, 5, 4, 3], h.ranks());
    }

    /// Every subset of five cards out of `cards`.
    fn five_card_subsets(cards: &[Card]) -> Vec<Vec<Card>> {
        let n = cards.len();
        let mut out = vec![];
        for a in 0..n {
            for b in (a + 1)..n {
                for c in (b + 1)..n {
                    for d in (c + 1)..n {
                        for e in (d + 1)..n {
                            out.push(vec![cards[a], cards[b], cards[c], cards[d], cards[e]]);
                        }
                    }
                }
            }
        }
        out
    }

    #[test]
    fn test_seven_cards_match_best_subset() {
        let mut rng = StdRng::seed_from_u64(420);
        for _ in 0..2_000 {
            let mut deck = Deck::new();
            deck.shuffle(&mut rng);
            let cards: Vec<Card> = (0..7).map(|_| deck.draw().unwrap()).collect();

            let best = best_hand(&cards).unwrap();
            assert!(best.cards().iter().all(|c| cards.contains(c)));

            let mut unique = best.cards().to_vec();
            unique.sort();
            unique.dedup();
            assert_eq!(5, unique.len());

            let best_subset = five_card_subsets(&cards)
                .iter()
                .map(|s| best_hand(s).unwrap())
                .max()
                .unwrap();
            assert_eq!(best_subset, best);
            assert_eq!(best_subset.hand_type(), best.hand_type());
        }
    }

    // Walks all 2.6M five card hands, slow without optimizations.
    #[test]
    #[ignore]
    fn test_all_five_card_hand_counts() {
        let deck: Vec<Card> = Deck::new().into_iter().collect();
        let mut counts = [0usize; 9];
        let n = deck.len();
        for a in 0..n {
            for b in (a + 1)..n {
                for c in (b + 1)..n {
                    for d in (c + 1)..n {
                        for e in (d + 1)..n {
                            let hand = [deck[a], deck[b], deck[c], deck[d], deck[e]];
                            counts[best_hand(&hand).unwrap().hand_type().index()] += 1;
                        }
                    }
                }
            }
        }
        assert_eq!(
            [1_302_540, 1_098_240, 123_552, 54_912, 10_200, 5_108, 3_744, 624, 40],
            counts
        );
    }
}
