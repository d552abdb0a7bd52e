use std::ops::{Add, AddAssign};

use crate::core::{HandType, PokerError};

use super::Outcome;

/// Raw counters accumulated while simulating.
///
/// Counters from independent runs merge by adding them up, in any order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    /// Trials completed.
    pub trials: u64,
    /// Trials the player's hand beat every opponent.
    pub wins: u64,
    /// Trials the player's hand tied the best opponent hand.
    pub ties: u64,
    /// Trials an opponent's hand beat the player's.
    pub other_wins: u64,
    /// Player hand type counts, indexed by `HandType::index`.
    pub player_hand_types: [u64; 9],
    /// Best opponent hand type counts, indexed by `HandType::index`.
    pub other_hand_types: [u64; 9],
}

impl OutcomeCounts {
    /// Count one finished trial.
    pub fn record(&mut self, outcome: Outcome, player: HandType, best_other: Option<HandType>) {
        self.trials += 1;
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Tie => self.ties += 1,
            Outcome::Loss => self.other_wins += 1,
        }
        self.player_hand_types[player.index()] += 1;
        if let Some(other) = best_other {
            self.other_hand_types[other.index()] += 1;
        }
    }

    /// Fold another set of counters into this one.
    pub fn merge(&mut self, other: &OutcomeCounts) {
        self.trials += other.trials;
        self.wins += other.wins;
        self.ties += other.ties;
        self.other_wins += other.other_wins;
        for (mine, theirs) in self.player_hand_types.iter_mut().zip(other.player_hand_types) {
            *mine += theirs;
        }
        for (mine, theirs) in self.other_hand_types.iter_mut().zip(other.other_hand_types) {
            *mine += theirs;
        }
    }

    /// Divide every counter by the number of completed trials.
    pub fn to_probabilities(&self) -> Result<Probabilities, PokerError> {
        if self.trials == 0 {
            return Err(PokerError::NoTrialsCompleted);
        }
        let n = self.trials as f64;
        Ok(Probabilities {
            trials: self.trials,
            player_win: self.wins as f64 / n,
            player_tie: self.ties as f64 / n,
            other_players_win: self.other_wins as f64 / n,
            player: HandTypeDistribution::from_counts(&self.player_hand_types, n),
            other_players: HandTypeDistribution::from_counts(&self.other_hand_types, n),
        })
    }
}

impl AddAssign for OutcomeCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}

impl Add for OutcomeCounts {
    type Output = OutcomeCounts;

    fn add(mut self, rhs: Self) -> Self::Output {
        self.merge(&rhs);
        self
    }
}

/// Fraction of trials that ended in each hand type.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandTypeDistribution {
    pub high_card: f64,
    pub pair: f64,
    pub two_pair: f64,
    pub three_of_a_kind: f64,
    pub straight: f64,
    pub flush: f64,
    pub full_house: f64,
    pub four_of_a_kind: f64,
    pub straight_flush: f64,
}

impl HandTypeDistribution {
    fn from_counts(counts: &[u64; 9], n: f64) -> Self {
        let p = |t: HandType| counts[t.index()] as f64 / n;
        Self {
            high_card: p(HandType::HighCard),
            pair: p(HandType::Pair),
            two_pair: p(HandType::TwoPair),
            three_of_a_kind: p(HandType::ThreeOfAKind),
            straight: p(HandType::Straight),
            flush: p(HandType::Flush),
            full_house: p(HandType::FullHouse),
            four_of_a_kind: p(HandType::FourOfAKind),
            straight_flush: p(HandType::StraightFlush),
        }
    }

    /// The fraction for one hand type.
    pub fn get(&self, hand_type: HandType) -> f64 {
        match hand_type {
            HandType::HighCard => self.high_card,
            HandType::Pair => self.pair,
            HandType::TwoPair => self.two_pair,
            HandType::ThreeOfAKind => self.three_of_a_kind,
            HandType::Straight => self.straight,
            HandType::Flush => self.flush,
            HandType::FullHouse => self.full_house,
            HandType::FourOfAKind => self.four_of_a_kind,
            HandType::StraightFlush => self.straight_flush,
        }
    }

    /// Sum over all nine hand types.
    pub fn total(&self) -> f64 {
        HandType::ALL.iter().map(|t| self.get(*t)).sum()
    }
}

/// The result of a simulation run.
///
/// Every field is a fraction of the completed trials in `[0, 1]`.
/// `player_win + player_tie + other_players_win` is one, and so is
/// `player.total()`. `other_players.total()` is one unless the player was
/// alone at the table, then it's zero.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Probabilities {
    /// How many trials these fractions are over.
    pub trials: u64,
    pub player_win: f64,
    pub player_tie: f64,
    pub other_players_win: f64,
    /// Hand types the player finished with.
    pub player: HandTypeDistribution,
    /// Hand types of the best opposing hand.
    pub other_players: HandTypeDistribution,
}

impl Probabilities {
    /// Chance the player wins or ties.
    pub fn player_equity(&self) -> f64 {
        self.player_win + self.player_tie
    }
}
