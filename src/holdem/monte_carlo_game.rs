use std::cmp::Ordering;
use std::sync::atomic::{self, AtomicBool};
use std::thread;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{Level, debug_span, event, trace_span};

use crate::core::{Card, Deck, Hand, PokerError, Rank, Suit, best_hand};

use super::{OutcomeCounts, Probabilities};

/// Most players that can sit at the table, the player included.
pub const MAX_PLAYERS: usize = 10;

/// Trials used when the caller doesn't pick a number.
pub const DEFAULT_TRIALS: usize = 1_000_000;

/// How a single trial ended for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The player's hand beat the best opponent hand.
    Win,
    /// The player's hand was equal to the best opponent hand.
    Tie,
    /// The best opponent hand beat the player's.
    Loss,
}

/// Everything dealt and decided in one trial.
#[derive(Debug, Clone)]
pub struct Trial {
    /// The full table, known cards first.
    pub table: [Card; 5],
    /// Hole cards dealt to each opponent.
    pub opponents: Vec<[Card; 2]>,
    /// The player's best hand.
    pub player: Hand,
    /// The best hand among the opponents, `None` when the player is alone.
    pub best_opponent: Option<Hand>,
    pub outcome: Outcome,
}

/// A Hold'em spot to estimate the odds of: the player's hole cards, the
/// table cards seen so far, and how many players are dealt in.
///
/// Opponents get uniformly random cards out of what's left in the deck.
/// The configuration is checked once when the game is created so every
/// estimate after that runs on valid input.
///
/// # Examples
///
/// ```
/// use poker_odds::core::cards_from_str;
/// use poker_odds::holdem::MonteCarloGame;
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let hand = cards_from_str("AsAc").unwrap();
/// let table = cards_from_str("Qh2c3s").unwrap();
/// let game = MonteCarloGame::new(&hand, &table, 3).unwrap();
///
/// let mut rng = StdRng::seed_from_u64(420);
/// let p = game.estimate_with_rng(1_000, &mut rng).unwrap();
/// assert!(p.player_win > p.other_players_win);
/// ```
#[derive(Debug, Clone)]
pub struct MonteCarloGame {
    player_hand: [Card; 2],
    table: Vec<Card>,
    total_players: usize,
    /// Full deck less every known card.
    deck: Deck,
}

impl MonteCarloGame {
    /// Set up a game.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` unless the player has exactly two cards, the
    /// table has at most five, and there are between 1 and `MAX_PLAYERS`
    /// players. `CardIdentityViolation` when a known card is given twice.
    pub fn new(
        player_hand: &[Card],
        table: &[Card],
        total_players: usize,
    ) -> Result<Self, PokerError> {
        if !(1..=MAX_PLAYERS).contains(&total_players) {
            return Err(PokerError::InvalidConfiguration(format!(
                "total players must be between 1 and {MAX_PLAYERS}, got {total_players}"
            )));
        }
        let player_hand: [Card; 2] = player_hand.try_into().map_err(|_| {
            PokerError::InvalidConfiguration(format!(
                "the player needs 2 hole cards, got {}",
                player_hand.len()
            ))
        })?;
        if table.len() > 5 {
            return Err(PokerError::InvalidConfiguration(format!(
                "the table holds at most 5 cards, got {}",
                table.len()
            )));
        }

        let mut deck = Deck::new();
        for card in player_hand.iter().chain(table) {
            deck.remove(card)?;
        }

        event!(
            Level::DEBUG,
            player = ?player_hand,
            table = ?table,
            total_players,
            remaining = deck.len(),
            "Created monte carlo game"
        );

        Ok(Self {
            player_hand,
            table: table.to_vec(),
            total_players,
            deck,
        })
    }

    /// The player's hole cards.
    pub fn player_hand(&self) -> &[Card; 2] {
        &self.player_hand
    }

    /// The known table cards.
    pub fn table(&self) -> &[Card] {
        &self.table
    }

    /// Number of players dealt in, the player included.
    pub fn total_players(&self) -> usize {
        self.total_players
    }

    /// Play out a single trial.
    ///
    /// The table is filled up to five cards, every opponent gets two hole
    /// cards, and the player's best hand is compared with the best opponent
    /// hand. No card is dealt twice.
    pub fn simulate<R: Rng>(&self, rng: &mut R) -> Result<Trial, PokerError> {
        let mut deck = self.deck.clone();
        self.deal(&mut deck, rng)
    }

    fn deal<R: Rng>(&self, deck: &mut Deck, rng: &mut R) -> Result<Trial, PokerError> {
        let mut table = [Card::new(Rank::Two, Suit::Club); 5];
        table[..self.table.len()].copy_from_slice(&self.table);
        for slot in &mut table[self.table.len()..] {
            *slot = deck.draw_random(rng)?;
        }

        let mut opponents = Vec::with_capacity(self.total_players - 1);
        let mut best_opponent: Option<Hand> = None;
        for _ in 1..self.total_players {
            let hole = [deck.draw_random(rng)?, deck.draw_random(rng)?];
            let hand = best_hand(&with_table(hole, &table))?;
            best_opponent = best_opponent.max(Some(hand));
            opponents.push(hole);
        }

        let player = best_hand(&with_table(self.player_hand, &table))?;
        let outcome = match best_opponent.map(|o| player.cmp(&o)) {
            None | Some(Ordering::Greater) => Outcome::Win,
            Some(Ordering::Equal) => Outcome::Tie,
            Some(Ordering::Less) => Outcome::Loss,
        };

        Ok(Trial {
            table,
            opponents,
            player,
            best_opponent,
            outcome,
        })
    }

    /// Run `trials` trials on this thread and count what happened.
    ///
    /// Stops early once `stop` is set, the counts then cover only the trials
    /// that finished.
    fn run<R: Rng>(
        &self,
        trials: usize,
        rng: &mut R,
        stop: Option<&AtomicBool>,
    ) -> Result<OutcomeCounts, PokerError> {
        let mut counts = OutcomeCounts::default();
        let mut deck = self.deck.clone();

        for _ in 0..trials {
            if stop.is_some_and(|s| s.load(atomic::Ordering::Relaxed)) {
                event!(Level::DEBUG, completed = counts.trials, "Stopped early");
                break;
            }

            deck.clone_from(&self.deck);
            let trial = self.deal(&mut deck, rng)?;
            event!(
                Level::TRACE,
                outcome = ?trial.outcome,
                player = %trial.player,
                "Trial finished"
            );
            counts.record(
                trial.outcome,
                trial.player.hand_type(),
                trial.best_opponent.map(|h| h.hand_type()),
            );
        }

        Ok(counts)
    }

    /// Estimate the odds over `trials` trials using the thread local rng.
    pub fn estimate(&self, trials: usize) -> Result<Probabilities, PokerError> {
        self.estimate_with_rng(trials, &mut rand::rng())
    }

    /// Estimate the odds over `trials` trials drawing from `rng`.
    ///
    /// The same seeded rng gives the same probabilities every time.
    pub fn estimate_with_rng<R: Rng>(
        &self,
        trials: usize,
        rng: &mut R,
    ) -> Result<Probabilities, PokerError> {
        check_trials(trials)?;
        let _span = debug_span!("estimate", trials, players = self.total_players).entered();

        let probabilities = self.run(trials, rng, None)?.to_probabilities()?;
        log_result(&probabilities);
        Ok(probabilities)
    }

    /// Estimate the odds splitting `trials` over `workers` threads.
    pub fn par_estimate(
        &self,
        trials: usize,
        workers: usize,
    ) -> Result<Probabilities, PokerError> {
        self.par_estimate_with_rng(trials, workers, &mut rand::rng())
    }

    /// Estimate the odds splitting `trials` over `workers` threads.
    ///
    /// Each worker gets its own `StdRng` seeded from `rng`, so a seeded `rng`
    /// and the same number of workers always give the same result.
    ///
    /// ```
    /// use poker_odds::core::cards_from_str;
    /// use poker_odds::holdem::MonteCarloGame;
    /// use rand::{SeedableRng, rngs::StdRng};
    ///
    /// let hand = cards_from_str("KdKh").unwrap();
    /// let game = MonteCarloGame::new(&hand, &[], 2).unwrap();
    ///
    /// let one = game
    ///     .par_estimate_with_rng(2_000, 4, &mut StdRng::seed_from_u64(7))
    ///     .unwrap();
    /// let two = game
    ///     .par_estimate_with_rng(2_000, 4, &mut StdRng::seed_from_u64(7))
    ///     .unwrap();
    /// assert_eq!(one, two);
    /// assert_eq!(2_000, one.trials);
    /// ```
    pub fn par_estimate_with_rng<R: Rng>(
        &self,
        trials: usize,
        workers: usize,
        rng: &mut R,
    ) -> Result<Probabilities, PokerError> {
        let _span = debug_span!("par_estimate", trials, workers).entered();
        let probabilities = self.par_run(trials, workers, rng, None)?.to_probabilities()?;
        log_result(&probabilities);
        Ok(probabilities)
    }

    /// Like [`MonteCarloGame::par_estimate`] but every worker stops as soon
    /// as `stop` is set.
    ///
    /// The probabilities are over the trials that completed, which
    /// `Probabilities::trials` reports.
    ///
    /// # Errors
    ///
    /// `NoTrialsCompleted` if `stop` was set before any trial finished.
    pub fn par_estimate_until(
        &self,
        trials: usize,
        workers: usize,
        stop: &AtomicBool,
    ) -> Result<Probabilities, PokerError> {
        let _span = debug_span!("par_estimate_until", trials, workers).entered();
        let probabilities = self
            .par_run(trials, workers, &mut rand::rng(), Some(stop))?
            .to_probabilities()?;
        log_result(&probabilities);
        Ok(probabilities)
    }

    fn par_run<R: Rng>(
        &self,
        trials: usize,
        workers: usize,
        rng: &mut R,
        stop: Option<&AtomicBool>,
    ) -> Result<OutcomeCounts, PokerError> {
        check_trials(trials)?;
        if workers == 0 {
            return Err(PokerError::InvalidConfiguration(
                "at least one worker is needed".to_string(),
            ));
        }

        let workers = workers.min(trials);
        let seeds: Vec<u64> = (0..workers).map(|_| rng.random()).collect();

        let results: Vec<Result<OutcomeCounts, PokerError>> = thread::scope(|s| {
            let handles: Vec<_> = seeds
                .into_iter()
                .enumerate()
                .map(|(id, seed)| {
                    // The first `trials % workers` workers take one extra trial.
                    let budget = trials / workers + usize::from(id < trials % workers);
                    s.spawn(move || {
                        let _span = trace_span!("worker", id, budget).entered();
                        let mut rng = StdRng::seed_from_u64(seed);
                        let counts = self.run(budget, &mut rng, stop);
                        event!(Level::TRACE, id, "Worker finished");
                        counts
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
                .collect()
        });

        let mut total = OutcomeCounts::default();
        for counts in results {
            total += counts?;
        }
        Ok(total)
    }
}

fn check_trials(trials: usize) -> Result<(), PokerError> {
    if trials == 0 {
        return Err(PokerError::InvalidConfiguration(
            "at least one trial is needed".to_string(),
        ));
    }
    Ok(())
}

fn with_table(hole: [Card; 2], table: &[Card; 5]) -> [Card; 7] {
    let mut cards = [hole[0]; 7];
    cards[1] = hole[1];
    cards[2..].copy_from_slice(table);
    cards
}

fn log_result(p: &Probabilities) {
    event!(
        Level::DEBUG,
        trials = p.trials,
        win = p.player_win,
        tie = p.player_tie,
        other_win = p.other_players_win,
        "Estimate finished"
    );
}
