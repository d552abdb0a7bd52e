//! Hold'em odds estimation.

use crate::core::{Card, PokerError};

/// Module with the monte carlo simulation of a hold'em spot.
mod monte_carlo_game;
/// Export `MonteCarloGame` and the per trial types.
pub use self::monte_carlo_game::{DEFAULT_TRIALS, MAX_PLAYERS, MonteCarloGame, Outcome, Trial};

/// Module with the counters and the fractions they turn into.
mod probabilities;
/// Export `Probabilities`
pub use self::probabilities::{HandTypeDistribution, OutcomeCounts, Probabilities};

/// Estimate the odds for a player holding `player_hand` with `table` already
/// dealt and `total_players` players at the table, the player included.
///
/// Runs `trials` trials split over every available core. Use
/// [`MonteCarloGame`] directly to pick the rng or the number of workers.
///
/// # Examples
///
/// ```
/// use poker_odds::core::cards_from_str;
/// use poker_odds::holdem::estimate;
///
/// let hand = cards_from_str("AsAc").unwrap();
/// let table = cards_from_str("Qh2c3s").unwrap();
/// let p = estimate(&hand, &table, 3, 10_000).unwrap();
///
/// assert_eq!(10_000, p.trials);
/// assert!(p.player_win > 0.5);
/// ```
pub fn estimate(
    player_hand: &[Card],
    table: &[Card],
    total_players: usize,
    trials: usize,
) -> Result<Probabilities, PokerError> {
    let workers = std::thread::available_parallelism().map_or(1, |n| n.get());
    MonteCarloGame::new(player_hand, table, total_players)?.par_estimate(trials, workers)
}
