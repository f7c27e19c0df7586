//! Tunables for the countdown component.

use crate::digits::Separator;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Shortest tick period picked by default.
pub const DEFAULT_MIN_TICK: Duration = Duration::from_millis(10);
/// Longest tick period picked by default.
pub const DEFAULT_MAX_TICK: Duration = Duration::from_millis(50);

/// Countdown configuration.
///
/// Each start picks a tick period uniformly from `min_tick..=max_tick`, so
/// the millisecond digits do not visibly step in a fixed rhythm. Set both
/// bounds to the same value for a fixed period.
///
/// # Examples
///
/// ```rust
/// use bubbletea_countdown::countdown::Config;
/// use bubbletea_countdown::digits::Separator;
/// use std::time::Duration;
///
/// let config = Config::default()
///     .with_fixed_tick(Duration::from_millis(25))
///     .with_separator(Separator::Colon)
///     .with_seed(7);
/// assert_eq!(config.min_tick, config.max_tick);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Lower bound of the tick period.
    pub min_tick: Duration,
    /// Upper bound of the tick period.
    pub max_tick: Duration,
    /// Separator between seconds and milliseconds in the view.
    pub separator: Separator,
    /// Seed for the tick period generator; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_tick: DEFAULT_MIN_TICK,
            max_tick: DEFAULT_MAX_TICK,
            separator: Separator::default(),
            seed: None,
        }
    }
}

impl Config {
    /// Picks tick periods from `min..=max`. The bounds are swapped if reversed.
    pub fn with_tick_range(mut self, min: Duration, max: Duration) -> Self {
        self.min_tick = min.min(max);
        self.max_tick = min.max(max);
        self
    }

    /// Uses the same tick period on every start.
    pub fn with_fixed_tick(self, period: Duration) -> Self {
        self.with_tick_range(period, period)
    }

    /// Sets the separator shown before the milliseconds.
    pub fn with_separator(mut self, separator: Separator) -> Self {
        self.separator = separator;
        self
    }

    /// Makes the tick period sequence reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub(crate) fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Picks the period for the next run; never shorter than one millisecond.
    pub(crate) fn pick_period(&self, rng: &mut StdRng) -> Duration {
        let min = (self.min_tick.as_millis() as u64).max(1);
        let max = (self.max_tick.as_millis() as u64).max(min);
        if min == max {
            return Duration::from_millis(min);
        }
        Duration::from_millis(rng.gen_range(min..=max))
    }
}
