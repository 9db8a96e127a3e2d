//! Randomness and time sources for the host.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use tokio::time::Instant;

use combat_core::{RngOracle, Timestamp};

/// Adapts any [`rand::RngCore`] to the engine's [`RngOracle`].
#[derive(Debug, Clone)]
pub struct StdRngOracle<R = StdRng> {
    rng: R,
}

impl StdRngOracle<StdRng> {
    /// Seeded from system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: RngCore> StdRngOracle<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl Default for StdRngOracle<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R: RngCore> RngOracle for StdRngOracle<R> {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    fn roll_unit(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }
}

/// Monotonic game clock in whole seconds.
///
/// The engine never reads time; the host stamps every call with
/// [`GameClock::now`] so rounds and effect ticks share one timeline.
#[derive(Debug, Clone, Copy)]
pub struct GameClock {
    origin: Instant,
    epoch: Timestamp,
}

impl GameClock {
    /// Starts counting at `epoch`.
    pub fn starting_at(epoch: Timestamp) -> Self {
        Self {
            origin: Instant::now(),
            epoch,
        }
    }

    pub fn now(&self) -> Timestamp {
        self.epoch + self.origin.elapsed().as_secs()
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::starting_at(Timestamp::ZERO)
    }
}
