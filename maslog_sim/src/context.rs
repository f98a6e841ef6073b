//! Simulation contexts implementing GenContext for reproducible runs.

use chrono::{NaiveDate, NaiveDateTime, SubsecRound};
use maslog_env::GenContext;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// 2024-01-01 00:00:00, the default simulated generation time.
fn default_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("2024-01-01 is a valid date")
}

/// Simulation context backed by a pinned clock and a seeded RNG.
///
/// This implements `GenContext` using:
/// - A fixed generation time (defaults to 2024-01-01 00:00:00)
/// - A seeded ChaCha8 RNG, so the same seed yields the same draws
pub struct SimContext {
    /// Master seed for this run
    seed: u64,

    /// Deterministic RNG for all draws
    rng: ChaCha8Rng,

    /// Generation time every timestamp is measured back from
    epoch: NaiveDateTime,
}

impl SimContext {
    /// Creates a new SimContext with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            epoch: default_epoch(),
        }
    }

    /// Pins the generation time.
    pub fn with_epoch(mut self, epoch: NaiveDateTime) -> Self {
        self.epoch = epoch.trunc_subsecs(0);
        self
    }
}

impl GenContext for SimContext {
    fn now(&self) -> NaiveDateTime {
        self.epoch
    }

    fn draw(&mut self, low: u64, high: u64) -> u64 {
        self.rng.gen_range(low..=high)
    }

    fn seed(&self) -> u64 {
        self.seed
    }
}

/// Context that replays a fixed list of draws.
///
/// Each `draw` pops the next scripted value and clamps it into the
/// requested range. Once the script runs out every draw returns `low`.
pub struct ScriptedContext {
    now: NaiveDateTime,
    script: VecDeque<u64>,
}

impl ScriptedContext {
    /// Creates a scripted context at the default epoch.
    pub fn new(draws: impl IntoIterator<Item = u64>) -> Self {
        Self {
            now: default_epoch(),
            script: draws.into_iter().collect(),
        }
    }

    /// Pins the generation time.
    pub fn with_epoch(mut self, epoch: NaiveDateTime) -> Self {
        self.now = epoch.trunc_subsecs(0);
        self
    }

    /// Number of scripted draws not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl GenContext for ScriptedContext {
    fn now(&self) -> NaiveDateTime {
        self.now
    }

    fn draw(&mut self, low: u64, high: u64) -> u64 {
        self.script
            .pop_front()
            .map_or(low, |v| v.clamp(low, high))
    }

    fn seed(&self) -> u64 {
        0
    }
}
