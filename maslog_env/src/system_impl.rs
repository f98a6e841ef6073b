//! Production clock and entropy for unpinned runs.

use chrono::{Local, NaiveDateTime, SubsecRound};

/// Production source of the generation instant and run seed.
///
/// Runs are always seeded: an unseeded invocation draws a fresh seed here
/// and reports it, so any generated file can be reproduced later with the
/// same seed and a pinned clock.
pub struct SystemClock;

impl SystemClock {
    /// Current local time without sub-second precision.
    pub fn now() -> NaiveDateTime {
        Local::now().naive_local().trunc_subsecs(0)
    }

    /// Draws a seed from OS entropy.
    pub fn fresh_seed() -> u64 {
        rand::random()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_system_clock_whole_seconds() {
        assert_eq!(SystemClock::now().nanosecond(), 0);
    }

    #[test]
    fn test_system_clock_is_representable() {
        assert!(crate::is_representable(&SystemClock::now()));
    }

    #[test]
    fn test_fresh_seeds_differ() {
        let seeds: std::collections::HashSet<u64> = (0..16).map(|_| SystemClock::fresh_seed()).collect();
        assert!(seeds.len() > 1);
    }
}
