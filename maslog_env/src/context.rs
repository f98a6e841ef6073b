//! Core environment context trait for the generator.

use chrono::{Datelike, NaiveDateTime};

/// Textual timestamp layout used in records and payloads.
///
/// Second precision, no timezone offset.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Renders a timestamp in [`TIMESTAMP_FORMAT`].
pub fn format_timestamp(at: &NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Returns true if the instant renders as exactly `YYYY-MM-DDTHH:MM:SS`.
///
/// Only years 0000 through 9999 have an unsigned four-digit form.
pub fn is_representable(at: &NaiveDateTime) -> bool {
    (0..=9999).contains(&at.year())
}

/// Parses a timestamp written in [`TIMESTAMP_FORMAT`].
///
/// Stricter than chrono's `%Y`: signed or five-digit years are rejected.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let bytes = text.as_bytes();
    if bytes.len() != 19 || !bytes[..4].iter().all(u8::is_ascii_digit) {
        return None;
    }
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).ok()
}

/// The central interface for environment interaction.
///
/// This trait abstracts the "real world" so that the synthesizer can run
/// both as a production tool and under deterministic tests.
///
/// # Implementations
///
/// - **Simulation**: `SimContext` - pinned clock, `ChaCha8Rng(seed)`;
///   production runs pin it to `SystemClock::now()` with a fresh seed
/// - **Scripted**: `ScriptedContext` - replays a fixed list of draws
pub trait GenContext {
    /// Returns the generation time all timestamps are measured back from.
    ///
    /// Implementations return whole seconds so rendered timestamps sort
    /// the same way as the underlying values.
    fn now(&self) -> NaiveDateTime;

    /// Draws an integer uniformly from `low..=high`.
    ///
    /// Callers guarantee `low <= high`.
    fn draw(&mut self, low: u64, high: u64) -> u64;

    /// Returns the context's seed (for logging/debugging).
    fn seed(&self) -> u64;
}

impl<C: GenContext + ?Sized> GenContext for Box<C> {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }

    fn draw(&mut self, low: u64, high: u64) -> u64 {
        (**self).draw(low, high)
    }

    fn seed(&self) -> u64 {
        (**self).seed()
    }
}
