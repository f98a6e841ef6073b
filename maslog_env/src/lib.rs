//! MAS Log Generator Environment Abstraction Layer
//!
//! This crate isolates the two sources of non-determinism the generator
//! depends on, so the synthesizer can run against the **real** world
//! (wall clock, OS entropy) or a **simulated** one (pinned clock, seeded or
//! scripted draws).
//!
//! # Core Concept
//!
//! Every record the generator emits is a function of:
//! - Time (`now()`, read once per generation pass)
//! - Randomness (`draw()`, uniform integers over inclusive ranges)
//!
//! Routing both through [`GenContext`] makes any generated file
//! reproducible from a seed and a pinned clock.
//!
//! # Example
//!
//! ```ignore
//! use maslog_env::{format_timestamp, SystemClock};
//!
//! let seed = SystemClock::fresh_seed();
//! let at = format_timestamp(&SystemClock::now());
//! ```

mod context;
mod types;
mod error;
mod system_impl;

pub use context::{GenContext, TIMESTAMP_FORMAT, format_timestamp, is_representable, parse_timestamp};
pub use types::{AgentId, MasId};
pub use error::{GenError, GenResult};
pub use system_impl::SystemClock;
