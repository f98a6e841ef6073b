//! MAS Log Generator
//!
//! This crate fabricates a synthetic log stream for a simulated
//! multi-agent system and writes it as a JSON array for log viewers and
//! analytics fixtures.
//!
//! # Core Principle
//!
//! Every source of non-determinism goes through a
//! [`GenContext`](maslog_env::GenContext):
//! - **Time**: the generation instant, read once per pass
//! - **Randomness**: uniform draws for agents, intervals and receivers
//!
//! Runs use `SimContext`, seeded and pinned to a generation time (the CLI
//! draws a fresh seed when none is given), or `ScriptedContext` to pin
//! every draw.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      Synthesizer                         │
//! │   rounds × topics ──► LogEvent ──► sort (newest first)   │
//! │        ▲                                │                │
//! │   GenContext                        render               │
//! │  (clock + draws)                        ▼                │
//! │                                    LogRecord[]           │
//! └────────────────────────────────────────┬─────────────────┘
//!                 ┌────────────────────────┼──────────────┐
//!                 ▼                        ▼              ▼
//!            checks::verify        CommunicationStats   exporter
//!                                                      (logs.json)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use maslog_sim::{generate, write_records, GeneratorConfig, SimContext};
//!
//! let config = GeneratorConfig::default();
//! let records = generate(&config, &mut SimContext::new(42))?;
//! write_records(&records, "logs.json", false)?;
//! ```

mod config;
mod context;
mod record;
mod synthesizer;
mod exporter;
mod stats;
pub mod checks;
pub mod topics;

pub use config::{GeneratorConfig, DEFAULT_LOOKBACK_SECS, MAX_LOOKBACK_SECS};
pub use context::{SimContext, ScriptedContext};
pub use record::{AclPayload, LogEvent, LogRecord, ACL_RECEIVE, ACL_SEND, PLAIN_MESSAGE};
pub use synthesizer::{generate, Synthesizer};
pub use exporter::{load_records, read_json, write_json, write_records, DEFAULT_OUTPUT};
pub use stats::{AgentCommunication, Communication, CommunicationStats, HeatmapCell, StatsExport};
pub use topics::Topic;
