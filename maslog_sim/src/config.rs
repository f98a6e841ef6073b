//! Generator configuration.

use crate::topics::Topic;
use maslog_env::{AgentId, GenError, MasId};

/// Thirty days, the default lookback window.
pub const DEFAULT_LOOKBACK_SECS: u64 = 60 * 60 * 24 * 30;

/// Ten thousand years. Keeps `now - interval` inside the calendar range.
pub const MAX_LOOKBACK_SECS: u64 = 60 * 60 * 24 * 365 * 10_000;

/// Configuration for a generation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Size of the agent population (`agentid` ranges over `0..agent_count`)
    pub agent_count: u32,

    /// Topics synthesized each round, in order
    pub topics: Vec<Topic>,

    /// Number of generation rounds per topic
    pub iterations: u32,

    /// Maximum age of a synthesized timestamp, in seconds
    pub lookback_secs: u64,

    /// Simulation id stamped on every record
    pub mas_id: MasId,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            agent_count: 5,
            topics: Topic::defaults(),
            iterations: 10,
            lookback_secs: DEFAULT_LOOKBACK_SECS,
            mas_id: MasId(0),
        }
    }
}

impl GeneratorConfig {
    /// Rejects configurations whose random draws would be over an empty set.
    pub fn validate(&self) -> Result<(), GenError> {
        if self.agent_count == 0 {
            return Err(GenError::invalid_config("agent population is empty"));
        }
        if self.lookback_secs == 0 {
            return Err(GenError::invalid_config("lookback window must be at least 1 second"));
        }
        if self.lookback_secs > MAX_LOOKBACK_SECS {
            return Err(GenError::invalid_config(format!(
                "lookback window of {}s exceeds the {}s maximum",
                self.lookback_secs, MAX_LOOKBACK_SECS
            )));
        }
        if self.agent_count < 2 && self.has_communication() {
            return Err(GenError::invalid_config(format!(
                "topic '{}' needs at least 2 agents, got {}",
                Topic::Msg,
                self.agent_count
            )));
        }
        Ok(())
    }

    /// Returns true if any configured topic produces send/receive pairs.
    pub fn has_communication(&self) -> bool {
        self.topics.iter().any(Topic::is_communication)
    }

    /// Returns true if the id belongs to the agent population.
    pub fn contains_agent(&self, id: AgentId) -> bool {
        id.0 < self.agent_count
    }

    /// Number of records a pass with this configuration produces.
    ///
    /// One record per topic per round, plus one extra per communication
    /// event for the receiver side.
    pub fn expected_record_count(&self) -> usize {
        let per_round: usize = self
            .topics
            .iter()
            .map(|t| if t.is_communication() { 2 } else { 1 })
            .sum();
        per_round * self.iterations as usize
    }
}
