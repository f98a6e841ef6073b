//! Common identifier types for generated log records.

use serde::{Deserialize, Serialize};

/// Identifier of an agent inside the simulated MAS.
///
/// Serialized as a bare integer (`"agentid": 3`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub u32);

impl AgentId {
    /// Creates an AgentId from a population index.
    pub fn from_index(index: u64) -> Self {
        Self(index as u32)
    }

    /// Returns the population index of this agent.
    pub fn index(&self) -> u64 {
        self.0 as u64
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a simulation run (the `masid` field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MasId(pub u32);

impl std::fmt::Display for MasId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_id_serializes_as_integer() {
        let json = serde_json::to_string(&AgentId(4)).unwrap();
        assert_eq!(json, "4");

        let back: AgentId = serde_json::from_str("2").unwrap();
        assert_eq!(back, AgentId(2));
    }

    #[test]
    fn test_agent_id_index() {
        assert_eq!(AgentId::from_index(3).index(), 3);
        assert_eq!(AgentId(7).to_string(), "7");
    }

    #[test]
    fn test_mas_id_default_is_zero() {
        assert_eq!(MasId::default(), MasId(0));
    }
}
