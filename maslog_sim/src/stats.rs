//! Communication statistics over a record stream.
//!
//! Mirrors what the MAS logger reports for its viewer: per-agent message
//! counts towards each peer, and a sender/receiver heatmap.

use crate::record::{LogRecord, ACL_SEND};
use maslog_env::AgentId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Traffic between one agent and one peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Communication {
    /// ID of the other agent
    pub id: AgentId,

    /// Messages sent to the other agent
    #[serde(rename = "numsent")]
    pub sent: u64,

    /// Messages received from the other agent
    #[serde(rename = "numrecv")]
    pub received: u64,
}

/// All peers an agent exchanged messages with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentCommunication {
    #[serde(rename = "agentid")]
    pub agent_id: AgentId,
    pub communication: Vec<Communication>,
}

/// One heatmap cell: how often `sender` messaged `receiver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapCell {
    pub sender: AgentId,
    pub receiver: AgentId,
    pub count: u64,
}

/// Serialized form written by `--stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsExport {
    pub agents: Vec<AgentCommunication>,
    pub heatmap: Vec<HeatmapCell>,
}

/// Exchange counts keyed by (sender, receiver).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommunicationStats {
    exchanges: BTreeMap<(AgentId, AgentId), u64>,
}

impl CommunicationStats {
    /// Tallies every ACL exchange in the stream.
    ///
    /// Each exchange is counted once, from its send record.
    pub fn from_records(records: &[LogRecord]) -> Self {
        let mut exchanges = BTreeMap::new();

        for record in records.iter().filter(|r| r.message == ACL_SEND) {
            if let Some(payload) = record.acl_payload() {
                *exchanges.entry((payload.sender, payload.receiver)).or_insert(0) += 1;
            }
        }

        Self { exchanges }
    }

    /// Total number of exchanges.
    pub fn total_exchanges(&self) -> u64 {
        self.exchanges.values().sum()
    }

    /// Agents involved in at least one exchange, ascending.
    pub fn agents(&self) -> Vec<AgentId> {
        let agents: BTreeSet<AgentId> = self
            .exchanges
            .keys()
            .flat_map(|&(s, r)| [s, r])
            .collect();
        agents.into_iter().collect()
    }

    /// Number of messages `sender` sent to `receiver`.
    pub fn count(&self, sender: AgentId, receiver: AgentId) -> u64 {
        self.exchanges.get(&(sender, receiver)).copied().unwrap_or(0)
    }

    /// Per-peer traffic of one agent, ordered by peer id.
    pub fn communication_of(&self, agent: AgentId) -> Vec<Communication> {
        self.agents()
            .into_iter()
            .filter(|&peer| peer != agent)
            .map(|peer| Communication {
                id: peer,
                sent: self.count(agent, peer),
                received: self.count(peer, agent),
            })
            .filter(|c| c.sent + c.received > 0)
            .collect()
    }

    /// Heatmap cells ordered by (sender, receiver).
    pub fn heatmap(&self) -> Vec<HeatmapCell> {
        self.exchanges
            .iter()
            .map(|(&(sender, receiver), &count)| HeatmapCell { sender, receiver, count })
            .collect()
    }

    /// Builds the serialized summary.
    pub fn export(&self) -> StatsExport {
        StatsExport {
            agents: self
                .agents()
                .into_iter()
                .map(|agent_id| AgentCommunication {
                    agent_id,
                    communication: self.communication_of(agent_id),
                })
                .collect(),
            heatmap: self.heatmap(),
        }
    }
}
