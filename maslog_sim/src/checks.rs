//! Invariant checks over a rendered record stream.
//!
//! Used on freshly generated streams before they are written, and on
//! existing log files (`--check`). Ties in timestamp may come in any
//! order, so send/receive pairs are matched by timestamp and payload
//! rather than by adjacency.

use crate::config::GeneratorConfig;
use crate::record::{LogRecord, ACL_RECEIVE, ACL_SEND, PLAIN_MESSAGE};
use crate::topics::Topic;
use chrono::NaiveDateTime;
use maslog_env::{parse_timestamp, AgentId, MasId};
use std::collections::BTreeMap;
use thiserror::Error;

/// A broken invariant, with the index of the offending record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("record {index}: timestamp '{value}' is not YYYY-MM-DDTHH:MM:SS")]
    MalformedTimestamp { index: usize, value: String },

    #[error("record {index}: newer than the record before it")]
    Unsorted { index: usize },

    #[error("record {index}: agent {agent} is outside the population")]
    AgentOutOfPopulation { index: usize, agent: AgentId },

    #[error("record {index}: topic '{topic}' is not configured")]
    UnexpectedTopic { index: usize, topic: Topic },

    #[error("record {index}: masid {found}, expected {expected}")]
    WrongMasId { index: usize, found: MasId, expected: MasId },

    #[error("record {index}: message '{message}' does not fit its topic")]
    MalformedMessage { index: usize, message: String },

    #[error("record {index}: payload does not fit its topic")]
    MalformedPayload { index: usize },

    #[error("record {index}: agent {agent} messages itself")]
    SelfMessage { index: usize, agent: AgentId },

    #[error("record {index}: payload disagrees with the record it is attached to")]
    PairMismatch { index: usize },

    #[error("record {index}: ACL send without a matching receive")]
    UnpairedSend { index: usize },

    #[error("record {index}: ACL receive without a matching send")]
    UnpairedReceive { index: usize },
}

/// Checks every invariant of a record stream produced with `config`.
pub fn verify(records: &[LogRecord], config: &GeneratorConfig) -> Result<(), Violation> {
    let mut sends: BTreeMap<(&str, &str), Vec<usize>> = BTreeMap::new();
    let mut receives: BTreeMap<(&str, &str), Vec<usize>> = BTreeMap::new();
    let mut previous: Option<NaiveDateTime> = None;

    for (index, record) in records.iter().enumerate() {
        let at = parse_timestamp(&record.timestamp).ok_or_else(|| Violation::MalformedTimestamp {
            index,
            value: record.timestamp.clone(),
        })?;
        if previous.is_some_and(|p| at > p) {
            return Err(Violation::Unsorted { index });
        }
        previous = Some(at);

        if record.mas_id != config.mas_id {
            return Err(Violation::WrongMasId {
                index,
                found: record.mas_id,
                expected: config.mas_id,
            });
        }
        if !config.contains_agent(record.agent_id) {
            return Err(Violation::AgentOutOfPopulation { index, agent: record.agent_id });
        }
        if !config.topics.contains(&record.topic) {
            return Err(Violation::UnexpectedTopic { index, topic: record.topic });
        }

        if !record.topic.is_communication() {
            if record.message != PLAIN_MESSAGE {
                return Err(Violation::MalformedMessage {
                    index,
                    message: record.message.clone(),
                });
            }
            if !record.data.is_empty() {
                return Err(Violation::MalformedPayload { index });
            }
            continue;
        }

        let payload = record
            .acl_payload()
            .ok_or(Violation::MalformedPayload { index })?;
        if payload.timestamp != record.timestamp {
            return Err(Violation::PairMismatch { index });
        }
        if payload.sender == payload.receiver {
            return Err(Violation::SelfMessage { index, agent: payload.sender });
        }
        for agent in [payload.sender, payload.receiver] {
            if !config.contains_agent(agent) {
                return Err(Violation::AgentOutOfPopulation { index, agent });
            }
        }

        let key = (record.timestamp.as_str(), record.data.as_str());
        match record.message.as_str() {
            ACL_SEND if record.agent_id == payload.sender => {
                sends.entry(key).or_default().push(index)
            }
            ACL_RECEIVE if record.agent_id == payload.receiver => {
                receives.entry(key).or_default().push(index)
            }
            ACL_SEND | ACL_RECEIVE => return Err(Violation::PairMismatch { index }),
            other => {
                return Err(Violation::MalformedMessage {
                    index,
                    message: other.to_string(),
                })
            }
        }
    }

    check_pairs(&sends, &receives)
}

/// Every send must be matched by exactly one receive with the same key.
fn check_pairs(
    sends: &BTreeMap<(&str, &str), Vec<usize>>,
    receives: &BTreeMap<(&str, &str), Vec<usize>>,
) -> Result<(), Violation> {
    let unpaired_sends = sends.iter().filter_map(|(key, send_idx)| {
        let matched = receives.get(key).map_or(0, Vec::len);
        send_idx
            .get(matched)
            .map(|&index| (index, Violation::UnpairedSend { index }))
    });
    let unpaired_receives = receives.iter().filter_map(|(key, recv_idx)| {
        let matched = sends.get(key).map_or(0, Vec::len);
        recv_idx
            .get(matched)
            .map(|&index| (index, Violation::UnpairedReceive { index }))
    });

    match unpaired_sends.chain(unpaired_receives).min_by_key(|(index, _)| *index) {
        Some((_, violation)) => Err(violation),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SimContext;
    use crate::synthesizer::generate;

    fn plain(agent: u32, ts: &str, topic: Topic) -> LogRecord {
        LogRecord {
            mas_id: MasId(0),
            agent_id: AgentId(agent),
            timestamp: ts.to_string(),
            topic,
            message: PLAIN_MESSAGE.to_string(),
            data: String::new(),
        }
    }

    fn acl(agent: u32, message: &str, sender: u32, receiver: u32, ts: &str) -> LogRecord {
        LogRecord {
            mas_id: MasId(0),
            agent_id: AgentId(agent),
            timestamp: ts.to_string(),
            topic: Topic::Msg,
            message: message.to_string(),
            data: format!("Sender: {};Receiver: {};Timestamp: {}", sender, receiver, ts),
        }
    }

    const T1: &str = "2024-01-01T10:00:00";
    const T2: &str = "2024-01-01T09:00:00";

    #[test]
    fn test_generated_stream_passes() {
        let config = GeneratorConfig::default();
        let records = generate(&config, &mut SimContext::new(5)).unwrap();
        assert_eq!(verify(&records, &config), Ok(()));
    }

    #[test]
    fn test_empty_stream_passes() {
        assert_eq!(verify(&[], &GeneratorConfig::default()), Ok(()));
    }

    #[test]
    fn test_pair_split_by_tie_passes() {
        let records = vec![
            acl(1, ACL_SEND, 1, 2, T1),
            plain(0, T1, Topic::App),
            acl(2, ACL_RECEIVE, 1, 2, T1),
        ];
        assert_eq!(verify(&records, &GeneratorConfig::default()), Ok(()));
    }

    #[test]
    fn test_unsorted_detected() {
        let records = vec![plain(0, T2, Topic::Error), plain(1, T1, Topic::Error)];
        assert_eq!(
            verify(&records, &GeneratorConfig::default()),
            Err(Violation::Unsorted { index: 1 })
        );
    }

    #[test]
    fn test_bad_timestamp_detected() {
        let records = vec![plain(0, "2024-0101T10:00:00", Topic::Error)];
        assert!(matches!(
            verify(&records, &GeneratorConfig::default()),
            Err(Violation::MalformedTimestamp { index: 0, .. })
        ));
    }

    #[test]
    fn test_signed_year_timestamp_detected() {
        let records = vec![plain(0, "-7967-06-08T00:00:00", Topic::Error)];
        assert!(matches!(
            verify(&records, &GeneratorConfig::default()),
            Err(Violation::MalformedTimestamp { index: 0, .. })
        ));
    }

    #[test]
    fn test_agent_outside_population_detected() {
        let records = vec![plain(5, T1, Topic::Debug)];
        assert_eq!(
            verify(&records, &GeneratorConfig::default()),
            Err(Violation::AgentOutOfPopulation { index: 0, agent: AgentId(5) })
        );
    }

    #[test]
    fn test_unconfigured_topic_detected() {
        let records = vec![plain(0, T1, Topic::Beh)];
        assert_eq!(
            verify(&records, &GeneratorConfig::default()),
            Err(Violation::UnexpectedTopic { index: 0, topic: Topic::Beh })
        );
    }

    #[test]
    fn test_unpaired_send_detected() {
        let records = vec![
            acl(1, ACL_SEND, 1, 2, T1),
            acl(3, ACL_SEND, 3, 0, T2),
            acl(0, ACL_RECEIVE, 3, 0, T2),
        ];
        assert_eq!(
            verify(&records, &GeneratorConfig::default()),
            Err(Violation::UnpairedSend { index: 0 })
        );
    }

    #[test]
    fn test_unpaired_receive_detected() {
        let records = vec![acl(2, ACL_RECEIVE, 1, 2, T1)];
        assert_eq!(
            verify(&records, &GeneratorConfig::default()),
            Err(Violation::UnpairedReceive { index: 0 })
        );
    }

    #[test]
    fn test_self_message_detected() {
        let records = vec![acl(1, ACL_SEND, 1, 1, T1), acl(1, ACL_RECEIVE, 1, 1, T1)];
        assert_eq!(
            verify(&records, &GeneratorConfig::default()),
            Err(Violation::SelfMessage { index: 0, agent: AgentId(1) })
        );
    }

    #[test]
    fn test_receiver_record_on_wrong_agent_detected() {
        let records = vec![acl(1, ACL_SEND, 1, 2, T1), acl(3, ACL_RECEIVE, 1, 2, T1)];
        assert_eq!(
            verify(&records, &GeneratorConfig::default()),
            Err(Violation::PairMismatch { index: 1 })
        );
    }

    #[test]
    fn test_payload_timestamp_mismatch_detected() {
        let mut send = acl(1, ACL_SEND, 1, 2, T1);
        send.data = format!("Sender: 1;Receiver: 2;Timestamp: {}", T2);
        assert_eq!(
            verify(&[send], &GeneratorConfig::default()),
            Err(Violation::PairMismatch { index: 0 })
        );
    }

    #[test]
    fn test_plain_record_with_payload_detected() {
        let mut record = plain(0, T1, Topic::Status);
        record.data = "leftover".to_string();
        assert_eq!(
            verify(&[record], &GeneratorConfig::default()),
            Err(Violation::MalformedPayload { index: 0 })
        );
    }

    #[test]
    fn test_wrong_mas_id_detected() {
        let config = GeneratorConfig {
            mas_id: MasId(2),
            ..Default::default()
        };
        assert_eq!(
            verify(&[plain(0, T1, Topic::App)], &config),
            Err(Violation::WrongMasId { index: 0, found: MasId(0), expected: MasId(2) })
        );
    }
}
