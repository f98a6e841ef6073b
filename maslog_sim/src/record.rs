//! Log record types.
//!
//! Synthesis works on [`LogEvent`]s, which carry a real timestamp so they
//! can be ordered. Once sorted, each event is rendered into a
//! [`LogRecord`], the shape written to the log file.

use crate::topics::Topic;
use chrono::NaiveDateTime;
use maslog_env::{format_timestamp, AgentId, MasId};
use serde::{Deserialize, Serialize};

/// Message label of the sending side of an ACL exchange.
pub const ACL_SEND: &str = "ACL send";

/// Message label of the receiving side of an ACL exchange.
pub const ACL_RECEIVE: &str = "ACL receive";

/// Message label of every non-communication record.
pub const PLAIN_MESSAGE: &str = "msg";

/// A synthesized event, prior to timestamp rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    pub mas_id: MasId,
    pub agent_id: AgentId,
    pub timestamp: NaiveDateTime,
    pub topic: Topic,
    pub message: &'static str,
    pub data: String,
}

impl LogEvent {
    /// Creates a single record event with an empty payload.
    pub fn plain(mas_id: MasId, agent_id: AgentId, timestamp: NaiveDateTime, topic: Topic) -> Self {
        Self {
            mas_id,
            agent_id,
            timestamp,
            topic,
            message: PLAIN_MESSAGE,
            data: String::new(),
        }
    }

    /// Creates the sender and receiver events of one ACL exchange.
    ///
    /// Both share `timestamp` and carry the same payload.
    pub fn acl_pair(
        mas_id: MasId,
        sender: AgentId,
        receiver: AgentId,
        timestamp: NaiveDateTime,
    ) -> [LogEvent; 2] {
        let payload = AclPayload {
            sender,
            receiver,
            timestamp: format_timestamp(&timestamp),
        }
        .to_string();

        [
            Self {
                mas_id,
                agent_id: sender,
                timestamp,
                topic: Topic::Msg,
                message: ACL_SEND,
                data: payload.clone(),
            },
            Self {
                mas_id,
                agent_id: receiver,
                timestamp,
                topic: Topic::Msg,
                message: ACL_RECEIVE,
                data: payload,
            },
        ]
    }

    /// Renders the event into its serialized form.
    pub fn render(self) -> LogRecord {
        LogRecord {
            mas_id: self.mas_id,
            agent_id: self.agent_id,
            timestamp: format_timestamp(&self.timestamp),
            topic: self.topic,
            message: self.message.to_string(),
            data: self.data,
        }
    }
}

/// A log entry as written to `logs.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// ID of the MAS the agent runs in
    #[serde(rename = "masid")]
    pub mas_id: MasId,

    /// ID of the emitting agent
    #[serde(rename = "agentid")]
    pub agent_id: AgentId,

    /// `YYYY-MM-DDTHH:MM:SS`
    pub timestamp: String,

    pub topic: Topic,

    #[serde(rename = "msg")]
    pub message: String,

    /// Empty unless `topic` is `msg`
    pub data: String,
}

impl LogRecord {
    /// Parses the ACL payload, if this record carries one.
    pub fn acl_payload(&self) -> Option<AclPayload> {
        AclPayload::parse(&self.data)
    }
}

/// Structured form of an ACL payload:
/// `Sender: <id>;Receiver: <id>;Timestamp: <YYYY-MM-DDTHH:MM:SS>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AclPayload {
    pub sender: AgentId,
    pub receiver: AgentId,
    pub timestamp: String,
}

impl AclPayload {
    /// Parses payload text; `None` if it does not follow the layout.
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts = text.splitn(3, ';');
        let sender = parts.next()?.strip_prefix("Sender: ")?.parse().ok()?;
        let receiver = parts.next()?.strip_prefix("Receiver: ")?.parse().ok()?;
        let timestamp = parts.next()?.strip_prefix("Timestamp: ")?.to_string();

        Some(Self {
            sender: AgentId(sender),
            receiver: AgentId(receiver),
            timestamp,
        })
    }
}

impl std::fmt::Display for AclPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Sender: {};Receiver: {};Timestamp: {}",
            self.sender, self.receiver, self.timestamp
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 11, 5)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_plain_event_render() {
        let record = LogEvent::plain(MasId(0), AgentId(3), at(8, 0, 1), Topic::Status).render();
        assert_eq!(record.timestamp, "2023-11-05T08:00:01");
        assert_eq!(record.message, "msg");
        assert!(record.data.is_empty());
        assert_eq!(record.topic, Topic::Status);
    }

    #[test]
    fn test_acl_pair() {
        let [send, recv] = LogEvent::acl_pair(MasId(0), AgentId(1), AgentId(3), at(9, 15, 0));

        assert_eq!(send.agent_id, AgentId(1));
        assert_eq!(send.message, ACL_SEND);
        assert_eq!(recv.agent_id, AgentId(3));
        assert_eq!(recv.message, ACL_RECEIVE);
        assert_eq!(send.timestamp, recv.timestamp);
        assert_eq!(send.data, "Sender: 1;Receiver: 3;Timestamp: 2023-11-05T09:15:00");
        assert_eq!(send.data, recv.data);
    }

    #[test]
    fn test_record_json_keys() {
        let record = LogEvent::plain(MasId(0), AgentId(2), at(0, 0, 0), Topic::App).render();
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"masid":0,"agentid":2,"timestamp":"2023-11-05T00:00:00","topic":"app","msg":"msg","data":""}"#
        );
    }

    #[test]
    fn test_acl_payload_parse() {
        let payload = AclPayload::parse("Sender: 4;Receiver: 0;Timestamp: 2023-11-05T09:15:00").unwrap();
        assert_eq!(payload.sender, AgentId(4));
        assert_eq!(payload.receiver, AgentId(0));
        assert_eq!(payload.timestamp, "2023-11-05T09:15:00");
        assert_eq!(payload.to_string(), "Sender: 4;Receiver: 0;Timestamp: 2023-11-05T09:15:00");
    }

    #[test]
    fn test_acl_payload_parse_rejects_garbage() {
        assert!(AclPayload::parse("").is_none());
        assert!(AclPayload::parse("Sender: x;Receiver: 0;Timestamp: t").is_none());
        assert!(AclPayload::parse("Sender: 1;Timestamp: t").is_none());
    }
}
