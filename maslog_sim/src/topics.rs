//! Log topic categories.

use maslog_env::GenError;
use serde::{Deserialize, Serialize};

/// Topic identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    /// Agent-side failures
    Error,

    /// Developer diagnostics
    Debug,

    /// ACL message passing between two agents
    Msg,

    /// Lifecycle and health reports
    Status,

    /// Application output
    App,

    /// Behaviour traces (known to the logger, not generated by default)
    Beh,
}

impl Topic {
    /// Returns every known topic.
    pub fn all() -> Vec<Topic> {
        vec![
            Topic::Error,
            Topic::Debug,
            Topic::Msg,
            Topic::Status,
            Topic::App,
            Topic::Beh,
        ]
    }

    /// Returns the topics generated by default, in generation order.
    pub fn defaults() -> Vec<Topic> {
        vec![
            Topic::Error,
            Topic::Debug,
            Topic::Msg,
            Topic::Status,
            Topic::App,
        ]
    }

    /// Returns the topic name as written to the log file.
    pub fn name(&self) -> &'static str {
        match self {
            Topic::Error => "error",
            Topic::Debug => "debug",
            Topic::Msg => "msg",
            Topic::Status => "status",
            Topic::App => "app",
            Topic::Beh => "beh",
        }
    }

    /// Returns true for the topic that produces send/receive pairs.
    pub fn is_communication(&self) -> bool {
        matches!(self, Topic::Msg)
    }

    /// Parses a comma separated topic list (`"error,msg,app"`).
    pub fn parse_list(list: &str) -> Result<Vec<Topic>, GenError> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Topic {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Topic::Error),
            "debug" => Ok(Topic::Debug),
            "msg" | "message" => Ok(Topic::Msg),
            "status" => Ok(Topic::Status),
            "app" => Ok(Topic::App),
            "beh" | "behavior" | "behaviour" => Ok(Topic::Beh),
            _ => Err(GenError::invalid_topic(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_topics_exclude_beh() {
        let defaults = Topic::defaults();
        assert_eq!(defaults.len(), 5);
        assert!(!defaults.contains(&Topic::Beh));
        assert_eq!(Topic::all().len(), 6);
    }

    #[test]
    fn test_only_msg_is_communication() {
        let comm: Vec<_> = Topic::all().into_iter().filter(|t| t.is_communication()).collect();
        assert_eq!(comm, vec![Topic::Msg]);
    }

    #[test]
    fn test_topic_parse() {
        assert_eq!("MSG".parse::<Topic>().unwrap(), Topic::Msg);
        assert_eq!("status".parse::<Topic>().unwrap(), Topic::Status);
        assert!(matches!("chatter".parse::<Topic>(), Err(GenError::InvalidTopic(_))));
    }

    #[test]
    fn test_topic_parse_list() {
        let topics = Topic::parse_list("error, msg,,app").unwrap();
        assert_eq!(topics, vec![Topic::Error, Topic::Msg, Topic::App]);
        assert!(Topic::parse_list("error,nope").is_err());
    }

    #[test]
    fn test_topic_serializes_lowercase() {
        for topic in Topic::all() {
            let json = serde_json::to_string(&topic).unwrap();
            assert_eq!(json, format!("\"{}\"", topic.name()));
        }
    }
}
