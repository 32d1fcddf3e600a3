use serde::{Deserialize, Serialize};

/// Where a feature set's rows are ingested from.
///
/// Serialized with a `type` tag, e.g.
/// `{"type": "kafka", "bootstrap_servers": "kafka:9092", "topic": "features"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Source {
    Kafka {
        bootstrap_servers: String,
        topic: String,
    },
}

impl Source {
    /// Shorthand for a Kafka source.
    pub fn kafka(bootstrap_servers: impl Into<String>, topic: impl Into<String>) -> Self {
        Self::Kafka {
            bootstrap_servers: bootstrap_servers.into(),
            topic: topic.into(),
        }
    }
}
