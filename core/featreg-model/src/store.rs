use crate::wire;
use crate::{FeatureSet, ModelError, ModelResult, Pattern};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Kind of serving or warehouse store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreType {
    Redis,
    RedisCluster,
    Bigquery,
    Cassandra,
}

impl fmt::Display for StoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Redis => "redis",
            Self::RedisCluster => "redis_cluster",
            Self::Bigquery => "bigquery",
            Self::Cassandra => "cassandra",
        };
        f.write_str(name)
    }
}

/// A (project, feature set name) pair a store wants populated.
///
/// Either side may use `*` wildcards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Subscription {
    pub project: String,
    pub name: String,
}

impl Subscription {
    pub fn new(project: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            name: name.into(),
        }
    }

    /// Returns true if the feature set identified by `project` and `name`
    /// falls under this subscription.
    pub fn matches(&self, project: &str, name: &str) -> bool {
        Pattern::new(&self.project).matches(project) && Pattern::new(&self.name).matches(name)
    }
}

impl fmt::Display for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.project, self.name)
    }
}

/// A store configuration.
///
/// Stores are not versioned: an update either matches the stored value
/// exactly or replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    pub name: String,
    pub store_type: StoreType,
    /// Store-specific connection settings, kept as opaque bytes.
    pub config: Vec<u8>,
    pub subscriptions: BTreeSet<Subscription>,
}

impl Store {
    pub fn new(name: impl Into<String>, store_type: StoreType) -> Self {
        Self {
            name: name.into(),
            store_type,
            config: Vec::new(),
            subscriptions: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: impl Into<Vec<u8>>) -> Self {
        self.config = config.into();
        self
    }

    #[must_use]
    pub fn with_subscription(mut self, subscription: Subscription) -> Self {
        self.subscriptions.insert(subscription);
        self
    }

    pub fn from_wire(message: wire::Store) -> ModelResult<Self> {
        let config =
            hex::decode(&message.config).map_err(|e| ModelError::InvalidConfig(e.to_string()))?;
        Ok(Self {
            name: message.name,
            store_type: message.store_type,
            config,
            subscriptions: message.subscriptions.into_iter().collect(),
        })
    }

    /// Converts into the wire form. Subscriptions come out sorted.
    pub fn to_wire(&self) -> wire::Store {
        wire::Store {
            name: self.name.clone(),
            store_type: self.store_type,
            config: hex::encode(&self.config),
            subscriptions: self.subscriptions.iter().cloned().collect(),
        }
    }

    /// Returns true if any subscription covers the feature set.
    pub fn is_subscribed_to(&self, feature_set: &FeatureSet) -> bool {
        self.subscriptions
            .iter()
            .any(|sub| sub.matches(&feature_set.project, &feature_set.name))
    }
}
