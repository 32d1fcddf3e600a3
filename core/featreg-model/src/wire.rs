//! JSON messages exchanged with callers.
//!
//! These mirror the shapes clients send: entities, features and subscriptions
//! are plain lists here and only become sets when converted into the model
//! types. Storage persists feature sets and stores in this form as well.

use crate::{Source, StoreType, Subscription, ValueType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use crate::feature_set::Constraints;

/// A feature set as sent to and returned from the registry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureSet {
    pub spec: FeatureSetSpec,
    #[serde(default)]
    pub meta: FeatureSetMeta,
}

/// The declarative part of a feature set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureSetSpec {
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub name: String,
    /// Assigned by the registry; ignored on apply.
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub entities: Vec<EntitySpec>,
    #[serde(default)]
    pub features: Vec<FeatureSpec>,
    /// Maximum age of a feature row, in seconds. Zero means unset.
    #[serde(default)]
    pub max_age: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

/// Registry-owned metadata of a feature set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeatureSetMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_timestamp: Option<DateTime<Utc>>,
}

/// An entity (join key) column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpec {
    pub name: String,
    pub value_type: ValueType,
}

/// A feature column.
///
/// Every field other than `name`, `value_type` and `labels` (presence, shape,
/// domain descriptors, ...) is kept verbatim in `constraints`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSpec {
    pub name: String,
    pub value_type: ValueType,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(flatten)]
    pub constraints: Constraints,
}

/// A store as sent to and returned from the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub name: String,
    #[serde(rename = "type")]
    pub store_type: StoreType,
    /// Store-specific configuration, hex encoded.
    #[serde(default)]
    pub config: String,
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
}

impl EntitySpec {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
        }
    }
}

impl FeatureSpec {
    /// A feature with no labels and no constraints.
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            labels: BTreeMap::new(),
            constraints: Constraints::default(),
        }
    }

    /// Adds a label.
    #[must_use]
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Sets an opaque constraint field.
    #[must_use]
    pub fn with_constraint(mut self, field: impl Into<String>, value: serde_json::Value) -> Self {
        self.constraints.insert(field, value);
        self
    }
}
