//! Request filters and responses of the spec service.

use featreg_model::wire;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of applying a feature set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplyStatus {
    Created,
    Updated,
    NoChange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplyFeatureSetResponse {
    pub feature_set: wire::FeatureSet,
    pub status: ApplyStatus,
}

/// Outcome of updating a store. Stores have no separate created status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UpdateStoreStatus {
    Updated,
    NoChange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStoreResponse {
    pub store: wire::Store,
    pub status: UpdateStoreStatus,
}

/// Point lookup of one feature set. An empty project means the default project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetFeatureSetRequest {
    pub name: String,
    pub project: String,
}

impl GetFeatureSetRequest {
    pub fn new(project: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            project: project.into(),
        }
    }
}

/// Feature set listing filter.
///
/// `feature_set_name` and `project` accept `*` wildcards. An empty name
/// means every name; an empty project means the default project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListFeatureSetsFilter {
    pub feature_set_name: String,
    pub project: String,
    pub labels: BTreeMap<String, String>,
}

impl ListFeatureSetsFilter {
    pub fn new(project: impl Into<String>, feature_set_name: impl Into<String>) -> Self {
        Self {
            feature_set_name: feature_set_name.into(),
            project: project.into(),
            labels: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }
}

/// Feature listing filter. Entities and labels must all match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListFeaturesFilter {
    pub project: String,
    pub entities: Vec<String>,
    pub labels: BTreeMap<String, String>,
}

impl ListFeaturesFilter {
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entities.push(entity.into());
        self
    }

    #[must_use]
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }
}

/// Store listing filter. An empty name lists every store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListStoresFilter {
    pub name: String,
}

impl ListStoresFilter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
