use crate::wire;
use crate::{ModelError, ModelResult, Source, ValueType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Opaque constraint payload attached to a feature.
///
/// Holds presence, shape and domain descriptors exactly as the caller sent
/// them. The registry never interprets these values; it only copies them and
/// compares them structurally.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Constraints(serde_json::Map<String, serde_json::Value>);

impl Constraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&serde_json::Value> {
        self.0.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: serde_json::Value) {
        self.0.insert(field.into(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// An entity (join key) of a feature set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entity {
    pub name: String,
    pub value_type: ValueType,
}

/// A feature of a feature set.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub name: String,
    pub value_type: ValueType,
    pub labels: BTreeMap<String, String>,
    pub constraints: Constraints,
}

/// A versioned, project-scoped group of features sharing the same entities.
///
/// Entities and features are keyed by name, so the order in which a caller
/// lists them has no effect on equality.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSet {
    pub name: String,
    pub project: String,
    pub version: u32,
    pub entities: BTreeMap<String, Entity>,
    pub features: BTreeMap<String, Feature>,
    pub max_age: Duration,
    pub source: Option<Source>,
    pub labels: BTreeMap<String, String>,
    /// Set when the feature set is first stored, then never changed.
    pub created: Option<DateTime<Utc>>,
}

/// Returns true if every entry of `filter` is present in `labels` with the
/// same value. An empty filter matches everything.
pub fn labels_match(labels: &BTreeMap<String, String>, filter: &BTreeMap<String, String>) -> bool {
    filter
        .iter()
        .all(|(key, value)| labels.get(key).is_some_and(|v| v == value))
}

impl Entity {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
        }
    }

    pub fn from_wire(spec: wire::EntitySpec) -> Self {
        Self {
            name: spec.name,
            value_type: spec.value_type,
        }
    }

    pub fn to_wire(&self) -> wire::EntitySpec {
        wire::EntitySpec {
            name: self.name.clone(),
            value_type: self.value_type,
        }
    }
}

impl Feature {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            labels: BTreeMap::new(),
            constraints: Constraints::new(),
        }
    }

    pub fn from_wire(spec: wire::FeatureSpec) -> Self {
        Self {
            name: spec.name,
            value_type: spec.value_type,
            labels: spec.labels,
            constraints: spec.constraints,
        }
    }

    pub fn to_wire(&self) -> wire::FeatureSpec {
        wire::FeatureSpec {
            name: self.name.clone(),
            value_type: self.value_type,
            labels: self.labels.clone(),
            constraints: self.constraints.clone(),
        }
    }

    /// Label subset match against this feature's own labels.
    pub fn has_all_labels(&self, filter: &BTreeMap<String, String>) -> bool {
        labels_match(&self.labels, filter)
    }
}

impl FeatureSet {
    /// Creates an empty, unversioned feature set.
    pub fn new(name: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            project: project.into(),
            version: 0,
            entities: BTreeMap::new(),
            features: BTreeMap::new(),
            max_age: Duration::ZERO,
            source: None,
            labels: BTreeMap::new(),
            created: None,
        }
    }

    /// Adds an entity, replacing any entity with the same name.
    #[must_use]
    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entities.insert(entity.name.clone(), entity);
        self
    }

    /// Adds a feature, replacing any feature with the same name.
    #[must_use]
    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.insert(feature.name.clone(), feature);
        self
    }

    /// Converts the wire form into a feature set.
    ///
    /// Fails if two entities or two features share a name; keying them by
    /// name would otherwise drop one silently.
    pub fn from_wire(message: wire::FeatureSet) -> ModelResult<Self> {
        let spec = message.spec;

        let mut entities = BTreeMap::new();
        for entity in spec.entities {
            if entities.contains_key(&entity.name) {
                return Err(ModelError::DuplicateName(entity.name));
            }
            entities.insert(entity.name.clone(), Entity::from_wire(entity));
        }

        let mut features = BTreeMap::new();
        for feature in spec.features {
            if features.contains_key(&feature.name) {
                return Err(ModelError::DuplicateName(feature.name));
            }
            features.insert(feature.name.clone(), Feature::from_wire(feature));
        }

        Ok(Self {
            name: spec.name,
            project: spec.project,
            version: spec.version,
            entities,
            features,
            max_age: Duration::from_secs(spec.max_age),
            source: spec.source,
            labels: spec.labels,
            created: message.meta.created_timestamp,
        })
    }

    /// Converts into the wire form. Entities and features come out in name order.
    pub fn to_wire(&self) -> wire::FeatureSet {
        wire::FeatureSet {
            spec: wire::FeatureSetSpec {
                project: self.project.clone(),
                name: self.name.clone(),
                version: self.version,
                entities: self.entities.values().map(Entity::to_wire).collect(),
                features: self.features.values().map(Feature::to_wire).collect(),
                max_age: self.max_age.as_secs(),
                source: self.source.clone(),
                labels: self.labels.clone(),
            },
            meta: wire::FeatureSetMeta {
                created_timestamp: self.created,
            },
        }
    }

    /// Semantic equality: same name, project, source, max age, labels,
    /// entities and features. Version and creation time are not compared.
    pub fn equal_spec(&self, other: &FeatureSet) -> bool {
        self.name == other.name
            && self.project == other.project
            && self.source == other.source
            && self.max_age == other.max_age
            && self.labels == other.labels
            && self.entities == other.entities
            && self.features == other.features
    }

    /// Label subset match against the feature set's own labels.
    pub fn has_all_labels(&self, filter: &BTreeMap<String, String>) -> bool {
        labels_match(&self.labels, filter)
    }

    /// Returns true if every named entity is part of this feature set.
    pub fn has_all_entities<S: AsRef<str>>(&self, names: &[S]) -> bool {
        names
            .iter()
            .all(|name| self.entities.contains_key(name.as_ref()))
    }

    /// Features whose labels contain `filter`, keyed by their [`FeatureKey`].
    pub fn features_by_key(&self, filter: &BTreeMap<String, String>) -> BTreeMap<FeatureKey, &Feature> {
        self.features
            .values()
            .filter(|feature| feature.has_all_labels(filter))
            .map(|feature| (FeatureKey::new(&self.project, &self.name, &feature.name), feature))
            .collect()
    }
}

/// Identifies one feature of one feature set in one project.
///
/// Rendered as `project/feature_set:feature`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeatureKey {
    pub project: String,
    pub feature_set: String,
    pub feature: String,
}

impl FeatureKey {
    pub fn new(
        project: impl Into<String>,
        feature_set: impl Into<String>,
        feature: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            feature_set: feature_set.into(),
            feature: feature.into(),
        }
    }
}

impl fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}:{}", self.project, self.feature_set, self.feature)
    }
}

impl FromStr for FeatureKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (project, rest) = s
            .split_once('/')
            .ok_or_else(|| ModelError::InvalidFeatureKey(s.to_string()))?;
        let (feature_set, feature) = rest
            .split_once(':')
            .ok_or_else(|| ModelError::InvalidFeatureKey(s.to_string()))?;
        if feature_set.is_empty() || feature.is_empty() {
            return Err(ModelError::InvalidFeatureKey(s.to_string()));
        }
        Ok(Self::new(project, feature_set, feature))
    }
}

impl Serialize for FeatureKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FeatureKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
