#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use featreg_model::wire::{self, EntitySpec, FeatureSpec};
use featreg_model::{
    FeatureSet, Pattern, Project, Source, Store, StoreType, Subscription, ValueType,
    DEFAULT_PROJECT_NAME,
};
use featreg_service::{FixedClock, SpecService, SpecServiceConfig};
use featreg_storage::{
    FeatureSetRepository, MemoryRegistry, ProjectRepository, StorageResult, StoreRepository,
};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// ── Recording registry ───────────────────────────────────────────

/// Wraps a [`MemoryRegistry`] and counts every save that goes through it.
#[derive(Default)]
pub struct RecordingRegistry {
    pub inner: MemoryRegistry,
    feature_set_saves: AtomicUsize,
    project_saves: AtomicUsize,
    store_saves: AtomicUsize,
}

impl RecordingRegistry {
    pub fn feature_set_saves(&self) -> usize {
        self.feature_set_saves.load(Ordering::SeqCst)
    }

    pub fn project_saves(&self) -> usize {
        self.project_saves.load(Ordering::SeqCst)
    }

    pub fn store_saves(&self) -> usize {
        self.store_saves.load(Ordering::SeqCst)
    }

    pub fn total_saves(&self) -> usize {
        self.feature_set_saves() + self.project_saves() + self.store_saves()
    }
}

impl FeatureSetRepository for RecordingRegistry {
    fn find_by_name_and_project(&self, name: &str, project: &str) -> StorageResult<Option<FeatureSet>> {
        self.inner.find_by_name_and_project(name, project)
    }

    fn find_all_order_by_name(&self) -> StorageResult<Vec<FeatureSet>> {
        self.inner.find_all_order_by_name()
    }

    fn find_all_by_name_pattern_and_project(
        &self,
        name: &Pattern,
        project: &str,
    ) -> StorageResult<Vec<FeatureSet>> {
        self.inner.find_all_by_name_pattern_and_project(name, project)
    }

    fn find_all_by_name_pattern_and_project_pattern(
        &self,
        name: &Pattern,
        project: &Pattern,
    ) -> StorageResult<Vec<FeatureSet>> {
        self.inner.find_all_by_name_pattern_and_project_pattern(name, project)
    }

    fn save(&self, feature_set: &FeatureSet) -> StorageResult<()> {
        self.feature_set_saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(feature_set)
    }
}

impl ProjectRepository for RecordingRegistry {
    fn find_project(&self, name: &str) -> StorageResult<Option<Project>> {
        self.inner.find_project(name)
    }

    fn find_all_active_projects(&self) -> StorageResult<Vec<Project>> {
        self.inner.find_all_active_projects()
    }

    fn save_project(&self, project: &Project) -> StorageResult<()> {
        self.project_saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save_project(project)
    }
}

impl StoreRepository for RecordingRegistry {
    fn find_store(&self, name: &str) -> StorageResult<Option<Store>> {
        self.inner.find_store(name)
    }

    fn find_all_stores(&self) -> StorageResult<Vec<Store>> {
        self.inner.find_all_stores()
    }

    fn save_store(&self, store: &Store) -> StorageResult<()> {
        self.store_saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save_store(store)
    }
}

/// Feature set repository whose point lookup always returns a frozen copy,
/// as a caller that read just before a concurrent apply would see it.
pub struct StaleReads {
    pub inner: Arc<MemoryRegistry>,
    pub frozen: FeatureSet,
}

impl FeatureSetRepository for StaleReads {
    fn find_by_name_and_project(&self, _name: &str, _project: &str) -> StorageResult<Option<FeatureSet>> {
        Ok(Some(self.frozen.clone()))
    }

    fn find_all_order_by_name(&self) -> StorageResult<Vec<FeatureSet>> {
        self.inner.find_all_order_by_name()
    }

    fn find_all_by_name_pattern_and_project(
        &self,
        name: &Pattern,
        project: &str,
    ) -> StorageResult<Vec<FeatureSet>> {
        self.inner.find_all_by_name_pattern_and_project(name, project)
    }

    fn find_all_by_name_pattern_and_project_pattern(
        &self,
        name: &Pattern,
        project: &Pattern,
    ) -> StorageResult<Vec<FeatureSet>> {
        self.inner.find_all_by_name_pattern_and_project_pattern(name, project)
    }

    fn save(&self, feature_set: &FeatureSet) -> StorageResult<()> {
        self.inner.save(feature_set)
    }
}

// ── Builders ─────────────────────────────────────────────────────

pub fn created_at() -> DateTime<Utc> {
    Utc.timestamp_opt(10, 0).unwrap()
}

pub fn now() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap()
}

pub fn default_source() -> Source {
    SpecServiceConfig::default().default_source
}

pub fn entity(name: &str, value_type: ValueType) -> EntitySpec {
    EntitySpec::new(name, value_type)
}

pub fn feature(name: &str, value_type: ValueType) -> FeatureSpec {
    FeatureSpec::new(name, value_type)
}

pub fn labels(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// An incoming feature set with no version, source or timestamp.
pub fn wire_feature_set(
    name: &str,
    project: &str,
    entities: Vec<EntitySpec>,
    features: Vec<FeatureSpec>,
) -> wire::FeatureSet {
    wire::FeatureSet {
        spec: wire::FeatureSetSpec {
            project: project.into(),
            name: name.into(),
            entities,
            features,
            ..Default::default()
        },
        meta: wire::FeatureSetMeta::default(),
    }
}

/// One `entity` entity and one `feature` feature labelled `key=value`.
pub fn dummy_feature_set(name: &str, project: &str) -> wire::FeatureSet {
    wire_feature_set(
        name,
        project,
        vec![entity("entity", ValueType::String)],
        vec![feature("feature", ValueType::String).with_label("key", "value")],
    )
}

/// The stored form of an incoming feature set: version 1, default source.
pub fn stored(mut message: wire::FeatureSet) -> FeatureSet {
    message.spec.version = 1;
    message.spec.source.get_or_insert_with(default_source);
    message.meta.created_timestamp = Some(created_at());
    FeatureSet::from_wire(message).unwrap()
}

pub fn dummy_store(name: &str) -> Store {
    Store::new(name, StoreType::Redis)
        .with_config(vec![0x10, 0xeb, 0x31])
        .with_subscription(Subscription::new("*", "*"))
}

// ── Fixture ──────────────────────────────────────────────────────

/// The seeded feature sets, in the order they were saved.
///
/// | name | project  | entities | features                    |
/// |------|----------|----------|-----------------------------|
/// | f1   | project1 | entity   | feature                     |
/// | f2   | project1 | entity   | feature                     |
/// | f3   | project1 | f3e1     | f3f2, f3f1                  |
/// | f4   | default  | entity   | feature                     |
/// | f5   | default  | entity   | feature (fsLabel1)          |
/// | f6   | default  | entity   | feature (fsLabel1, fsLabel2)|
/// | f7   | project2 | f7e1     | f3f1, f3f2, f7f1 (key1)     |
/// | f8   | project2 | f7e1     | f3f1, f8f1 (key2)           |
/// | f9   | default  | f9e1     | f3f1, f8f1 (key2)           |
pub fn seed_feature_sets() -> Vec<FeatureSet> {
    let f3f1 = feature("f3f1", ValueType::Int64);
    let f3f2 = feature("f3f2", ValueType::Int64);
    let f7f1 = feature("f7f1", ValueType::Int64).with_label("key1", "val1");
    let f8f1 = feature("f8f1", ValueType::Int64).with_label("key2", "val2");

    let mut f5 = dummy_feature_set("f5", DEFAULT_PROJECT_NAME);
    f5.spec.labels = labels(&[("fsLabel1", "fsValue1")]);
    let mut f6 = dummy_feature_set("f6", DEFAULT_PROJECT_NAME);
    f6.spec.labels = labels(&[("fsLabel1", "fsValue1"), ("fsLabel2", "fsValue2")]);

    vec![
        dummy_feature_set("f1", "project1"),
        dummy_feature_set("f2", "project1"),
        wire_feature_set(
            "f3",
            "project1",
            vec![entity("f3e1", ValueType::String)],
            vec![f3f2.clone(), f3f1.clone()],
        ),
        dummy_feature_set("f4", DEFAULT_PROJECT_NAME),
        f5,
        f6,
        wire_feature_set(
            "f7",
            "project2",
            vec![entity("f7e1", ValueType::String)],
            vec![f3f1.clone(), f3f2, f7f1],
        ),
        wire_feature_set(
            "f8",
            "project2",
            vec![entity("f7e1", ValueType::String)],
            vec![f3f1.clone(), f8f1.clone()],
        ),
        wire_feature_set(
            "f9",
            DEFAULT_PROJECT_NAME,
            vec![entity("f9e1", ValueType::String)],
            vec![f3f1, f8f1],
        ),
    ]
    .into_iter()
    .map(stored)
    .collect()
}

pub struct Fixture {
    pub registry: Arc<RecordingRegistry>,
    pub service: SpecService,
    pub feature_sets: Vec<FeatureSet>,
}

/// A service over a registry seeded with [`seed_feature_sets`], the active
/// projects `default`, `project1` and `project2`, the archived project
/// `archivedproject`, and the stores `SERVING` and `WAREHOUSE`. Seeding does
/// not count towards the recorded saves.
pub fn fixture() -> Fixture {
    let registry = Arc::new(RecordingRegistry::default());
    let feature_sets = seed_feature_sets();
    for fs in &feature_sets {
        registry.inner.save(fs).unwrap();
    }
    for name in [DEFAULT_PROJECT_NAME, "project1", "project2"] {
        registry.inner.save_project(&Project::new(name)).unwrap();
    }
    registry.inner.archive_project("archivedproject").unwrap();
    registry.inner.save_store(&dummy_store("SERVING")).unwrap();
    registry.inner.save_store(&dummy_store("WAREHOUSE")).unwrap();

    let service = SpecService::with_registry(registry.clone(), SpecServiceConfig::default())
        .with_clock(Arc::new(FixedClock(now())));

    Fixture {
        registry,
        service,
        feature_sets,
    }
}

impl Fixture {
    /// The seeded feature set with this name, in wire form.
    pub fn wire(&self, name: &str) -> wire::FeatureSet {
        self.feature_sets
            .iter()
            .find(|fs| fs.name == name)
            .map(FeatureSet::to_wire)
            .unwrap()
    }

    pub fn wires(&self, names: &[&str]) -> Vec<wire::FeatureSet> {
        names.iter().map(|name| self.wire(name)).collect()
    }
}
