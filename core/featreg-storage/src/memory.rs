//! In-memory registry, for tests and embedding.

use crate::repository::{FeatureSetRepository, ProjectRepository, StoreRepository};
use crate::{check_version, StorageError, StorageResult};
use featreg_model::{FeatureSet, Pattern, Project, Store};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

#[derive(Default)]
struct Inner {
    /// Keyed by (name, project) so iteration is already in listing order.
    feature_sets: BTreeMap<(String, String), FeatureSet>,
    projects: BTreeMap<String, Project>,
    stores: BTreeMap<String, Store>,
}

/// A registry held entirely in memory. Implements every repository trait.
#[derive(Default)]
pub struct MemoryRegistry {
    inner: Mutex<Inner>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, Inner>> {
        self.inner.lock().map_err(|_| StorageError::Poisoned)
    }

    /// Marks a project archived, creating it if needed.
    pub fn archive_project(&self, name: &str) -> StorageResult<()> {
        let mut inner = self.lock()?;
        inner
            .projects
            .entry(name.to_string())
            .or_insert_with(|| Project::new(name))
            .archived = true;
        debug!("Archived project {}", name);
        Ok(())
    }

    fn collect<F>(&self, keep: F) -> StorageResult<Vec<FeatureSet>>
    where
        F: Fn(&FeatureSet) -> bool,
    {
        let inner = self.lock()?;
        Ok(inner
            .feature_sets
            .values()
            .filter(|fs| keep(fs))
            .cloned()
            .collect())
    }
}

impl FeatureSetRepository for MemoryRegistry {
    fn find_by_name_and_project(&self, name: &str, project: &str) -> StorageResult<Option<FeatureSet>> {
        let inner = self.lock()?;
        Ok(inner
            .feature_sets
            .get(&(name.to_string(), project.to_string()))
            .cloned())
    }

    fn find_all_order_by_name(&self) -> StorageResult<Vec<FeatureSet>> {
        self.collect(|_| true)
    }

    fn find_all_by_name_pattern_and_project(
        &self,
        name: &Pattern,
        project: &str,
    ) -> StorageResult<Vec<FeatureSet>> {
        self.collect(|fs| fs.project == project && name.matches(&fs.name))
    }

    fn find_all_by_name_pattern_and_project_pattern(
        &self,
        name: &Pattern,
        project: &Pattern,
    ) -> StorageResult<Vec<FeatureSet>> {
        self.collect(|fs| project.matches(&fs.project) && name.matches(&fs.name))
    }

    fn save(&self, feature_set: &FeatureSet) -> StorageResult<()> {
        let mut inner = self.lock()?;
        let key = (feature_set.name.clone(), feature_set.project.clone());
        let found = inner.feature_sets.get(&key).map(|fs| fs.version);
        check_version(feature_set, found)?;
        inner.feature_sets.insert(key, feature_set.clone());
        debug!(
            "Saved feature set {}/{} v{}",
            feature_set.project, feature_set.name, feature_set.version
        );
        Ok(())
    }
}

impl ProjectRepository for MemoryRegistry {
    fn find_project(&self, name: &str) -> StorageResult<Option<Project>> {
        Ok(self.lock()?.projects.get(name).cloned())
    }

    fn find_all_active_projects(&self) -> StorageResult<Vec<Project>> {
        let inner = self.lock()?;
        Ok(inner
            .projects
            .values()
            .filter(|p| !p.archived)
            .cloned()
            .collect())
    }

    fn save_project(&self, project: &Project) -> StorageResult<()> {
        self.lock()?
            .projects
            .insert(project.name.clone(), project.clone());
        Ok(())
    }
}

impl StoreRepository for MemoryRegistry {
    fn find_store(&self, name: &str) -> StorageResult<Option<Store>> {
        Ok(self.lock()?.stores.get(name).cloned())
    }

    fn find_all_stores(&self) -> StorageResult<Vec<Store>> {
        Ok(self.lock()?.stores.values().cloned().collect())
    }

    fn save_store(&self, store: &Store) -> StorageResult<()> {
        self.lock()?.stores.insert(store.name.clone(), store.clone());
        Ok(())
    }
}
