//! Repository traits consumed by the spec service.

use crate::StorageResult;
use featreg_model::{FeatureSet, Pattern, Project, Store};

/// Persistent feature sets, keyed by (name, project).
///
/// Every listing is ordered by name ascending, then project.
pub trait FeatureSetRepository: Send + Sync {
    /// Point lookup by exact name and project.
    fn find_by_name_and_project(&self, name: &str, project: &str) -> StorageResult<Option<FeatureSet>>;

    /// Every feature set in every project.
    fn find_all_order_by_name(&self) -> StorageResult<Vec<FeatureSet>>;

    /// Feature sets in exactly `project` whose name matches `name`.
    fn find_all_by_name_pattern_and_project(
        &self,
        name: &Pattern,
        project: &str,
    ) -> StorageResult<Vec<FeatureSet>>;

    /// Feature sets whose name and project both match.
    fn find_all_by_name_pattern_and_project_pattern(
        &self,
        name: &Pattern,
        project: &Pattern,
    ) -> StorageResult<Vec<FeatureSet>>;

    /// Stores a feature set, replacing the previous version.
    ///
    /// This is a compare-and-swap on version: it succeeds only if the stored
    /// version for the key is `feature_set.version - 1`, or if nothing is
    /// stored and `feature_set.version` is 1. Otherwise it fails with
    /// [`StorageError::VersionConflict`](crate::StorageError::VersionConflict)
    /// and nothing is written.
    fn save(&self, feature_set: &FeatureSet) -> StorageResult<()>;
}

/// Persistent projects, keyed by name.
pub trait ProjectRepository: Send + Sync {
    fn find_project(&self, name: &str) -> StorageResult<Option<Project>>;

    /// Projects that are not archived, ordered by name.
    fn find_all_active_projects(&self) -> StorageResult<Vec<Project>>;

    /// Create-or-replace.
    fn save_project(&self, project: &Project) -> StorageResult<()>;
}

/// Persistent stores, keyed by name.
pub trait StoreRepository: Send + Sync {
    fn find_store(&self, name: &str) -> StorageResult<Option<Store>>;

    /// Every store, ordered by name.
    fn find_all_stores(&self) -> StorageResult<Vec<Store>>;

    /// Create-or-replace.
    fn save_store(&self, store: &Store) -> StorageResult<()>;
}
