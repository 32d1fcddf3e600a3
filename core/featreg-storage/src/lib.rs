//! Registry storage for featreg.
//!
//! Defines the repository traits the spec service is written against and two
//! implementations of all three:
//!
//! - [`MemoryRegistry`] keeps everything in ordered maps behind a mutex
//! - [`SqliteRegistry`] persists to SQLite, one row per feature set, project and store
//!
//! # Versioning
//!
//! [`FeatureSetRepository::save`] is a compare-and-swap on the feature set
//! version. Two writers that both computed version N+1 from the same stored
//! version N cannot both succeed; the loser gets
//! [`StorageError::VersionConflict`] and the registry is unchanged.

mod error;
mod memory;
mod repository;
mod sqlite;

pub use error::{StorageError, StorageResult};
pub use memory::MemoryRegistry;
pub use repository::{FeatureSetRepository, ProjectRepository, StoreRepository};
pub use sqlite::SqliteRegistry;

use featreg_model::FeatureSet;

/// Checks that `found` (the currently stored version, if any) is the one
/// `feature_set` was derived from.
pub(crate) fn check_version(feature_set: &FeatureSet, found: Option<u32>) -> StorageResult<()> {
    let expected = feature_set.version.saturating_sub(1);
    let found = found.unwrap_or(0);
    if feature_set.version == 0 || found != expected {
        return Err(StorageError::VersionConflict {
            name: feature_set.name.clone(),
            project: feature_set.project.clone(),
            expected,
            found,
        });
    }
    Ok(())
}
