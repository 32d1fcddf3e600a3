//! The spec service and its repository wiring.

use crate::config::{Clock, SpecServiceConfig, SystemClock};
use featreg_storage::{FeatureSetRepository, ProjectRepository, StoreRepository};
use std::sync::Arc;

/// Applies and queries feature sets, projects and stores.
///
/// The service holds no registry state of its own: every call reads from and
/// writes to the injected repositories. Operations are split across the
/// `apply`, `project`, `query` and `stores` modules.
pub struct SpecService {
    pub(crate) feature_sets: Arc<dyn FeatureSetRepository>,
    pub(crate) projects: Arc<dyn ProjectRepository>,
    pub(crate) stores: Arc<dyn StoreRepository>,
    pub(crate) config: SpecServiceConfig,
    pub(crate) clock: Arc<dyn Clock>,
}

impl SpecService {
    pub fn new(
        feature_sets: Arc<dyn FeatureSetRepository>,
        projects: Arc<dyn ProjectRepository>,
        stores: Arc<dyn StoreRepository>,
        config: SpecServiceConfig,
    ) -> Self {
        Self {
            feature_sets,
            projects,
            stores,
            config,
            clock: Arc::new(SystemClock),
        }
    }

    /// Builds a service over one registry that implements every repository.
    pub fn with_registry<R>(registry: Arc<R>, config: SpecServiceConfig) -> Self
    where
        R: FeatureSetRepository + ProjectRepository + StoreRepository + 'static,
    {
        Self::new(registry.clone(), registry.clone(), registry, config)
    }

    /// Replaces the clock used for creation timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &SpecServiceConfig {
        &self.config
    }

    /// Substitutes the default project for an empty project name.
    pub(crate) fn project_or_default<'a>(&'a self, project: &'a str) -> &'a str {
        if project.is_empty() {
            &self.config.default_project
        } else {
            project
        }
    }
}
