//! Diff and version engine for feature sets.

use crate::{ApplyFeatureSetResponse, ApplyStatus, SpecResult, SpecService};
use featreg_model::validate::validate_feature_set_spec;
use featreg_model::{wire, FeatureSet};
use tracing::{debug, info, warn};

impl SpecService {
    /// Creates or updates a feature set.
    ///
    /// The incoming version and creation time are ignored. A new feature set
    /// gets version 1; a changed one gets the stored version plus one and keeps
    /// the stored creation time; an unchanged one is returned as stored and
    /// nothing is written. Field order never counts as a change.
    pub fn apply_feature_set(&self, incoming: wire::FeatureSet) -> SpecResult<ApplyFeatureSetResponse> {
        validate_feature_set_spec(&incoming.spec)?;
        let project = self.resolve_project(&incoming.spec.project)?;

        let mut candidate = FeatureSet::from_wire(incoming)?;
        candidate.project = project.name;
        if candidate.source.is_none() {
            candidate.source = Some(self.config.default_source.clone());
        }

        let stored = self
            .feature_sets
            .find_by_name_and_project(&candidate.name, &candidate.project)?;

        let status = match stored {
            None => {
                candidate.version = 1;
                candidate.created = Some(self.clock.now());
                ApplyStatus::Created
            }
            Some(stored) if stored.equal_spec(&candidate) => {
                debug!(
                    "Feature set {}/{} unchanged at v{}",
                    stored.project, stored.name, stored.version
                );
                return Ok(ApplyFeatureSetResponse {
                    feature_set: stored.to_wire(),
                    status: ApplyStatus::NoChange,
                });
            }
            Some(stored) => {
                candidate.version = stored.version + 1;
                candidate.created = stored.created;
                ApplyStatus::Updated
            }
        };

        if let Err(err) = self.feature_sets.save(&candidate) {
            warn!(
                "Failed to save feature set {}/{} v{}: {}",
                candidate.project, candidate.name, candidate.version, err
            );
            return Err(err.into());
        }
        info!(
            "{:?} feature set {}/{} v{}",
            status, candidate.project, candidate.name, candidate.version
        );

        Ok(ApplyFeatureSetResponse {
            feature_set: candidate.to_wire(),
            status,
        })
    }
}
