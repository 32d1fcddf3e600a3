//! Read queries over feature sets and features.

use crate::{GetFeatureSetRequest, ListFeatureSetsFilter, ListFeaturesFilter, SpecError, SpecResult, SpecService};
use featreg_model::validate::{check_pattern, check_project_name};
use featreg_model::{wire, FeatureKey, FeatureSet, ModelError, Pattern};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

impl SpecService {
    /// Looks up one feature set by exact name and project.
    pub fn get_feature_set(&self, request: GetFeatureSetRequest) -> SpecResult<wire::FeatureSet> {
        if request.name.is_empty() {
            return Err(ModelError::MissingField("feature set name").into());
        }
        let project = self.project_or_default(&request.project);

        self.feature_sets
            .find_by_name_and_project(&request.name, project)?
            .map(|fs| fs.to_wire())
            .ok_or_else(|| {
                SpecError::NotFound(format!(
                    "feature set with name \"{}\" could not be found",
                    request.name
                ))
            })
    }

    /// Lists feature sets matching a name pattern, a project pattern and labels.
    ///
    /// Results come in the repository's order, by name. No match is an empty
    /// list, never `NotFound`.
    pub fn list_feature_sets(&self, filter: ListFeatureSetsFilter) -> SpecResult<Vec<wire::FeatureSet>> {
        let matched = self.find_feature_sets(&filter.feature_set_name, &filter.project)?;
        Ok(matched
            .into_iter()
            .filter(|fs| fs.has_all_labels(&filter.labels))
            .map(|fs| fs.to_wire())
            .collect())
    }

    /// Lists the features of one project, keyed by [`FeatureKey`].
    ///
    /// Only feature sets holding every requested entity contribute, and only
    /// their features whose labels contain every requested label.
    pub fn list_features(
        &self,
        filter: ListFeaturesFilter,
    ) -> SpecResult<BTreeMap<FeatureKey, wire::FeatureSpec>> {
        let project = self.project_or_default(&filter.project);
        check_project_name(project)?;

        let candidates = self
            .feature_sets
            .find_all_by_name_pattern_and_project(&Pattern::match_all(), project)?;

        let mut features = BTreeMap::new();
        for fs in candidates.iter().filter(|fs| fs.has_all_entities(&filter.entities)) {
            for (key, feature) in fs.features_by_key(&filter.labels) {
                features.insert(key, feature.to_wire());
            }
        }
        debug!(
            "Listed {} features in project {} from {} feature sets",
            features.len(),
            project,
            candidates.len()
        );
        Ok(features)
    }

    /// Lists every feature set a store subscribes to, once each, in name order.
    pub fn list_subscribed_feature_sets(&self, store_name: &str) -> SpecResult<Vec<wire::FeatureSet>> {
        let store = self
            .stores
            .find_store(store_name)?
            .ok_or_else(|| store_not_found(store_name))?;

        let mut seen = BTreeSet::new();
        let mut matched = Vec::new();
        for subscription in &store.subscriptions {
            for fs in self.find_feature_sets(&subscription.name, &subscription.project)? {
                if seen.insert((fs.name.clone(), fs.project.clone())) {
                    matched.push(fs);
                }
            }
        }
        matched.sort_by(|a, b| (&a.name, &a.project).cmp(&(&b.name, &b.project)));

        debug!(
            "Store {} subscribes to {} feature sets",
            store_name,
            matched.len()
        );
        Ok(matched.iter().map(FeatureSet::to_wire).collect())
    }

    /// Dispatches a name/project pattern pair to the narrowest repository query.
    fn find_feature_sets(&self, name: &str, project: &str) -> SpecResult<Vec<FeatureSet>> {
        check_pattern(name, "feature set name")?;
        check_pattern(project, "project name")?;

        let name = if name.is_empty() {
            Pattern::match_all()
        } else {
            Pattern::new(name)
        };
        let project = Pattern::new(self.project_or_default(project));

        let found = if project.is_match_all() && name.is_match_all() {
            self.feature_sets.find_all_order_by_name()?
        } else if project.is_wildcard() {
            self.feature_sets
                .find_all_by_name_pattern_and_project_pattern(&name, &project)?
        } else {
            self.feature_sets
                .find_all_by_name_pattern_and_project(&name, project.as_str())?
        };
        debug!(
            "Matched {} feature sets for name {} in project {}",
            found.len(),
            name,
            project
        );
        Ok(found)
    }
}

pub(crate) fn store_not_found(name: &str) -> SpecError {
    SpecError::NotFound(format!("store with name '{}' not found", name))
}
