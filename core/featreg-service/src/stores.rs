//! Store reconciliation: replace on change, no versions.

use crate::query::store_not_found;
use crate::{ListStoresFilter, SpecError, SpecResult, SpecService, UpdateStoreResponse, UpdateStoreStatus};
use featreg_model::validate::check_pattern;
use featreg_model::{wire, ModelError, Store};
use tracing::{debug, info};

impl SpecService {
    /// Creates or replaces a store. An identical store is left untouched.
    pub fn update_store(&self, incoming: wire::Store) -> SpecResult<UpdateStoreResponse> {
        if incoming.name.is_empty() {
            return Err(ModelError::MissingField("store name").into());
        }
        for subscription in &incoming.subscriptions {
            if subscription.project.is_empty() || subscription.name.is_empty() {
                return Err(SpecError::InvalidArgument(format!(
                    "missing parameter in subscription: {}",
                    subscription
                )));
            }
            check_pattern(&subscription.project, "subscription project")?;
            check_pattern(&subscription.name, "subscription name")?;
        }

        let store = Store::from_wire(incoming)?;
        if let Some(existing) = self.stores.find_store(&store.name)? {
            if existing == store {
                debug!("Store {} unchanged", store.name);
                return Ok(UpdateStoreResponse {
                    store: existing.to_wire(),
                    status: UpdateStoreStatus::NoChange,
                });
            }
        }

        self.stores.save_store(&store)?;
        info!(
            "Updated store {} ({} subscriptions)",
            store.name,
            store.subscriptions.len()
        );
        Ok(UpdateStoreResponse {
            store: store.to_wire(),
            status: UpdateStoreStatus::Updated,
        })
    }

    /// Lists all stores, or the one store named by the filter.
    pub fn list_stores(&self, filter: ListStoresFilter) -> SpecResult<Vec<wire::Store>> {
        if filter.name.is_empty() {
            let stores = self.stores.find_all_stores()?;
            return Ok(stores.iter().map(Store::to_wire).collect());
        }

        let store = self
            .stores
            .find_store(&filter.name)?
            .ok_or_else(|| store_not_found(&filter.name))?;
        Ok(vec![store.to_wire()])
    }
}
