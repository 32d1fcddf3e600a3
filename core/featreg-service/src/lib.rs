//! The featreg spec service.
//!
//! [`SpecService`] is the apply and query core of the registry:
//!
//! - **Apply**: [`SpecService::apply_feature_set`] validates an incoming
//!   feature set, resolves its project (creating it, or rejecting the write if
//!   the project is archived), then diffs it against the stored version and
//!   reports [`ApplyStatus::Created`], [`ApplyStatus::Updated`] or
//!   [`ApplyStatus::NoChange`].
//! - **Query**: point lookup and `*`-pattern listing of feature sets, feature
//!   listing by entity and label, project listing.
//! - **Stores**: [`SpecService::update_store`] replaces a store wholesale when
//!   it differs from the stored one.
//!
//! Storage is reached only through the `featreg-storage` repository traits.
//! Concurrent applies to one feature set are serialized by the repository's
//! version compare-and-swap; the loser gets [`SpecError::Conflict`].

mod apply;
mod config;
mod error;
mod project;
mod query;
mod service;
mod stores;
mod types;

pub use config::{
    Clock, FixedClock, SpecServiceConfig, SystemClock, DEFAULT_SOURCE_BROKERS, DEFAULT_SOURCE_TOPIC,
};
pub use error::{SpecError, SpecResult};
pub use service::SpecService;
pub use types::{
    ApplyFeatureSetResponse, ApplyStatus, GetFeatureSetRequest, ListFeatureSetsFilter,
    ListFeaturesFilter, ListStoresFilter, UpdateStoreResponse, UpdateStoreStatus,
};
