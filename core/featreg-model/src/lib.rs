//! Core model types for featreg.
//!
//! Defines the types every featreg subsystem depends on:
//! - [`FeatureSet`]: the versioned, project-scoped spec entity, with its
//!   [`Entity`] and [`Feature`] sub-fields and opaque [`Constraints`]
//! - [`Project`]: the namespace a feature set lives in
//! - [`Store`]: the non-versioned store configuration and its [`Subscription`]s
//! - [`FeatureKey`]: the composite key used by feature listings
//! - [`Pattern`]: `*` wildcard matching for names and projects
//! - [`wire`]: the serde JSON form exchanged with callers and persisted by storage
//!
//! Entities and features are held in maps keyed by name, so two feature sets
//! that list the same fields in a different order compare equal.

mod error;
mod feature_set;
mod pattern;
mod project;
mod source;
mod store;
pub mod validate;
mod value_type;
pub mod wire;

pub use error::{ModelError, ModelResult};
pub use feature_set::{labels_match, Constraints, Entity, Feature, FeatureKey, FeatureSet};
pub use pattern::Pattern;
pub use project::{Project, DEFAULT_PROJECT_NAME};
pub use source::Source;
pub use store::{Store, StoreType, Subscription};
pub use value_type::ValueType;
