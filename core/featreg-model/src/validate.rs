//! Validation of incoming feature set specs and query patterns.

use crate::wire::FeatureSetSpec;
use crate::{ModelError, ModelResult};
use regex_lite::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Column names the ingestion pipeline adds to every row.
pub const RESERVED_NAMES: [&str; 4] = ["created_timestamp", "event_timestamp", "ingestion_id", "job_id"];

static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("static regex"));
static PROJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("static regex"));
static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_*]+$").expect("static regex"));

/// Checks a feature set, entity or feature name.
pub fn check_name(name: &str, field: &'static str) -> ModelResult<()> {
    if NAME.is_match(name) {
        Ok(())
    } else {
        Err(ModelError::InvalidName {
            field,
            name: name.to_string(),
        })
    }
}

/// Checks a project name.
pub fn check_project_name(name: &str) -> ModelResult<()> {
    if PROJECT.is_match(name) {
        Ok(())
    } else {
        Err(ModelError::InvalidName {
            field: "project name",
            name: name.to_string(),
        })
    }
}

/// Checks a name or project pattern in a query. Empty patterns are allowed;
/// callers substitute defaults for them.
pub fn check_pattern(pattern: &str, field: &'static str) -> ModelResult<()> {
    if pattern.is_empty() || NAME_PATTERN.is_match(pattern) {
        Ok(())
    } else {
        Err(ModelError::InvalidName {
            field,
            name: pattern.to_string(),
        })
    }
}

/// Validates an incoming feature set spec.
///
/// The project may be empty (the default project is substituted later).
/// Entity and feature names share one namespace, since both become columns.
pub fn validate_feature_set_spec(spec: &FeatureSetSpec) -> ModelResult<()> {
    if spec.name.is_empty() {
        return Err(ModelError::MissingField("feature set name"));
    }
    check_name(&spec.name, "feature set name")?;
    if !spec.project.is_empty() {
        check_project_name(&spec.project)?;
    }

    let mut seen = HashSet::new();
    let columns = spec
        .entities
        .iter()
        .map(|e| (e.name.as_str(), "entity name"))
        .chain(spec.features.iter().map(|f| (f.name.as_str(), "feature name")));
    for (name, field) in columns {
        check_name(name, field)?;
        if RESERVED_NAMES.contains(&name) {
            return Err(ModelError::ReservedName(name.to_string()));
        }
        if !seen.insert(name) {
            return Err(ModelError::DuplicateName(name.to_string()));
        }
    }
    Ok(())
}
