mod common;

use common::{feature_set, names, pair};
use featreg_model::{Pattern, Project, Store, StoreType, Subscription};
use featreg_storage::{
    FeatureSetRepository, MemoryRegistry, ProjectRepository, StorageError, StoreRepository,
};
use pretty_assertions::assert_eq;

fn seeded() -> MemoryRegistry {
    let registry = MemoryRegistry::new();
    registry.save(&feature_set("f2", "project1", 1)).unwrap();
    registry.save(&feature_set("f1", "project2", 1)).unwrap();
    registry.save(&feature_set("f1", "project1", 1)).unwrap();
    registry.save(&feature_set("g1", "project1", 1)).unwrap();
    registry
}

// ── Feature sets ─────────────────────────────────────────────────

#[test]
fn find_by_name_and_project() {
    let registry = seeded();
    let found = registry.find_by_name_and_project("f1", "project2").unwrap().unwrap();
    assert_eq!(found, feature_set("f1", "project2", 1));
    assert!(registry.find_by_name_and_project("f1", "project3").unwrap().is_none());
}

#[test]
fn find_all_ordered_by_name_then_project() {
    let registry = seeded();
    let all = registry.find_all_order_by_name().unwrap();
    assert_eq!(
        names(&all),
        vec![
            pair("f1", "project1"),
            pair("f1", "project2"),
            pair("f2", "project1"),
            pair("g1", "project1"),
        ]
    );
}

#[test]
fn name_pattern_within_exact_project() {
    let registry = seeded();
    let found = registry
        .find_all_by_name_pattern_and_project(&Pattern::new("f*"), "project1")
        .unwrap();
    assert_eq!(names(&found), vec![pair("f1", "project1"), pair("f2", "project1")]);
}

#[test]
fn name_and_project_patterns() {
    let registry = seeded();
    let found = registry
        .find_all_by_name_pattern_and_project_pattern(&Pattern::new("f1"), &Pattern::match_all())
        .unwrap();
    assert_eq!(names(&found), vec![pair("f1", "project1"), pair("f1", "project2")]);
}

#[test]
fn save_replaces_with_next_version() {
    let registry = seeded();
    let mut next = feature_set("f1", "project1", 2);
    next.labels.insert("owner".into(), "ml".into());
    registry.save(&next).unwrap();

    let found = registry.find_by_name_and_project("f1", "project1").unwrap().unwrap();
    assert_eq!(found.version, 2);
    assert_eq!(found.labels.get("owner").map(String::as_str), Some("ml"));
}

#[test]
fn save_rejects_stale_version() {
    let registry = seeded();
    registry.save(&feature_set("f1", "project1", 2)).unwrap();

    let err = registry.save(&feature_set("f1", "project1", 2)).unwrap_err();
    assert!(matches!(
        err,
        StorageError::VersionConflict { expected: 1, found: 2, .. }
    ));
}

#[test]
fn save_rejects_skipped_version() {
    let registry = MemoryRegistry::new();
    let err = registry.save(&feature_set("new", "project1", 3)).unwrap_err();
    assert!(matches!(
        err,
        StorageError::VersionConflict { expected: 2, found: 0, .. }
    ));
    assert!(registry.find_all_order_by_name().unwrap().is_empty());
}

#[test]
fn save_rejects_version_zero() {
    let registry = MemoryRegistry::new();
    assert!(registry.save(&feature_set("new", "project1", 0)).is_err());
}

// ── Projects ─────────────────────────────────────────────────────

#[test]
fn active_projects_exclude_archived() {
    let registry = MemoryRegistry::new();
    registry.save_project(&Project::new("project2")).unwrap();
    registry.save_project(&Project::new("project1")).unwrap();
    registry.archive_project("archived").unwrap();

    let active = registry.find_all_active_projects().unwrap();
    assert_eq!(active, vec![Project::new("project1"), Project::new("project2")]);
    assert_eq!(
        registry.find_project("archived").unwrap(),
        Some(Project::archived("archived"))
    );
}

#[test]
fn archive_existing_project() {
    let registry = MemoryRegistry::new();
    registry.save_project(&Project::new("project1")).unwrap();
    registry.archive_project("project1").unwrap();
    assert!(registry.find_all_active_projects().unwrap().is_empty());
}

// ── Stores ───────────────────────────────────────────────────────

#[test]
fn save_and_find_store() {
    let registry = MemoryRegistry::new();
    let store = Store::new("SERVING", StoreType::Redis)
        .with_config(b"localhost:6379".to_vec())
        .with_subscription(Subscription::new("*", "*"));
    registry.save_store(&store).unwrap();

    assert_eq!(registry.find_store("SERVING").unwrap(), Some(store));
    assert!(registry.find_store("WAREHOUSE").unwrap().is_none());
}

#[test]
fn find_all_stores_ordered_by_name() {
    let registry = MemoryRegistry::new();
    registry.save_store(&Store::new("WAREHOUSE", StoreType::Bigquery)).unwrap();
    registry.save_store(&Store::new("SERVING", StoreType::Redis)).unwrap();

    let all: Vec<String> = registry
        .find_all_stores()
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(all, vec!["SERVING".to_string(), "WAREHOUSE".to_string()]);
}

#[test]
fn save_store_replaces() {
    let registry = MemoryRegistry::new();
    registry.save_store(&Store::new("SERVING", StoreType::Redis)).unwrap();
    let updated = Store::new("SERVING", StoreType::RedisCluster)
        .with_subscription(Subscription::new("project1", "*"));
    registry.save_store(&updated).unwrap();

    assert_eq!(registry.find_store("SERVING").unwrap(), Some(updated));
    assert_eq!(registry.find_all_stores().unwrap().len(), 1);
}
