//! SQLite-backed registry.
//!
//! Feature sets and stores are persisted as their JSON wire form; projects
//! as plain columns. Name patterns are evaluated with SQLite's `GLOB`, which
//! is case-sensitive and uses `*` the same way [`Pattern`] does.

use crate::repository::{FeatureSetRepository, ProjectRepository, StoreRepository};
use crate::{check_version, StorageError, StorageResult};
use featreg_model::{wire, FeatureSet, Pattern, Project, Store};
use rusqlite::{params, Connection, OptionalExtension, Params};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Persistent registry backed by a single SQLite database.
pub struct SqliteRegistry {
    conn: Mutex<Connection>,
}

impl SqliteRegistry {
    /// Opens (or creates) a registry at the given path.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let conn = Connection::open(path.as_ref())?;
        debug!("Opened registry database at {}", path.as_ref().display());
        Self::with_connection(conn)
    }

    /// Opens an in-memory registry (for testing).
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StorageResult<Self> {
        let registry = Self {
            conn: Mutex::new(conn),
        };
        registry.init_schema()?;
        Ok(registry)
    }

    fn init_schema(&self) -> StorageResult<()> {
        let conn = self.conn()?;
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS projects (
                name TEXT PRIMARY KEY,
                archived INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS feature_sets (
                name TEXT NOT NULL,
                project TEXT NOT NULL,
                version INTEGER NOT NULL,
                body TEXT NOT NULL,
                PRIMARY KEY (name, project)
            );

            CREATE TABLE IF NOT EXISTS stores (
                name TEXT PRIMARY KEY,
                body TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    fn conn(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StorageError::Poisoned)
    }

    /// Marks a project archived, creating it if needed.
    pub fn archive_project(&self, name: &str) -> StorageResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO projects (name, archived) VALUES (?1, 1)
             ON CONFLICT(name) DO UPDATE SET archived = 1",
            params![name],
        )?;
        debug!("Archived project {}", name);
        Ok(())
    }

    fn query_feature_sets<P: Params>(&self, sql: &str, params: P) -> StorageResult<Vec<FeatureSet>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(sql)?;
        let bodies = stmt.query_map(params, |row| row.get::<_, String>(0))?;

        let mut result = Vec::new();
        for body in bodies {
            result.push(decode_feature_set(&body?)?);
        }
        Ok(result)
    }
}

fn decode_feature_set(body: &str) -> StorageResult<FeatureSet> {
    let message: wire::FeatureSet = serde_json::from_str(body)?;
    Ok(FeatureSet::from_wire(message)?)
}

fn decode_store(body: &str) -> StorageResult<Store> {
    let message: wire::Store = serde_json::from_str(body)?;
    Ok(Store::from_wire(message)?)
}

impl FeatureSetRepository for SqliteRegistry {
    fn find_by_name_and_project(&self, name: &str, project: &str) -> StorageResult<Option<FeatureSet>> {
        let conn = self.conn()?;
        let body: Option<String> = conn
            .query_row(
                "SELECT body FROM feature_sets WHERE name = ?1 AND project = ?2",
                params![name, project],
                |row| row.get(0),
            )
            .optional()?;
        body.as_deref().map(decode_feature_set).transpose()
    }

    fn find_all_order_by_name(&self) -> StorageResult<Vec<FeatureSet>> {
        self.query_feature_sets("SELECT body FROM feature_sets ORDER BY name, project", [])
    }

    fn find_all_by_name_pattern_and_project(
        &self,
        name: &Pattern,
        project: &str,
    ) -> StorageResult<Vec<FeatureSet>> {
        self.query_feature_sets(
            "SELECT body FROM feature_sets WHERE name GLOB ?1 AND project = ?2 ORDER BY name, project",
            params![name.to_sqlite_glob(), project],
        )
    }

    fn find_all_by_name_pattern_and_project_pattern(
        &self,
        name: &Pattern,
        project: &Pattern,
    ) -> StorageResult<Vec<FeatureSet>> {
        self.query_feature_sets(
            "SELECT body FROM feature_sets WHERE name GLOB ?1 AND project GLOB ?2 ORDER BY name, project",
            params![name.to_sqlite_glob(), project.to_sqlite_glob()],
        )
    }

    fn save(&self, feature_set: &FeatureSet) -> StorageResult<()> {
        let body = serde_json::to_string(&feature_set.to_wire())?;
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let found: Option<u32> = tx
            .query_row(
                "SELECT version FROM feature_sets WHERE name = ?1 AND project = ?2",
                params![feature_set.name, feature_set.project],
                |row| row.get(0),
            )
            .optional()?;
        check_version(feature_set, found)?;

        tx.execute(
            "INSERT OR REPLACE INTO feature_sets (name, project, version, body) VALUES (?1, ?2, ?3, ?4)",
            params![feature_set.name, feature_set.project, feature_set.version, body],
        )?;
        tx.commit()?;

        debug!(
            "Saved feature set {}/{} v{}",
            feature_set.project, feature_set.name, feature_set.version
        );
        Ok(())
    }
}

impl ProjectRepository for SqliteRegistry {
    fn find_project(&self, name: &str) -> StorageResult<Option<Project>> {
        let conn = self.conn()?;
        let project = conn
            .query_row(
                "SELECT name, archived FROM projects WHERE name = ?1",
                params![name],
                |row| {
                    Ok(Project {
                        name: row.get(0)?,
                        archived: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(project)
    }

    fn find_all_active_projects(&self) -> StorageResult<Vec<Project>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT name FROM projects WHERE archived = 0 ORDER BY name")?;
        let names = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut result = Vec::new();
        for name in names {
            result.push(Project::new(name?));
        }
        Ok(result)
    }

    fn save_project(&self, project: &Project) -> StorageResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO projects (name, archived) VALUES (?1, ?2)",
            params![project.name, project.archived],
        )?;
        Ok(())
    }
}

impl StoreRepository for SqliteRegistry {
    fn find_store(&self, name: &str) -> StorageResult<Option<Store>> {
        let conn = self.conn()?;
        let body: Option<String> = conn
            .query_row(
                "SELECT body FROM stores WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;
        body.as_deref().map(decode_store).transpose()
    }

    fn find_all_stores(&self) -> StorageResult<Vec<Store>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT body FROM stores ORDER BY name")?;
        let bodies = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut result = Vec::new();
        for body in bodies {
            result.push(decode_store(&body?)?);
        }
        Ok(result)
    }

    fn save_store(&self, store: &Store) -> StorageResult<()> {
        let body = serde_json::to_string(&store.to_wire())?;
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR REPLACE INTO stores (name, body) VALUES (?1, ?2)",
            params![store.name, body],
        )?;
        debug!("Saved store {}", store.name);
        Ok(())
    }
}
