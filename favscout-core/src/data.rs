use chrono::{DateTime, Utc};
use favscout_resolver::{IconCache, DEFAULT_MAX_ENTRIES};
use rusqlite::{params, Connection, OptionalExtension, Result};
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::warn;

pub const DEFAULT_NAMESPACE: &str = "favscout";

/// Durable icon store backed by SQLite.
///
/// Rows carry a monotonically increasing `seq`, so insertion order survives
/// restarts. Capacity is enforced on write by deleting the lowest-`seq` rows
/// in the namespace until the count is back under the bound.
pub struct IconStore {
    conn: Mutex<Connection>,
    namespace: String,
    max_entries: usize,
}

/// Summary of a namespace's contents for operator tooling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub oldest_inserted_at: Option<DateTime<Utc>>,
    pub newest_inserted_at: Option<DateTime<Utc>>,
}

fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

impl IconStore {
    pub fn exists(path: &Path) -> bool {
        path.exists()
    }

    pub fn remove_file(path: &Path) -> std::io::Result<()> {
        fs::remove_file(path)
    }

    pub fn open(path: &Path) -> Result<Self> {
        Self::with_limits(path, DEFAULT_NAMESPACE, DEFAULT_MAX_ENTRIES)
    }

    pub fn with_limits(path: &Path, namespace: &str, max_entries: usize) -> Result<Self> {
        let conn = Connection::open(path)?;

        // Optimize for concurrent writes
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
            ",
        )?;

        let store = IconStore {
            conn: Mutex::new(conn),
            namespace: namespace.to_string(),
            max_entries,
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS icons (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                namespace TEXT NOT NULL,
                url TEXT NOT NULL,
                uri TEXT NOT NULL,
                inserted_at INTEGER NOT NULL,
                UNIQUE(namespace, url)
            );

            CREATE INDEX IF NOT EXISTS idx_icons_namespace ON icons(namespace);
            ",
        )?;
        Ok(())
    }

    pub fn get(&self, url: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT uri FROM icons WHERE namespace = ?1 AND url = ?2")?;

        let result = stmt
            .query_row(params![&self.namespace, url], |row| row.get(0))
            .optional()?;
        Ok(result)
    }

    /// Insert or overwrite the entry for `url`.
    ///
    /// An overwrite leaves `seq` and `inserted_at` untouched, so a rewritten
    /// key keeps its original position in the eviction order.
    pub fn set(&self, url: &str, uri: &str) -> Result<()> {
        let timestamp = current_timestamp();
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "INSERT INTO icons (namespace, url, uri, inserted_at) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(namespace, url) DO UPDATE SET uri = excluded.uri",
            params![&self.namespace, url, uri, timestamp],
        )?;

        self.evict_over_capacity(&conn)?;
        Ok(())
    }

    fn evict_over_capacity(&self, conn: &Connection) -> Result<()> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM icons WHERE namespace = ?1",
            params![&self.namespace],
            |row| row.get(0),
        )?;

        let excess = count - self.max_entries as i64;
        if excess > 0 {
            conn.execute(
                "DELETE FROM icons WHERE seq IN (
                    SELECT seq FROM icons WHERE namespace = ?1 ORDER BY seq ASC LIMIT ?2
                )",
                params![&self.namespace, excess],
            )?;
        }
        Ok(())
    }

    pub fn len(&self) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM icons WHERE namespace = ?1",
            params![&self.namespace],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    pub fn stats(&self) -> Result<CacheStats> {
        let conn = self.conn.lock().unwrap();
        let (count, oldest, newest): (i64, Option<i64>, Option<i64>) = conn.query_row(
            "SELECT COUNT(*), MIN(inserted_at), MAX(inserted_at)
             FROM icons WHERE namespace = ?1",
            params![&self.namespace],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;

        Ok(CacheStats {
            entries: count as usize,
            capacity: self.max_entries,
            oldest_inserted_at: oldest.and_then(|t| DateTime::from_timestamp(t, 0)),
            newest_inserted_at: newest.and_then(|t| DateTime::from_timestamp(t, 0)),
        })
    }
}

/// Cache seam for the resolver. Store errors are logged and swallowed: a
/// failed read is a miss, a failed write leaves the entry uncached.
impl IconCache for IconStore {
    fn get(&self, key: &str) -> Option<String> {
        match IconStore::get(self, key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Icon store read failed for {}: {}", key, e);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = IconStore::set(self, key, value) {
            warn!("Icon store write failed for {}: {}", key, e);
        }
    }
}
