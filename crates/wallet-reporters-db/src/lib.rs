pub mod migrations;
pub mod models;
pub mod queries;

pub use queries::{ReportFilter, WALLET_LOOKUP_LIMIT};

use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;

/// How long a statement waits on a locked database file before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Report store: one SQLite connection shared by all request handlers.
/// Every call runs a single statement, so the mutex is held only briefly.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) the report file and bring its schema up to date.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("opening report store at {}", path.display()))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.busy_timeout(BUSY_TIMEOUT)?;

        let db = Self::from_connection(conn)?;
        info!("Report store ready at {}", path.display());
        Ok(db)
    }

    /// Private in-memory store, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        migrations::run(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|_| anyhow!("report store connection poisoned by a panicked request"))?;
        f(&conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reopening_a_file_keeps_reports() {
        let path = std::env::temp_dir().join(format!(
            "wallet-reporters-{}-{}.db",
            std::process::id(),
            line!()
        ));
        let _ = std::fs::remove_file(&path);

        {
            let db = Database::open(&path).unwrap();
            let report = wallet_reporters_types::report::ReportSubmission {
                wallet_address: "0xFILE".into(),
                email: "f@i.le".into(),
                category: None,
                message: None,
                url: None,
            };
            db.insert_report("r1", &report, 10).unwrap();
        }

        let db = Database::open(&path).unwrap();
        assert_eq!(db.get_reports_by_wallet("0xFILE").unwrap().len(), 1);

        drop(db);
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
        }
    }
}
