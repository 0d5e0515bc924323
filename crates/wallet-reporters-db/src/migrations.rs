use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |r| r.get(0),
    )?;

    if version < 1 {
        info!("Running migration v1 (reports table)");
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS reports (
                id              TEXT PRIMARY KEY,
                wallet_address  TEXT NOT NULL,
                email           TEXT NOT NULL,
                category        TEXT,
                message         TEXT,
                url             TEXT,
                created_at      INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_reports_wallet
                ON reports(wallet_address, created_at);

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}
