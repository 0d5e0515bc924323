use crate::Database;
use crate::models::{PublicReportRow, ReportRow};
use anyhow::Result;
use rusqlite::{Connection, Row};
use wallet_reporters_types::report::ReportSubmission;

/// Maximum rows returned by the public wallet lookup.
pub const WALLET_LOOKUP_LIMIT: u32 = 100;

/// Admin search filter, derived from the free-text `q` parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportFilter {
    All,
    EmailContains(String),
    WalletContains(String),
}

impl ReportFilter {
    /// Empty input means no filter; anything with an `@` is taken as an email fragment.
    pub fn from_search(q: &str) -> Self {
        let q = q.trim();
        if q.is_empty() {
            Self::All
        } else if q.contains('@') {
            Self::EmailContains(q.to_string())
        } else {
            Self::WalletContains(q.to_string())
        }
    }
}

impl Database {
    pub fn insert_report(&self, id: &str, report: &ReportSubmission, created_at: i64) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO reports (id, wallet_address, email, category, message, url, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                rusqlite::params![
                    id,
                    report.wallet_address,
                    report.email,
                    report.category,
                    report.message,
                    report.url,
                    created_at,
                ],
            )?;
            Ok(())
        })
    }

    pub fn get_reports_by_wallet(&self, wallet_address: &str) -> Result<Vec<PublicReportRow>> {
        self.with_conn(|conn| query_reports_by_wallet(conn, wallet_address))
    }

    pub fn search_reports(&self, filter: &ReportFilter, limit: u32) -> Result<Vec<ReportRow>> {
        self.with_conn(|conn| query_search_reports(conn, filter, limit))
    }
}

fn query_reports_by_wallet(conn: &Connection, wallet_address: &str) -> Result<Vec<PublicReportRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, wallet_address, category, message, url, created_at
         FROM reports
         WHERE wallet_address = ?1
         ORDER BY created_at DESC
         LIMIT ?2",
    )?;

    let rows = stmt
        .query_map(rusqlite::params![wallet_address, WALLET_LOOKUP_LIMIT], |row| {
            Ok(PublicReportRow {
                id: row.get(0)?,
                wallet_address: row.get(1)?,
                category: row.get(2)?,
                message: row.get(3)?,
                url: row.get(4)?,
                created_at: row.get(5)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn query_search_reports(conn: &Connection, filter: &ReportFilter, limit: u32) -> Result<Vec<ReportRow>> {
    const COLUMNS: &str = "SELECT id, wallet_address, email, category, message, url, created_at FROM reports";

    let rows = match filter {
        ReportFilter::All => {
            let sql = format!("{COLUMNS} ORDER BY created_at DESC LIMIT ?1");
            conn.prepare(&sql)?
                .query_map(rusqlite::params![limit], report_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
        ReportFilter::EmailContains(q) => {
            let sql = format!("{COLUMNS} WHERE email LIKE ?1 ORDER BY created_at DESC LIMIT ?2");
            conn.prepare(&sql)?
                .query_map(rusqlite::params![format!("%{q}%"), limit], report_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
        ReportFilter::WalletContains(q) => {
            let sql =
                format!("{COLUMNS} WHERE wallet_address LIKE ?1 ORDER BY created_at DESC LIMIT ?2");
            conn.prepare(&sql)?
                .query_map(rusqlite::params![format!("%{q}%"), limit], report_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    Ok(rows)
}

fn report_row(row: &Row<'_>) -> rusqlite::Result<ReportRow> {
    Ok(ReportRow {
        id: row.get(0)?,
        wallet_address: row.get(1)?,
        email: row.get(2)?,
        category: row.get(3)?,
        message: row.get(4)?,
        url: row.get(5)?,
        created_at: row.get(6)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(wallet: &str, email: &str) -> ReportSubmission {
        ReportSubmission {
            wallet_address: wallet.to_string(),
            email: email.to_string(),
            category: None,
            message: None,
            url: None,
        }
    }

    fn seeded() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.insert_report("r1", &submission("0xAAA", "alice@example.com"), 100).unwrap();
        db.insert_report("r2", &submission("0xBBB", "bob@example.com"), 200).unwrap();
        db.insert_report("r3", &submission("0xAAA", "carol@example.com"), 300).unwrap();
        db
    }

    #[test]
    fn filter_from_search() {
        assert_eq!(ReportFilter::from_search("  "), ReportFilter::All);
        assert_eq!(
            ReportFilter::from_search(" a@b "),
            ReportFilter::EmailContains("a@b".into())
        );
        assert_eq!(
            ReportFilter::from_search("0xab"),
            ReportFilter::WalletContains("0xab".into())
        );
    }

    #[test]
    fn wallet_lookup_is_exact_and_newest_first() {
        let db = seeded();
        db.insert_report("r4", &submission("0xAAAA", "dave@example.com"), 400).unwrap();

        let rows = db.get_reports_by_wallet("0xAAA").unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r3", "r1"]);
    }

    #[test]
    fn wallet_lookup_caps_rows() {
        let db = Database::open_in_memory().unwrap();
        for i in 0..(WALLET_LOOKUP_LIMIT + 5) {
            db.insert_report(&format!("r{i}"), &submission("0xCAP", "x@y.z"), i as i64)
                .unwrap();
        }
        let rows = db.get_reports_by_wallet("0xCAP").unwrap();
        assert_eq!(rows.len(), WALLET_LOOKUP_LIMIT as usize);
        assert_eq!(rows[0].created_at, (WALLET_LOOKUP_LIMIT + 4) as i64);
    }

    #[test]
    fn optional_columns_keep_null_and_empty_apart() {
        let db = Database::open_in_memory().unwrap();
        let mut sub = submission("0x1", "a@b.com");
        sub.category = Some(String::new());
        db.insert_report("r1", &sub, 1).unwrap();

        let rows = db.search_reports(&ReportFilter::All, 50).unwrap();
        assert_eq!(rows[0].category.as_deref(), Some(""));
        assert_eq!(rows[0].message, None);
    }

    #[test]
    fn search_unfiltered_respects_limit() {
        let db = seeded();
        let rows = db.search_reports(&ReportFilter::All, 2).unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r3", "r2"]);
    }

    #[test]
    fn search_by_email_fragment() {
        let db = seeded();
        let rows = db
            .search_reports(&ReportFilter::EmailContains("bob@".into()), 50)
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].email, "bob@example.com");
    }

    #[test]
    fn search_by_wallet_fragment() {
        let db = seeded();
        let rows = db
            .search_reports(&ReportFilter::WalletContains("AA".into()), 50)
            .unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r3", "r1"]);
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let db = seeded();
        assert!(db.insert_report("r1", &submission("0xZ", "z@z.z"), 999).is_err());
    }
}
