//! Database row types: these map directly to SQLite rows.
//! Distinct from the wire types so the DB layer stays independent of the API shape.

use wallet_reporters_types::api::{AdminReport, PublicReport};

/// Reduced column set served by the public wallet lookup.
pub struct PublicReportRow {
    pub id: String,
    pub wallet_address: String,
    pub category: Option<String>,
    pub message: Option<String>,
    pub url: Option<String>,
    pub created_at: i64,
}

pub struct ReportRow {
    pub id: String,
    pub wallet_address: String,
    pub email: String,
    pub category: Option<String>,
    pub message: Option<String>,
    pub url: Option<String>,
    pub created_at: i64,
}

impl From<PublicReportRow> for PublicReport {
    fn from(row: PublicReportRow) -> Self {
        Self {
            id: row.id,
            wallet_address: row.wallet_address,
            category: row.category,
            message: row.message,
            url: row.url,
            created_at: row.created_at,
        }
    }
}

impl From<ReportRow> for AdminReport {
    fn from(row: ReportRow) -> Self {
        Self {
            id: row.id,
            wallet_address: row.wallet_address,
            email: row.email,
            category: row.category,
            message: row.message,
            url: row.url,
            created_at: row.created_at,
        }
    }
}
