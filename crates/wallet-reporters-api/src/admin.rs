use axum::{Json, extract::Request, http::HeaderMap};
use subtle::ConstantTimeEq;
use tracing::warn;

use wallet_reporters_db::ReportFilter;
use wallet_reporters_types::api::{AdminReport, Envelope, ResultsResponse};

use crate::error::ApiError;
use crate::params::QueryParams;
use crate::state::{AppState, with_db};

pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

pub const DEFAULT_SEARCH_LIMIT: u32 = 50;
pub const MAX_SEARCH_LIMIT: u32 = 200;

/// Check the `x-admin-key` header against the configured secret.
pub fn authorize(headers: &HeaderMap, admin_key: Option<&str>) -> Result<(), ApiError> {
    let expected = admin_key.ok_or(ApiError::Unauthorized)?;
    let provided = headers
        .get(ADMIN_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .ok_or(ApiError::Unauthorized)?;

    if bool::from(provided.as_bytes().ct_eq(expected.as_bytes())) {
        Ok(())
    } else {
        Err(ApiError::Unauthorized)
    }
}

/// Lenient limit parsing: leading integer prefix, clamped to
/// `1..=MAX_SEARCH_LIMIT`, default when absent or not a number.
pub fn parse_limit(raw: Option<&str>) -> u32 {
    raw.and_then(parse_int_prefix)
        .map(|n| n.clamp(1, i64::from(MAX_SEARCH_LIMIT)) as u32)
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
}

fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = digits[..end].bytes().fold(0i64, |acc, d| {
        acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

/// GET /api/admin/reports?q=...&limit=...
pub async fn search_reports(
    state: &AppState,
    req: Request,
) -> Result<Json<Envelope<ResultsResponse<AdminReport>>>, ApiError> {
    if let Err(e) = authorize(req.headers(), state.admin_key.as_deref()) {
        warn!("Rejected admin search on {}", req.uri().path());
        return Err(e);
    }

    let params = QueryParams::from_uri(req.uri());
    let filter = ReportFilter::from_search(params.get("q").unwrap_or_default());
    let limit = parse_limit(params.get("limit"));

    let rows = with_db(state, move |db| db.search_reports(&filter, limit)).await?;
    let results = rows.into_iter().map(AdminReport::from).collect();

    Ok(Json(Envelope::ok(ResultsResponse { results })))
}
