use axum::{Json, extract::Request};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use wallet_reporters_types::api::{
    Envelope, HealthResponse, PublicReport, ResultsResponse, SERVICE_NAME, SubmitReportRequest,
    SubmitReportResponse,
};
use wallet_reporters_types::report::ReportSubmission;

use crate::error::ApiError;
use crate::params::QueryParams;
use crate::state::{AppState, with_db};

/// Largest request body accepted for a submission.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// GET /
pub fn health() -> Json<Envelope<HealthResponse>> {
    Json(Envelope::ok(HealthResponse {
        service: SERVICE_NAME,
    }))
}

/// POST /api/reports
pub async fn submit_report(
    state: &AppState,
    req: Request,
) -> Result<Json<Envelope<SubmitReportResponse>>, ApiError> {
    let bytes = axum::body::to_bytes(req.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|_| ApiError::InvalidJson)?;
    let body = parse_submission(&bytes)?;
    let report = ReportSubmission::try_from(body)?;

    let id = Uuid::new_v4();
    let created_at = chrono::Utc::now().timestamp();
    let wallet = report.wallet_address.clone();

    with_db(state, move |db| db.insert_report(&id.to_string(), &report, created_at)).await?;

    info!("Report {} filed against wallet {}", id, wallet);
    Ok(Json(Envelope::ok(SubmitReportResponse { id, created_at })))
}

/// GET /api/reports?wallet=...
pub async fn lookup_reports(
    state: &AppState,
    req: Request,
) -> Result<Json<Envelope<ResultsResponse<PublicReport>>>, ApiError> {
    let params = QueryParams::from_uri(req.uri());
    let wallet = params.get("wallet").map(str::trim).unwrap_or_default().to_string();
    if wallet.is_empty() {
        return Err(ApiError::BadRequest("wallet query param required".into()));
    }

    let rows = with_db(state, move |db| db.get_reports_by_wallet(&wallet)).await?;
    let results = rows.into_iter().map(PublicReport::from).collect();

    Ok(Json(Envelope::ok(ResultsResponse { results })))
}

/// Valid JSON that is not an object is read as an empty submission.
fn parse_submission(bytes: &[u8]) -> Result<SubmitReportRequest, ApiError> {
    match serde_json::from_slice::<Value>(bytes).map_err(|_| ApiError::InvalidJson)? {
        obj @ Value::Object(_) => serde_json::from_value(obj).map_err(|_| ApiError::InvalidJson),
        _ => Ok(SubmitReportRequest::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_body_is_invalid_json() {
        assert!(matches!(parse_submission(b"{not json"), Err(ApiError::InvalidJson)));
        assert!(matches!(parse_submission(b""), Err(ApiError::InvalidJson)));
    }

    #[test]
    fn non_object_body_is_empty_submission() {
        let req = parse_submission(b"[1, 2, 3]").unwrap();
        assert!(req.wallet_address.is_none());

        let req = parse_submission(b"null").unwrap();
        assert!(req.email.is_none());
    }
}
