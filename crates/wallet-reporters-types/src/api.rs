use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub const SERVICE_NAME: &str = "wallet-reporters-backend";

// -- Envelope --

/// Success wrapper: `{ "ok": true, ...data }`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub ok: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self { ok: true, data }
    }
}

/// Failure wrapper: `{ "ok": false, "error": "..." }`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub ok: bool,
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
        }
    }
}

// -- Health --

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub service: &'static str,
}

// -- Reports --

/// Raw submission body. Every field is taken as whatever JSON value the
/// caller sent; coercion to text happens in [`crate::report`].
#[derive(Debug, Default, Deserialize)]
pub struct SubmitReportRequest {
    #[serde(default)]
    pub wallet_address: Option<Value>,
    #[serde(default)]
    pub email: Option<Value>,
    #[serde(default)]
    pub category: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub url: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct SubmitReportResponse {
    pub id: Uuid,
    pub created_at: i64,
}

#[derive(Debug, Serialize)]
pub struct ResultsResponse<T> {
    pub results: Vec<T>,
}

/// Row shape returned by the public lookup. Never carries the reporter email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicReport {
    pub id: String,
    pub wallet_address: String,
    pub category: Option<String>,
    pub message: Option<String>,
    pub url: Option<String>,
    pub created_at: i64,
}

/// Full row shape returned by the admin search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminReport {
    pub id: String,
    pub wallet_address: String,
    pub email: String,
    pub category: Option<String>,
    pub message: Option<String>,
    pub url: Option<String>,
    pub created_at: i64,
}
