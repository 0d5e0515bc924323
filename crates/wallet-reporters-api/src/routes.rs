use axum::{
    Router,
    extract::{Request, State},
    http::Method,
    middleware,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::middleware::cors;
use crate::state::AppState;
use crate::{admin, reports};

/// Every endpoint the service answers, resolved from method and path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Health,
    SubmitReport,
    LookupReports,
    AdminSearch,
    NotFound,
}

impl Route {
    pub fn resolve(method: &Method, path: &str) -> Self {
        match (method.as_str(), path) {
            ("GET", "/") => Self::Health,
            ("POST", "/api/reports") => Self::SubmitReport,
            ("GET", "/api/reports") => Self::LookupReports,
            ("GET", "/api/admin/reports" | "/api/admin/reports/") => Self::AdminSearch,
            _ => Self::NotFound,
        }
    }
}

/// Build the service. All requests pass through the CORS layer and then a
/// single dispatch over [`Route`].
pub fn router(state: AppState) -> Router {
    Router::new()
        .fallback(dispatch)
        .layer(middleware::from_fn(cors))
        .with_state(state)
}

async fn dispatch(State(state): State<AppState>, req: Request) -> Response {
    let route = Route::resolve(req.method(), req.uri().path());

    let result = match route {
        Route::Health => Ok(reports::health().into_response()),
        Route::SubmitReport => reports::submit_report(&state, req)
            .await
            .map(IntoResponse::into_response),
        Route::LookupReports => reports::lookup_reports(&state, req)
            .await
            .map(IntoResponse::into_response),
        Route::AdminSearch => admin::search_reports(&state, req)
            .await
            .map(IntoResponse::into_response),
        Route::NotFound => Err(ApiError::NotFound),
    };

    result.unwrap_or_else(IntoResponse::into_response)
}
