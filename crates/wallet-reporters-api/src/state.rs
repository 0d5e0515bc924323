use std::sync::Arc;

use wallet_reporters_db::Database;

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    /// Shared secret for the admin search. `None` disables the endpoint.
    pub admin_key: Option<String>,
}

/// Build the shared state. An empty admin key counts as unset.
pub fn app_state(db: Database, admin_key: Option<String>) -> AppState {
    Arc::new(AppStateInner {
        db,
        admin_key: admin_key.filter(|k| !k.is_empty()),
    })
}

/// Run a blocking store call off the async runtime.
pub async fn with_db<F, T>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&Database) -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    tokio::task::spawn_blocking(move || f(&state.db))
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("spawn_blocking join error: {}", e)))?
        .map_err(ApiError::Internal)
}
