pub mod admin;
pub mod error;
pub mod middleware;
pub mod params;
pub mod reports;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{Route, router};
pub use state::{AppState, AppStateInner, app_state};
