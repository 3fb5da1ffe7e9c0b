use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::landing;

pub fn init_landing_router() -> Router<AppState> {
    Router::new().route("/", get(landing))
}
