use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{get_class, list_classes};

pub fn init_classes_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_classes))
        .route("/{id}", get(get_class))
}
