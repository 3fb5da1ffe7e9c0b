use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use crate::middleware::role::require_admin;
use crate::state::AppState;

use super::controller::{create_subject, list_subjects};

pub fn init_subjects_router(state: AppState) -> Router<AppState> {
    let admin_only = post(create_subject).route_layer(from_fn_with_state(state, require_admin));

    Router::new().route("/", get(list_subjects).merge(admin_only))
}
