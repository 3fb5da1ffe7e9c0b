use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{get_message, list_inbox, list_sent, send_message, unread_count};

pub fn init_messages_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_inbox).post(send_message))
        .route("/sent", get(list_sent))
        .route("/unread-count", get(unread_count))
        .route("/{id}", get(get_message))
}
