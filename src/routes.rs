use axum::{
    Router,
    routing::{delete, get},
};

use crate::handler::{self, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::healthcheck))
        .route(
            "/api/feedback",
            get(handler::list_feedback).post(handler::create_feedback),
        )
        .route("/api/feedback/:id", delete(handler::delete_feedback))
}
