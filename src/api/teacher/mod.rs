mod handlers;

use axum::{routing::post, Router};

use crate::core::state::AppState;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/lesson", post(handlers::create_lesson))
        .route("/lesson/title/:title/clone", post(handlers::clone_lesson))
        .route("/resource", post(handlers::create_resource))
        .route("/course", post(handlers::create_course))
        .route("/test", post(handlers::create_test))
}
