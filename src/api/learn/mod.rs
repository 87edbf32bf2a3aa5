mod handlers;

use axum::{routing::get, routing::post, Router};

use crate::core::state::AppState;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/lesson/id/:id", get(handlers::lesson_by_id))
        .route("/lesson/title/:title", get(handlers::lesson_by_title))
        .route("/resource/:level", get(handlers::resources_by_level))
        .route("/courses", get(handlers::list_courses))
        .route("/course/:course_id/test/:test_id", get(handlers::get_test))
        .route("/course/test/submit", post(handlers::submit_test))
        .route("/example/:kind/:level", get(handlers::example))
}

#[cfg(test)]
mod tests;
