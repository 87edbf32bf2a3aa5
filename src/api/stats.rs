use axum::{extract::State, response::Html, routing::get, Json, Router};

use crate::api::errors::ApiError;
use crate::core::state::AppState;
use crate::repositories;
use crate::schemas::statistics::StatisticsReport;
use crate::services::dashboard;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/", get(dashboard_page)).route("/report", get(report))
}

async fn report(State(state): State<AppState>) -> Result<Json<StatisticsReport>, ApiError> {
    load_report(&state).await.map(Json)
}

async fn dashboard_page(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let report = load_report(&state).await?;
    Ok(Html(dashboard::render(&state.settings().api().project_name, &report)))
}

async fn load_report(state: &AppState) -> Result<StatisticsReport, ApiError> {
    repositories::statistics::report(state.db())
        .await
        .map(StatisticsReport::from_db)
        .map_err(|e| ApiError::internal(e, "Failed to load statistics"))
}
