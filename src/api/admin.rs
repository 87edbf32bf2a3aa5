use axum::{
    extract::{Path, State},
    routing::{get, patch},
    Json, Router,
};

use crate::api::errors::ApiError;
use crate::api::guards::CurrentAdmin;
use crate::core::state::AppState;
use crate::db::types::UserRole;
use crate::repositories;
use crate::schemas::user::UserResponse;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/user/:id/set_as_teacher", patch(set_as_teacher))
}

async fn list_users(
    CurrentAdmin(_admin): CurrentAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = repositories::users::list_all(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list users"))?;

    Ok(Json(users.into_iter().map(UserResponse::from_db).collect()))
}

async fn set_as_teacher(
    CurrentAdmin(admin): CurrentAdmin,
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserResponse>, ApiError> {
    let updated = repositories::users::set_role(state.db(), user_id, UserRole::Teacher)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to update user role"))?;

    let Some(user) = updated else {
        let existing = repositories::users::find_by_id(state.db(), user_id)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to load user"))?;
        return Err(match existing {
            Some(_) => ApiError::Conflict("Administrators cannot be made teachers".to_string()),
            None => ApiError::NotFound("User not found".to_string()),
        });
    };

    tracing::info!(admin_id = admin.id, user_id = user.id, "Promoted user to teacher");
    Ok(Json(UserResponse::from_db(user)))
}
