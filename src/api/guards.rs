use async_trait::async_trait;
use axum::extract::{FromRequestParts, State};
use axum::http::{header, request::Parts};

use crate::api::errors::ApiError;
use crate::core::{security, state::AppState};
use crate::db::models::User;
use crate::db::types::UserRole;
use crate::repositories;

const INVALID_TOKEN: &str = "Invalid token";
const ACCESS_DENIED: &str = "Access denied";

/// Nested access levels; each tier admits every role of the tiers above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AccessTier {
    Authenticated,
    Staff,
    Admin,
}

impl AccessTier {
    pub(crate) fn permits(self, role: UserRole) -> bool {
        match self {
            Self::Authenticated => true,
            Self::Staff => matches!(role, UserRole::Teacher | UserRole::Admin),
            Self::Admin => role == UserRole::Admin,
        }
    }
}

pub(crate) struct CurrentUser(pub(crate) User);
pub(crate) struct CurrentTeacher(pub(crate) User);
pub(crate) struct CurrentAdmin(pub(crate) User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let State(app_state) = State::<AppState>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to access application state"))?;

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::Unauthorized(INVALID_TOKEN))?;

        let token =
            auth_header.strip_prefix("Bearer ").ok_or(ApiError::Unauthorized(INVALID_TOKEN))?;

        let claims = security::verify_token(token, app_state.settings())
            .map_err(|_| ApiError::Unauthorized(INVALID_TOKEN))?;

        let user = repositories::users::find_by_username(app_state.db(), &claims.sub)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to load user"))?;

        let Some(user) = user else {
            return Err(ApiError::Unauthorized(INVALID_TOKEN));
        };

        require_tier(user, AccessTier::Authenticated).map(CurrentUser)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentTeacher {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        require_tier(user, AccessTier::Staff).map(CurrentTeacher)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        require_tier(user, AccessTier::Admin).map(CurrentAdmin)
    }
}

fn require_tier(user: User, tier: AccessTier) -> Result<User, ApiError> {
    if tier.permits(user.role) {
        Ok(user)
    } else {
        tracing::debug!(username = %user.username, role = user.role.as_str(), "Role check failed");
        Err(ApiError::Forbidden(ACCESS_DENIED))
    }
}
