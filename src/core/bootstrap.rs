use crate::core::security;
use crate::core::state::AppState;
use crate::db::types::UserRole;
use crate::repositories;

pub(crate) async fn ensure_statistics(state: &AppState) -> anyhow::Result<()> {
    repositories::statistics::ensure_row(state.db()).await?;
    Ok(())
}

pub(crate) async fn ensure_superuser(state: &AppState) -> anyhow::Result<()> {
    let admin = state.settings().admin();
    if admin.first_superuser_password.is_empty() {
        tracing::warn!("FIRST_SUPERUSER_PASSWORD not configured; skipping superuser creation");
        return Ok(());
    }

    let username = &admin.first_superuser_username;

    let user = repositories::users::find_by_username(state.db(), username).await?;

    if let Some(user) = user {
        let verified =
            security::verify_password(&admin.first_superuser_password, &user.hashed_password)
                .unwrap_or(false);

        if verified && user.role == UserRole::Admin {
            tracing::info!("Default superuser already up to date");
            return Ok(());
        }

        let hashed_password = if verified {
            user.hashed_password.clone()
        } else {
            security::hash_password(&admin.first_superuser_password)?
        };

        repositories::users::update_credentials(
            state.db(),
            user.id,
            &hashed_password,
            UserRole::Admin,
        )
        .await?;

        tracing::info!(username = %username, "Updated default superuser");
        return Ok(());
    }

    let hashed_password = security::hash_password(&admin.first_superuser_password)?;

    repositories::users::create(
        state.db(),
        repositories::users::CreateUser {
            username,
            hashed_password: &hashed_password,
            role: UserRole::Admin,
            created_at: crate::core::time::primitive_now_utc(),
        },
    )
    .await?;

    tracing::info!(username = %username, "Created default superuser");
    Ok(())
}
