use sqlx::{Postgres, Transaction};

use crate::core::metrics;
use crate::db::models::Statistics;

const COLUMNS: &str =
    "lessons_created, resources_created, courses_built, lessons_cloned, registered_users";

/// Usage counters kept in the singleton `statistics` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Counter {
    LessonsCreated,
    ResourcesCreated,
    CoursesBuilt,
    LessonsCloned,
    RegisteredUsers,
}

impl Counter {
    fn column(self) -> &'static str {
        match self {
            Self::LessonsCreated => "lessons_created",
            Self::ResourcesCreated => "resources_created",
            Self::CoursesBuilt => "courses_built",
            Self::LessonsCloned => "lessons_cloned",
            Self::RegisteredUsers => "registered_users",
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::LessonsCreated => "lesson_created",
            Self::ResourcesCreated => "resource_created",
            Self::CoursesBuilt => "course_built",
            Self::LessonsCloned => "lesson_cloned",
            Self::RegisteredUsers => "user_registered",
        }
    }
}

pub(crate) async fn ensure_row(executor: impl sqlx::PgExecutor<'_>) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO statistics (id) VALUES (1) ON CONFLICT (id) DO NOTHING")
        .execute(executor)
        .await?;
    Ok(())
}

/// Bumps one counter with a single UPDATE so concurrent callers never lose increments.
pub(crate) async fn increment(
    executor: impl sqlx::PgExecutor<'_>,
    counter: Counter,
) -> Result<(), sqlx::Error> {
    let column = counter.column();
    let result =
        sqlx::query(&format!("UPDATE statistics SET {column} = {column} + 1 WHERE id = 1"))
            .execute(executor)
            .await?;

    if result.rows_affected() == 0 {
        tracing::warn!(counter = column, "statistics row missing; increment dropped");
    }

    Ok(())
}

/// Commits a transaction that bumped `counter`, then mirrors the event into metrics.
pub(crate) async fn commit_and_record(
    tx: Transaction<'_, Postgres>,
    counter: Counter,
) -> Result<(), sqlx::Error> {
    tx.commit().await?;
    metrics::record_learning_event(counter);
    Ok(())
}

pub(crate) async fn report(executor: impl sqlx::PgExecutor<'_>) -> Result<Statistics, sqlx::Error> {
    let row = sqlx::query_as::<_, Statistics>(&format!(
        "SELECT {COLUMNS} FROM statistics WHERE id = 1"
    ))
    .fetch_optional(executor)
    .await?;

    Ok(row.unwrap_or(Statistics {
        lessons_created: 0,
        resources_created: 0,
        courses_built: 0,
        lessons_cloned: 0,
        registered_users: 0,
    }))
}
