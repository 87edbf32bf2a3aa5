use crate::db::models::{Course, CourseResourceRow};

const COLUMNS: &str = "id, title, created_at";

pub(crate) async fn create(
    executor: impl sqlx::PgExecutor<'_>,
    title: &str,
    created_at: time::PrimitiveDateTime,
) -> Result<Course, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!(
        "INSERT INTO courses (title, created_at) VALUES ($1,$2) RETURNING {COLUMNS}",
    ))
    .bind(title)
    .bind(created_at)
    .fetch_one(executor)
    .await
}

/// Links resources to a course; ids already linked are ignored.
pub(crate) async fn attach_resources(
    executor: impl sqlx::PgExecutor<'_>,
    course_id: i64,
    resource_ids: &[i64],
) -> Result<u64, sqlx::Error> {
    if resource_ids.is_empty() {
        return Ok(0);
    }

    let result = sqlx::query(
        "INSERT INTO course_resources (course_id, resource_id)
         SELECT $1, UNNEST($2::BIGINT[])
         ON CONFLICT DO NOTHING",
    )
    .bind(course_id)
    .bind(resource_ids)
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}

pub(crate) async fn find_by_id(
    executor: impl sqlx::PgExecutor<'_>,
    id: i64,
) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!("SELECT {COLUMNS} FROM courses WHERE id = $1"))
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub(crate) async fn exists_by_title(
    executor: impl sqlx::PgExecutor<'_>,
    title: &str,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM courses WHERE title = $1)")
        .bind(title)
        .fetch_one(executor)
        .await
}

pub(crate) async fn list_all(
    executor: impl sqlx::PgExecutor<'_>,
) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!("SELECT {COLUMNS} FROM courses ORDER BY id"))
        .fetch_all(executor)
        .await
}

/// Resources of every listed course, fetched in a single query.
pub(crate) async fn list_resources_for_courses(
    executor: impl sqlx::PgExecutor<'_>,
    course_ids: &[i64],
) -> Result<Vec<CourseResourceRow>, sqlx::Error> {
    sqlx::query_as::<_, CourseResourceRow>(
        "SELECT cr.course_id,
                r.id, r.kind, r.title, r.difficulty, r.description,
                r.code, r.question, r.answer, r.created_at
         FROM course_resources cr
         JOIN resources r ON r.id = cr.resource_id
         WHERE cr.course_id = ANY($1)
         ORDER BY cr.course_id, r.id",
    )
    .bind(course_ids)
    .fetch_all(executor)
    .await
}
