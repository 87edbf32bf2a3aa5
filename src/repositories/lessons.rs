use crate::db::models::Lesson;

const COLUMNS: &str = "id, title, difficulty, content, created_at";

pub(crate) struct CreateLesson<'a> {
    pub(crate) title: &'a str,
    pub(crate) difficulty: &'a str,
    pub(crate) content: &'a str,
    pub(crate) created_at: time::PrimitiveDateTime,
}

pub(crate) async fn create(
    executor: impl sqlx::PgExecutor<'_>,
    params: CreateLesson<'_>,
) -> Result<Lesson, sqlx::Error> {
    sqlx::query_as::<_, Lesson>(&format!(
        "INSERT INTO lessons (title, difficulty, content, created_at)
         VALUES ($1,$2,$3,$4)
         RETURNING {COLUMNS}",
    ))
    .bind(params.title)
    .bind(params.difficulty)
    .bind(params.content)
    .bind(params.created_at)
    .fetch_one(executor)
    .await
}

pub(crate) async fn find_by_id(
    executor: impl sqlx::PgExecutor<'_>,
    id: i64,
) -> Result<Option<Lesson>, sqlx::Error> {
    sqlx::query_as::<_, Lesson>(&format!("SELECT {COLUMNS} FROM lessons WHERE id = $1"))
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub(crate) async fn find_by_title(
    executor: impl sqlx::PgExecutor<'_>,
    title: &str,
) -> Result<Option<Lesson>, sqlx::Error> {
    sqlx::query_as::<_, Lesson>(&format!("SELECT {COLUMNS} FROM lessons WHERE title = $1"))
        .bind(title)
        .fetch_optional(executor)
        .await
}

pub(crate) async fn exists_by_title(
    executor: impl sqlx::PgExecutor<'_>,
    title: &str,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM lessons WHERE title = $1)")
        .bind(title)
        .fetch_one(executor)
        .await
}
