use crate::db::models::ResourceRow;
use crate::db::types::ResourceKind;

pub(crate) const COLUMNS: &str =
    "id, kind, title, difficulty, description, code, question, answer, created_at";

/// Insert parameters; the caller fills the variant columns that match `kind`.
pub(crate) struct CreateResource<'a> {
    pub(crate) kind: ResourceKind,
    pub(crate) title: &'a str,
    pub(crate) difficulty: &'a str,
    pub(crate) description: Option<&'a str>,
    pub(crate) code: Option<&'a str>,
    pub(crate) question: Option<&'a str>,
    pub(crate) answer: Option<&'a str>,
    pub(crate) created_at: time::PrimitiveDateTime,
}

pub(crate) async fn create(
    executor: impl sqlx::PgExecutor<'_>,
    params: CreateResource<'_>,
) -> Result<ResourceRow, sqlx::Error> {
    sqlx::query_as::<_, ResourceRow>(&format!(
        "INSERT INTO resources (
            kind, title, difficulty, description, code, question, answer, created_at
         ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8)
         RETURNING {COLUMNS}",
    ))
    .bind(params.kind)
    .bind(params.title)
    .bind(params.difficulty)
    .bind(params.description)
    .bind(params.code)
    .bind(params.question)
    .bind(params.answer)
    .bind(params.created_at)
    .fetch_one(executor)
    .await
}

pub(crate) async fn list_by_difficulty(
    executor: impl sqlx::PgExecutor<'_>,
    difficulty: &str,
) -> Result<Vec<ResourceRow>, sqlx::Error> {
    sqlx::query_as::<_, ResourceRow>(&format!(
        "SELECT {COLUMNS} FROM resources WHERE difficulty = $1 ORDER BY id"
    ))
    .bind(difficulty)
    .fetch_all(executor)
    .await
}

pub(crate) async fn list_by_ids(
    executor: impl sqlx::PgExecutor<'_>,
    ids: &[i64],
) -> Result<Vec<ResourceRow>, sqlx::Error> {
    sqlx::query_as::<_, ResourceRow>(&format!(
        "SELECT {COLUMNS} FROM resources WHERE id = ANY($1) ORDER BY id"
    ))
    .bind(ids)
    .fetch_all(executor)
    .await
}
