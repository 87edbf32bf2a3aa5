use crate::db::models::TestResult;

const COLUMNS: &str = "id, user_id, test_id, score, submitted_at";

pub(crate) async fn create(
    executor: impl sqlx::PgExecutor<'_>,
    user_id: i64,
    test_id: i64,
    score: f64,
    submitted_at: time::PrimitiveDateTime,
) -> Result<TestResult, sqlx::Error> {
    sqlx::query_as::<_, TestResult>(&format!(
        "INSERT INTO test_results (user_id, test_id, score, submitted_at)
         VALUES ($1,$2,$3,$4)
         RETURNING {COLUMNS}",
    ))
    .bind(user_id)
    .bind(test_id)
    .bind(score)
    .bind(submitted_at)
    .fetch_one(executor)
    .await
}
