pub(crate) mod courses;
pub(crate) mod lessons;
pub(crate) mod resources;
pub(crate) mod statistics;
pub(crate) mod test_results;
pub(crate) mod users;

/// True when the error is a unique-constraint violation reported by Postgres.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error().is_some_and(|db_err| db_err.is_unique_violation())
}
