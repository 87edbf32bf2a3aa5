use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::PrimitiveDateTime;

use crate::db::types::{ResourceKind, UserRole};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct User {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) hashed_password: String,
    pub(crate) role: UserRole,
    pub(crate) created_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Lesson {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) difficulty: String,
    pub(crate) content: String,
    pub(crate) created_at: PrimitiveDateTime,
}

/// Flat row of the `resources` table; variant columns are populated according to `kind`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct ResourceRow {
    pub(crate) id: i64,
    pub(crate) kind: ResourceKind,
    pub(crate) title: String,
    pub(crate) difficulty: String,
    pub(crate) description: Option<String>,
    pub(crate) code: Option<String>,
    pub(crate) question: Option<String>,
    pub(crate) answer: Option<String>,
    pub(crate) created_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Course {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) created_at: PrimitiveDateTime,
}

/// Resource row joined with the course it is linked to.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct CourseResourceRow {
    pub(crate) course_id: i64,
    #[sqlx(flatten)]
    pub(crate) resource: ResourceRow,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Test {
    pub(crate) id: i64,
    pub(crate) course_id: i64,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) max_score: i32,
    pub(crate) created_by: Option<i64>,
    pub(crate) created_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Question {
    pub(crate) id: i64,
    pub(crate) test_id: i64,
    pub(crate) text: String,
    pub(crate) order_index: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct AnswerOption {
    pub(crate) id: i64,
    pub(crate) question_id: i64,
    pub(crate) text: String,
    pub(crate) is_correct: bool,
    pub(crate) order_index: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct TestResult {
    pub(crate) id: i64,
    pub(crate) user_id: i64,
    pub(crate) test_id: i64,
    pub(crate) score: f64,
    pub(crate) submitted_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, FromRow)]
pub(crate) struct Statistics {
    pub(crate) lessons_created: i64,
    pub(crate) resources_created: i64,
    pub(crate) courses_built: i64,
    pub(crate) lessons_cloned: i64,
    pub(crate) registered_users: i64,
}
