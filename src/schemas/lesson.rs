use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::format_primitive;
use crate::db::models::Lesson;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct LessonCreate {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters long"))]
    pub(crate) title: String,
    #[validate(length(min = 1, max = 50, message = "difficulty must be 1-50 characters long"))]
    pub(crate) difficulty: String,
    pub(crate) content: String,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct CloneParams {
    #[validate(length(min = 1, max = 255, message = "new_title must be 1-255 characters long"))]
    pub(crate) new_title: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct LessonResponse {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) difficulty: String,
    pub(crate) content: String,
    pub(crate) created_at: String,
}

impl LessonResponse {
    pub(crate) fn from_db(lesson: Lesson) -> Self {
        Self {
            id: lesson.id,
            title: lesson.title,
            difficulty: lesson.difficulty,
            content: lesson.content,
            created_at: format_primitive(lesson.created_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct LessonCloneResponse {
    pub(crate) status: &'static str,
    pub(crate) lesson: LessonResponse,
}
