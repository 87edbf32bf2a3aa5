use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::format_primitive;
use crate::db::models::Course;
use crate::schemas::resource::ResourceResponse;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct CourseCreate {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters long"))]
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) resources: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CourseResponse {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) resources: Vec<ResourceResponse>,
    pub(crate) created_at: String,
}

impl CourseResponse {
    pub(crate) fn from_db(course: Course, resources: Vec<ResourceResponse>) -> Self {
        Self {
            id: course.id,
            title: course.title,
            resources,
            created_at: format_primitive(course.created_at),
        }
    }
}
