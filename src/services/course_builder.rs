use sqlx::PgPool;

use crate::core::time::primitive_now_utc;
use crate::db::models::{Course, ResourceRow};
use crate::repositories;
use crate::repositories::statistics::Counter;

/// Collects resource ids for a new course and persists everything in one transaction.
#[derive(Debug, Clone)]
pub(crate) struct CourseBuilder {
    title: String,
    resource_ids: Vec<i64>,
}

#[derive(Debug)]
pub(crate) struct BuiltCourse {
    pub(crate) course: Course,
    pub(crate) resources: Vec<ResourceRow>,
}

impl CourseBuilder {
    pub(crate) fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), resource_ids: Vec::new() }
    }

    pub(crate) fn add_resource(mut self, resource_id: i64) -> Self {
        if !self.resource_ids.contains(&resource_id) {
            self.resource_ids.push(resource_id);
        }
        self
    }

    pub(crate) fn resource_ids(&self) -> &[i64] {
        &self.resource_ids
    }

    /// Ids that do not match a stored resource are skipped.
    pub(crate) async fn build_and_save(self, pool: &PgPool) -> Result<BuiltCourse, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let resources = repositories::resources::list_by_ids(&mut *tx, &self.resource_ids).await?;
        if resources.len() < self.resource_ids.len() {
            tracing::debug!(
                requested = self.resource_ids.len(),
                found = resources.len(),
                "Skipping unknown resource ids"
            );
        }

        let course = repositories::courses::create(&mut *tx, &self.title, primitive_now_utc()).await?;
        let found_ids: Vec<i64> = resources.iter().map(|resource| resource.id).collect();
        repositories::courses::attach_resources(&mut *tx, course.id, &found_ids).await?;
        repositories::statistics::increment(&mut *tx, Counter::CoursesBuilt).await?;

        repositories::statistics::commit_and_record(tx, Counter::CoursesBuilt).await?;
        Ok(BuiltCourse { course, resources })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_resource_keeps_order_and_drops_duplicates() {
        let builder = CourseBuilder::new("Python 101")
            .add_resource(3)
            .add_resource(1)
            .add_resource(3)
            .add_resource(2);

        assert_eq!(builder.resource_ids(), &[3, 1, 2]);
    }
}
