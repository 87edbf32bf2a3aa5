use serde::Serialize;

use crate::db::models::Statistics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct StatisticsReport {
    pub(crate) lessons_created: i64,
    pub(crate) resources_created: i64,
    pub(crate) courses_built: i64,
    pub(crate) lessons_cloned: i64,
    pub(crate) registered_users: i64,
}

impl StatisticsReport {
    pub(crate) fn from_db(stats: Statistics) -> Self {
        Self {
            lessons_created: stats.lessons_created,
            resources_created: stats.resources_created,
            courses_built: stats.courses_built,
            lessons_cloned: stats.lessons_cloned,
            registered_users: stats.registered_users,
        }
    }

    /// Counters paired with their display labels, in dashboard order.
    pub(crate) fn entries(&self) -> [(&'static str, i64); 5] {
        [
            ("Lessons created", self.lessons_created),
            ("Resources created", self.resources_created),
            ("Courses built", self.courses_built),
            ("Lessons cloned", self.lessons_cloned),
            ("Registered users", self.registered_users),
        ]
    }
}
