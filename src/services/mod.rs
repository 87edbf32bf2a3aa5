pub(crate) mod course_builder;
pub(crate) mod dashboard;
pub(crate) mod learning_kits;
pub(crate) mod scoring;
