pub(crate) mod admin;
pub(crate) mod auth;
pub(crate) mod errors;
pub(crate) mod guards;
pub(crate) mod handlers;
pub(crate) mod learn;
pub(crate) mod router;
pub(crate) mod stats;
pub(crate) mod teacher;
pub(crate) mod validation;
