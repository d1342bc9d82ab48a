#[allow(clippy::module_inception)]
pub(crate) mod database;
pub(crate) mod error;
