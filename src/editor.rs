/// Editor options and headless project files.
pub(crate) mod config;
/// The owned editing session.
pub(crate) mod session;
