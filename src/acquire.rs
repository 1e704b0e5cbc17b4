pub(crate) mod camera;
pub(crate) mod upload;
