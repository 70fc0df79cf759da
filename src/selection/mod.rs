pub(crate) mod data;
#[allow(clippy::module_inception)]
pub(crate) mod selection;
