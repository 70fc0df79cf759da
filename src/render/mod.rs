pub(crate) mod engine;
pub(crate) mod reconcile;
pub(crate) mod server;
