//! Request-handling middleware.

pub mod autodir;

pub use autodir::{autodir_middleware, AutoDirState};
