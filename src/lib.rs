//! Browsable directory views over an HTTP application's route table.
//!
//! Requests for path prefixes that are not themselves routes are answered
//! with a synthesized listing of the next path segment of every route below
//! them, so the route table can be explored like a filesystem.

pub mod client;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::AppConfig;
pub use http::{AutoDirState, HttpServer, Routes};
pub use lifecycle::Shutdown;
pub use routing::{RequestPath, Resolution, RouteIndex, RouteProvider};
