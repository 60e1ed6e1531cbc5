//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, request ID, tracing, timeout)
//!     → middleware/autodir.rs (pass through | listing | 404)
//!     → handlers.rs (application routes registered via routes.rs)
//!     → response.rs (listing and not-found bodies)
//!     → Send to client
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod routes;
pub mod server;

pub use middleware::{autodir_middleware, AutoDirState};
pub use request::{RequestIdExt, X_REQUEST_ID};
pub use response::{DirectoryBody, DIRECTORY_MEDIA_TYPE};
pub use routes::Routes;
pub use server::HttpServer;
