//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Middleware and index cache produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters and gauges via the metrics facade)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Request ID (x-request-id) is attached to every log line of a request
//! - Metrics are cheap and silently dropped when no exporter is installed

pub mod logging;
pub mod metrics;
