//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route registration (host framework):
//!     Routes::route(path, handler)
//!     → provider.rs (RouteRegistry records the template, bumps version)
//!
//! Per request:
//!     RouteProvider
//!     → cache.rs (reuse or rebuild according to IndexPolicy)
//!     → router.rs (RouteIndex: parsed templates, excluded flags)
//!     → resolver.rs (ExactMatch | Directory(listing) | NotFound)
//! ```
//!
//! # Design Decisions
//! - Resolution is a pure function of (index, path)
//! - The index is immutable once built and shared via Arc
//! - Deterministic listings: entries ordered by name

pub mod cache;
pub mod matcher;
pub mod provider;
pub mod resolver;
pub mod router;

pub use cache::{IndexCache, IndexPolicy};
pub use matcher::{RouteTemplate, Segment};
pub use provider::{RouteProvider, RouteRegistry, StaticRoutes};
pub use resolver::{resolve, EntryKind, Listing, RequestPath, Resolution};
pub use router::{ExcludedPrefixes, RouteIndex, DEFAULT_EXCLUDED_PREFIX};
