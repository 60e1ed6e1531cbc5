//! Route registration that keeps the directory view in sync.
//!
//! axum does not expose the paths registered on a `Router`, so routes are
//! registered through [`Routes`], which records every template in a
//! [`RouteRegistry`] before handing it to axum.

use axum::{routing::MethodRouter, Router};

use crate::config::AutoDirConfig;
use crate::http::middleware::AutoDirState;
use crate::routing::RouteRegistry;

/// Builder over `axum::Router` that records its route templates.
pub struct Routes<S = ()> {
    router: Router<S>,
    registry: RouteRegistry,
}

impl<S> Routes<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::with_registry(RouteRegistry::new())
    }

    /// Record into an existing registry, e.g. one shared with other routers.
    pub fn with_registry(registry: RouteRegistry) -> Self {
        Self {
            router: Router::new(),
            registry,
        }
    }

    /// Add a route, exactly like `axum::Router::route`.
    pub fn route(mut self, path: &str, method_router: MethodRouter<S>) -> Self {
        self.registry.register(path);
        self.router = self.router.route(path, method_router);
        self
    }

    pub fn registry(&self) -> &RouteRegistry {
        &self.registry
    }

    /// Finish registration and wrap the router in the directory middleware.
    ///
    /// The returned state can be used to change listing settings later.
    pub fn into_router(self, settings: AutoDirConfig) -> (Router<S>, AutoDirState) {
        let state = AutoDirState::new(self.registry, settings);
        let router = state.apply(self.router);
        (router, state)
    }

    /// The plain router and registry, without the middleware.
    pub fn into_parts(self) -> (Router<S>, RouteRegistry) {
        (self.router, self.registry)
    }
}

impl<S> Default for Routes<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
