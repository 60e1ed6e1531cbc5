//! Directory listing middleware.
//!
//! Runs in front of the application's routes (and its fallback). Each request
//! path is resolved against the current route index:
//! - a registered route consumes the path → the request continues untouched
//! - the path is a prefix of listable routes → a directory listing is returned
//! - otherwise → `404 Not found`

use std::sync::Arc;

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
    Router,
};

use crate::config::AutoDirConfig;
use crate::http::request::RequestIdExt;
use crate::http::response::{directory_response, not_found_response};
use crate::observability::metrics;
use crate::routing::{IndexCache, RequestPath, Resolution, RouteProvider};

struct Inner {
    provider: Arc<dyn RouteProvider>,
    settings: ArcSwap<AutoDirConfig>,
    cache: IndexCache,
}

/// Shared state of the directory middleware.
///
/// Cheap to clone; clones share the provider, settings, and index cache.
#[derive(Clone)]
pub struct AutoDirState {
    inner: Arc<Inner>,
}

impl AutoDirState {
    pub fn new(provider: impl RouteProvider + 'static, settings: AutoDirConfig) -> Self {
        Self::from_shared(Arc::new(provider), settings)
    }

    pub fn from_shared(provider: Arc<dyn RouteProvider>, settings: AutoDirConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                provider,
                settings: ArcSwap::from_pointee(settings),
                cache: IndexCache::new(),
            }),
        }
    }

    /// Current listing settings.
    pub fn settings(&self) -> Arc<AutoDirConfig> {
        self.inner.settings.load_full()
    }

    /// Replace the listing settings; takes effect on the next request.
    pub fn update_settings(&self, settings: AutoDirConfig) {
        if *self.inner.settings.load_full() == settings {
            return;
        }
        tracing::info!(
            excluded_prefixes = ?settings.excluded_prefixes,
            content_type = %settings.content_type,
            index_policy = ?settings.index_policy,
            "Directory listing settings updated"
        );
        self.inner.settings.store(Arc::new(settings));
        self.inner.cache.invalidate();
    }

    /// Resolve a path against the provider's current routes.
    pub fn resolve(&self, path: &RequestPath) -> Resolution {
        let settings = self.inner.settings.load();
        let index = self.inner.cache.index(
            self.inner.provider.as_ref(),
            &settings.excluded_prefixes,
            settings.index_policy,
        );
        index.resolve(path)
    }

    /// Install the middleware on every route and the fallback of `router`.
    ///
    /// Routes added to the router afterwards are not covered.
    pub fn apply<S>(&self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        router.layer(middleware::from_fn_with_state(
            self.clone(),
            autodir_middleware,
        ))
    }
}

/// Middleware function; install with `axum::middleware::from_fn_with_state`.
pub async fn autodir_middleware(
    State(state): State<AutoDirState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let path = RequestPath::parse(request.uri().path());
    let resolution = state.resolve(&path);
    metrics::record_resolution(resolution.outcome());

    match resolution {
        Resolution::ExactMatch => next.run(request).await,
        Resolution::Directory(listing) => {
            tracing::debug!(
                request_id = %request.request_id(),
                path = %path,
                entries = listing.len(),
                "Serving directory listing"
            );
            directory_response(&listing, &state.settings().content_type)
        }
        Resolution::NotFound => {
            tracing::debug!(
                request_id = %request.request_id(),
                path = %path,
                "No route or subroute matched"
            );
            not_found_response()
        }
    }
}
