//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the application router with the directory middleware
//! - Wire up middleware (request ID, tracing, timeout)
//! - Serve on a listener until shutdown
//! - Apply reloaded listing settings without a restart

use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::http::handlers::demo_routes;
use crate::http::middleware::AutoDirState;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::http::routes::Routes;

/// HTTP server for an application wrapped by the directory middleware.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
    autodir: AutoDirState,
}

impl HttpServer {
    /// Create a server for the built-in example application.
    pub fn new(config: AppConfig) -> Self {
        Self::with_routes(config, demo_routes())
    }

    /// Create a server for the given application routes.
    pub fn with_routes(config: AppConfig, routes: Routes) -> Self {
        let (app, autodir) = routes.into_router(config.autodir.clone());
        let router = Self::build_router(&config, app);
        Self {
            router,
            config,
            autodir,
        }
    }

    /// Wrap the application with the ambient middleware stack.
    ///
    /// Later layers are outer: the request ID is set before tracing sees it.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, app: Router) -> Router {
        app.layer(TimeoutLayer::new(Duration::from_secs(
            config.timeouts.request_secs,
        )))
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(set_request_id_layer())
    }

    /// The finished router, e.g. for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Handle for inspecting or changing listing settings.
    pub fn autodir(&self) -> &AutoDirState {
        &self.autodir
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Configuration updates received on `config_updates` replace the
    /// listing settings; the server stops when `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<AppConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let autodir = self.autodir.clone();
        let reload = tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                autodir.update_settings(config.autodir);
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        reload.abort();
        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
