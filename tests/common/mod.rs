//! Shared utilities for integration tests.

use std::net::SocketAddr;

use autodir::config::AppConfig;
use autodir::{HttpServer, Routes, Shutdown};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

/// A server running in the background on an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    #[allow(dead_code)]
    pub config_tx: mpsc::UnboundedSender<AppConfig>,
}

impl TestServer {
    #[allow(dead_code)]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    #[allow(dead_code)]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the built-in example application.
pub async fn start_demo_server(config: AppConfig) -> TestServer {
    start_server(HttpServer::new(config)).await
}

/// Start a server for custom routes.
#[allow(dead_code)]
pub async fn start_routes_server(config: AppConfig, routes: Routes) -> TestServer {
    start_server(HttpServer::with_routes(config, routes)).await
}

async fn start_server(server: HttpServer) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let (config_tx, config_rx) = mpsc::unbounded_channel();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, config_rx, server_shutdown).await;
    });

    TestServer {
        addr,
        shutdown,
        config_tx,
    }
}

/// A client that never reuses connections across tests.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
