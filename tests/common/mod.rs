//! Shared utilities for shell server integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use docuspotlight::config::ShellConfig;
use docuspotlight::http::HttpServer;
use docuspotlight::navigation::EagerLoader;
use docuspotlight::shell::{App, HeadlessEngine, LogNotifier};
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// A shell server running on an ephemeral local port.
pub struct TestShell {
    pub addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestShell {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestShell {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Start a shell server for `config` and wait until it accepts connections.
pub async fn start_shell(mut config: ShellConfig) -> TestShell {
    config.observability.metrics_enabled = false;
    start_shell_with_metrics(config, None).await
}

/// Start a shell server that exposes `metrics` on the configured path.
pub async fn start_shell_with_metrics(
    mut config: ShellConfig,
    metrics: Option<PrometheusHandle>,
) -> TestShell {
    config.listener.bind_address = "127.0.0.1:0".to_string();

    let app = App::bootstrap(config, &HeadlessEngine, Arc::new(LogNotifier), EagerLoader).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (tx, rx) = oneshot::channel::<()>();
    let server = HttpServer::new(Arc::new(app), metrics);
    tokio::spawn(async move {
        let _ = server
            .run(listener, async move {
                let _ = rx.await;
            })
            .await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;

    TestShell {
        addr,
        shutdown: Some(tx),
    }
}

/// Client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
