//! Test server harness: a real listener on port 0 with a stubbed scorer.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use vane::scoring::HeadlineScorer;
use vane_server::gateway::{HandlerState, create_router_with_state};

pub struct TestServer {
    pub addr: SocketAddr,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client_config(&self) -> vane::config::ClientConfig {
        vane::config::ClientConfig {
            base_url: self.url(),
            timeout: std::time::Duration::from_secs(5),
            ..Default::default()
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Spawns a server whose scorer runs fully stubbed: deterministic labels,
/// no model files, no network dependencies beyond the bound port.
pub async fn spawn_stub_server(include_scores: bool) -> TestServer {
    let state = HandlerState::new(Arc::new(HeadlineScorer::stub()), include_scores);
    let app = create_router_with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let addr = listener.local_addr().expect("listener has no local addr");

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .expect("test server failed");
    });

    TestServer {
        addr,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    }
}
