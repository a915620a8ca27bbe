//! Shared helpers for integration tests.

use std::sync::Arc;

use blog_search::model::types::SearchEntry;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::Notify;

pub const SITE_DIR: &str = "tests/fixtures/site";

#[allow(dead_code)]
pub fn fixture_page() -> String {
    std::fs::read_to_string(format!("{SITE_DIR}/index.html")).expect("read fixture page")
}

#[allow(dead_code)]
pub fn remote_entries(n: usize) -> Vec<SearchEntry> {
    (0..n)
        .map(|i| {
            SearchEntry::new(
                format!("Remote post {i}"),
                "",
                format!("hello from the full corpus #{i}"),
                format!("/remote/{i}/"),
            )
        })
        .collect()
}

/// Loopback HTTP server answering every request with `status` and `body`.
///
/// Responses are held until `gate` is notified, when one is given, so tests
/// can interleave queries with an in-flight fetch.
#[allow(dead_code)]
pub struct StubServer {
    pub base_url: String,
    pub gate: Option<Arc<Notify>>,
}

#[allow(dead_code)]
impl StubServer {
    pub async fn start(status: u16, body: impl Into<String>) -> Self {
        Self::spawn(status, body.into(), None).await
    }

    pub async fn gated(status: u16, body: impl Into<String>) -> Self {
        Self::spawn(status, body.into(), Some(Arc::new(Notify::new()))).await
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    async fn spawn(status: u16, body: String, gate: Option<Arc<Notify>>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind loopback");
        let addr = listener.local_addr().expect("local addr");
        let server_gate = gate.clone();
        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let body = body.clone();
                let gate = server_gate.clone();
                tokio::spawn(async move {
                    let mut buf = [0u8; 4096];
                    let _ = stream.read(&mut buf).await;
                    if let Some(gate) = gate {
                        gate.notified().await;
                    }
                    let reason = if status == 200 { "OK" } else { "Error" };
                    let response = format!(
                        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });
        Self {
            base_url: format!("http://{addr}/"),
            gate,
        }
    }
}
