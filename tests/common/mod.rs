//! Shared utilities for integration testing.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A request as seen by the mock platform.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct RecordedRequest {
    pub path: String,
    pub authorization: Option<String>,
}

/// Mock control-plane API answering fixed bodies per request path.
/// Unknown paths get a 404 with a platform error envelope.
pub struct MockPlatform {
    pub addr: SocketAddr,
    routes: Arc<Mutex<HashMap<String, (u16, String)>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

#[allow(dead_code)]
impl MockPlatform {
    pub fn endpoint(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Script another response, e.g. one that needs this mock's address.
    pub fn respond(&self, path: &str, status: u16, body: impl Into<String>) {
        self.routes.lock().unwrap().insert(path.to_string(), (status, body.into()));
    }

    pub fn hits(&self, path: &str) -> usize {
        self.requests().iter().filter(|r| r.path == path).count()
    }
}

/// Start a mock platform on an ephemeral local port.
pub async fn start_mock_platform(routes: HashMap<String, (u16, String)>) -> MockPlatform {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let routes = Arc::new(Mutex::new(routes));
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = requests.clone();
    let scripted = routes.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let routes = scripted.clone();
                    let recorded = recorded.clone();
                    tokio::spawn(async move {
                        let mut buf = Vec::new();
                        let mut chunk = [0u8; 4096];
                        loop {
                            match socket.read(&mut chunk).await {
                                Ok(0) | Err(_) => break,
                                Ok(n) => {
                                    buf.extend_from_slice(&chunk[..n]);
                                    if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                                        break;
                                    }
                                }
                            }
                        }

                        let head = String::from_utf8_lossy(&buf).to_string();
                        let path = head
                            .lines()
                            .next()
                            .and_then(|line| line.split_whitespace().nth(1))
                            .unwrap_or("/")
                            .to_string();
                        let authorization = head
                            .lines()
                            .find(|line| line.to_ascii_lowercase().starts_with("authorization:"))
                            .map(|line| line["authorization:".len()..].trim().to_string());
                        recorded.lock().unwrap().push(RecordedRequest {
                            path: path.clone(),
                            authorization,
                        });

                        let scripted_response = routes.lock().unwrap().get(&path).cloned();
                        let (status, body) = scripted_response.unwrap_or_else(|| {
                            (
                                404,
                                r#"{"description":"Unknown request","error_code":"CF-NotFound","code":10000}"#.to_string(),
                            )
                        });
                        let status_text = match status {
                            200 => "200 OK",
                            401 => "401 Unauthorized",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            _ => "200 OK",
                        };

                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockPlatform { addr, routes, requests }
}
