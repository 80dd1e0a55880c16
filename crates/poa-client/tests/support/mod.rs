//! Loopback API server for client tests.
//!
//! Serves canned JSON responses keyed by `"METHOD /path?query"` and records
//! every request it sees. Unknown routes answer 404.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

#[derive(Debug, Clone)]
pub struct Captured {
    pub method: String,
    pub url: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

pub struct MockApi {
    server: Arc<tiny_http::Server>,
    requests: Arc<Mutex<Vec<Captured>>>,
    worker: Option<JoinHandle<()>>,
    pub base_url: String,
}

impl MockApi {
    /// Start serving `routes`: `(route, status, body)`.
    pub fn start(routes: &[(&str, u16, serde_json::Value)]) -> Self {
        let server = Arc::new(tiny_http::Server::http("127.0.0.1:0").expect("bind loopback"));
        let port = server
            .server_addr()
            .to_ip()
            .map(|addr| addr.port())
            .expect("ip listener");
        let routes: HashMap<String, (u16, String)> = routes
            .iter()
            .map(|(route, status, body)| ((*route).to_string(), (*status, body.to_string())))
            .collect();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let worker = {
            let server = Arc::clone(&server);
            let requests = Arc::clone(&requests);
            std::thread::spawn(move || {
                while let Ok(mut request) = server.recv() {
                    let header = |name: &'static str| {
                        request
                            .headers()
                            .iter()
                            .find(|h| h.field.equiv(name))
                            .map(|h| h.value.as_str().to_string())
                    };
                    let authorization = header("Authorization");
                    let content_type = header("Content-Type");
                    let mut body = String::new();
                    let _ = request.as_reader().read_to_string(&mut body);
                    let method = request.method().as_str().to_string();
                    let url = request.url().to_string();

                    let key = format!("{method} {url}");
                    let (status, payload) = routes.get(&key).cloned().unwrap_or((
                        404,
                        r#"{"success":false,"message":"Ruta no encontrada"}"#.to_string(),
                    ));
                    requests.lock().unwrap().push(Captured {
                        method,
                        url,
                        authorization,
                        content_type,
                        body,
                    });

                    let response = tiny_http::Response::from_string(payload)
                        .with_status_code(status)
                        .with_header(
                            tiny_http::Header::from_bytes("Content-Type", "application/json")
                                .unwrap(),
                        );
                    let _ = request.respond(response);
                }
            })
        };

        Self {
            server,
            requests,
            worker: Some(worker),
            base_url: format!("http://127.0.0.1:{port}/api"),
        }
    }

    pub fn requests(&self) -> Vec<Captured> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
