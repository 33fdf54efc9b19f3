//! Stand-in identity provider over real HTTP.

use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub url: String,
    pub body: String,
    pub apikey: Option<String>,
    pub authorization: Option<String>,
}

/// Route handler: `(method, url, body) -> (status, body)`.
pub type Handler = dyn Fn(&str, &str, &str) -> (u16, String) + Send + Sync;

pub struct MockProvider {
    pub base_url: String,
    recorded: Arc<Mutex<Vec<Recorded>>>,
}

fn header(request: &tiny_http::Request, name: &str) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|h| h.field.as_str().as_str().eq_ignore_ascii_case(name))
        .map(|h| h.value.as_str().to_string())
}

impl MockProvider {
    pub fn start(handler: Box<Handler>) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("bind mock provider");
        let port = server
            .server_addr()
            .to_ip()
            .map(|a| a.port())
            .expect("ip listener");
        let recorded = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&recorded);

        thread::spawn(move || {
            for mut request in server.incoming_requests() {
                let mut body = String::new();
                let _ = request.as_reader().read_to_string(&mut body);
                let method = request.method().to_string();
                let url = request.url().to_string();
                let (status, reply) = handler(&method, &url, &body);
                log.lock().unwrap().push(Recorded {
                    apikey: header(&request, "apikey"),
                    authorization: header(&request, "authorization"),
                    method,
                    url,
                    body,
                });

                let response = tiny_http::Response::from_string(reply)
                    .with_status_code(status)
                    .with_header(
                        tiny_http::Header::from_bytes("Content-Type", "application/json")
                            .unwrap(),
                    );
                let _ = request.respond(response);
            }
        });

        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            recorded,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.recorded.lock().unwrap().clone()
    }
}
