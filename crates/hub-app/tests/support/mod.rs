//! Tiny in-process REST API backed by a shared idea list.

use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::{Value, json};

pub struct IdeaServer {
    pub base_url: String,
    pub ideas: Arc<Mutex<Vec<Value>>>,
    /// Methods that answer 500 until removed.
    pub failing: Arc<Mutex<Vec<&'static str>>>,
}

impl IdeaServer {
    pub fn start(seed: Vec<Value>) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("bind idea server");
        let port = server
            .server_addr()
            .to_ip()
            .map(|a| a.port())
            .expect("ip listener");
        let ideas = Arc::new(Mutex::new(seed));
        let failing = Arc::new(Mutex::new(Vec::new()));
        let (store, broken) = (Arc::clone(&ideas), Arc::clone(&failing));

        thread::spawn(move || {
            let mut next_id = 100;
            for mut request in server.incoming_requests() {
                let mut body = String::new();
                let _ = request.as_reader().read_to_string(&mut body);
                let method = request.method().to_string();
                let url = request.url().to_string();

                let (status, reply) = if broken.lock().unwrap().iter().any(|m| *m == method) {
                    (500, json!({"error": "boom"}))
                } else {
                    let mut ideas = store.lock().unwrap();
                    let id = url.rsplit('/').next().unwrap_or_default().to_string();
                    let position = ideas.iter().position(|i| i["id"] == id.as_str());
                    match (method.as_str(), url.as_str()) {
                        ("GET", "/ideas") => (200, json!({"data": *ideas})),
                        ("GET", "/stats") => (
                            200,
                            json!({"data": {"totalUsers": 1, "totalIdeas": ideas.len()}}),
                        ),
                        ("POST", "/ideas/create") => {
                            let mut idea: Value = serde_json::from_str(&body).unwrap();
                            idea["id"] = json!(next_id.to_string());
                            next_id += 1;
                            ideas.push(idea.clone());
                            (201, json!({"data": idea}))
                        }
                        ("PUT", _) => match position {
                            Some(pos) => {
                                let patch: Value = serde_json::from_str(&body).unwrap();
                                for (key, value) in patch.as_object().unwrap() {
                                    ideas[pos][key] = value.clone();
                                }
                                (200, json!({"data": ideas[pos]}))
                            }
                            None => (404, json!({"error": "not found"})),
                        },
                        ("DELETE", _) => match position {
                            Some(pos) => {
                                ideas.remove(pos);
                                (200, json!({}))
                            }
                            None => (404, json!({"error": "not found"})),
                        },
                        _ => (404, json!({"error": "no route"})),
                    }
                };

                let response = tiny_http::Response::from_string(reply.to_string())
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
            ideas,
            failing,
        }
    }

    pub fn fail(&self, method: &'static str) {
        self.failing.lock().unwrap().push(method);
    }
}
