#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use actix_web::{dev::ServerHandle, http::StatusCode, web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::Value;

use quiz_relay::config::Config;

/// What the fake upstream saw on its last call.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

struct Shared {
    status: StatusCode,
    reply: String,
    hits: AtomicUsize,
    last: Mutex<Option<RecordedRequest>>,
}

/// A throwaway HTTP server standing in for an LLM provider. Every request,
/// whatever its path, gets the same canned status and body.
pub struct FakeUpstream {
    pub base_url: String,
    shared: Arc<Shared>,
    handle: ServerHandle,
}

async fn record(req: HttpRequest, body: web::Bytes, shared: web::Data<Arc<Shared>>) -> HttpResponse {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let recorded = RecordedRequest {
        method: req.method().to_string(),
        path: req.path().to_string(),
        query: req.query_string().to_string(),
        authorization: header("authorization"),
        content_type: header("content-type"),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    };

    shared.hits.fetch_add(1, Ordering::SeqCst);
    *shared.last.lock().unwrap() = Some(recorded);

    HttpResponse::build(shared.status)
        .content_type("application/json")
        .body(shared.reply.clone())
}

impl FakeUpstream {
    pub async fn start(status: StatusCode, reply: impl Into<String>) -> Self {
        let shared = Arc::new(Shared {
            status,
            reply: reply.into(),
            hits: AtomicUsize::new(0),
            last: Mutex::new(None),
        });

        let app_shared = Arc::clone(&shared);
        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(Arc::clone(&app_shared)))
                .default_service(web::to(record))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind fake upstream");

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base_url: format!("http://{}", addr),
            shared,
            handle,
        }
    }

    /// Replies like a chat-completions endpoint whose message content is
    /// `content`.
    pub async fn openai_replying(content: &str) -> Self {
        let reply = serde_json::json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        });
        Self::start(StatusCode::OK, reply.to_string()).await
    }

    /// Replies like a generate-content endpoint whose first part is `text`.
    pub async fn gemini_replying(text: &str) -> Self {
        let reply = serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": text }], "role": "model" },
                "finishReason": "STOP"
            }]
        });
        Self::start(StatusCode::OK, reply.to_string()).await
    }

    pub fn hits(&self) -> usize {
        self.shared.hits.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.shared
            .last
            .lock()
            .unwrap()
            .clone()
            .expect("fake upstream received no request")
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

/// Configuration built from explicit pairs only, never from the process
/// environment.
pub fn config_from(pairs: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned())
}

/// Writes `contents` to a fresh file under the temp directory.
pub fn write_template(contents: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("prompt-{}.md", uuid::Uuid::new_v4()));
    std::fs::write(&path, contents).expect("write template");
    path
}
