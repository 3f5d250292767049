#![allow(dead_code)]

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::Instant;

pub const USER_ID: &str = "887557388700368896";

/// What the fake relay does with each connection.
#[derive(Clone)]
pub struct Script {
    /// Sent as HELLO before the subscribe frame is read.
    pub hello_interval_ms: Option<u64>,
    /// Sent, in order, once the client has subscribed.
    pub frames: Vec<serde_json::Value>,
    /// How long to keep the socket open after the frames.
    pub hold: Duration,
    /// Status and body for the REST lookup.
    pub rest: (StatusCode, serde_json::Value),
}

impl Default for Script {
    fn default() -> Self {
        Self {
            hello_interval_ms: None,
            frames: Vec::new(),
            hold: Duration::from_secs(30),
            rest: (
                StatusCode::OK,
                serde_json::json!({ "success": true, "data": presence("online") }),
            ),
        }
    }
}

/// In-process stand-in for the presence relay, serving both the socket and
/// the REST lookup on one port.
#[derive(Clone)]
pub struct FakeRelay {
    script: Arc<Script>,
    pub connections: Arc<AtomicUsize>,
    open: Arc<AtomicUsize>,
    pub max_open: Arc<AtomicUsize>,
    pub connected_at: Arc<Mutex<Vec<Instant>>>,
    pub received: Arc<Mutex<Vec<serde_json::Value>>>,
    pub rest_lookups: Arc<Mutex<Vec<String>>>,
}

impl FakeRelay {
    pub fn new(script: Script) -> Self {
        Self {
            script: Arc::new(script),
            connections: Arc::new(AtomicUsize::new(0)),
            open: Arc::new(AtomicUsize::new(0)),
            max_open: Arc::new(AtomicUsize::new(0)),
            connected_at: Arc::new(Mutex::new(Vec::new())),
            received: Arc::new(Mutex::new(Vec::new())),
            rest_lookups: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Binds on port 0, spawns the server, and returns `(ws_url, rest_url)`.
    pub async fn spawn(&self) -> (String, String) {
        let app = Router::new()
            .route("/socket", get(socket))
            .route("/v1/users/{id}", get(lookup))
            .with_state(self.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (
            format!("ws://127.0.0.1:{}/socket", addr.port()),
            format!("http://127.0.0.1:{}/v1", addr.port()),
        )
    }

    pub fn connection_count(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    pub fn received(&self) -> Vec<serde_json::Value> {
        self.received.lock().unwrap().clone()
    }

    async fn session(self, mut socket: WebSocket) {
        self.connections.fetch_add(1, Ordering::SeqCst);
        self.connected_at.lock().unwrap().push(Instant::now());
        let now_open = self.open.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_open.fetch_max(now_open, Ordering::SeqCst);

        self.serve(&mut socket).await;

        let _ = socket.send(Message::Close(None)).await;
        self.open.fetch_sub(1, Ordering::SeqCst);
    }

    async fn serve(&self, socket: &mut WebSocket) {
        if let Some(interval) = self.script.hello_interval_ms {
            let hello = serde_json::json!({ "op": 1, "d": { "heartbeat_interval": interval } });
            if socket.send(Message::Text(hello.to_string().into())).await.is_err() {
                return;
            }
        }

        match socket.recv().await {
            Some(Ok(Message::Text(text))) => self.record(text.as_str()),
            _ => return,
        }

        for frame in &self.script.frames {
            if socket
                .send(Message::Text(frame.to_string().into()))
                .await
                .is_err()
            {
                return;
            }
        }

        let deadline = tokio::time::sleep(self.script.hold);
        tokio::pin!(deadline);
        loop {
            tokio::select! {
                _ = &mut deadline => return,
                msg = socket.recv() => match msg {
                    Some(Ok(Message::Text(text))) => self.record(text.as_str()),
                    Some(Ok(Message::Close(_))) | None | Some(Err(_)) => return,
                    Some(Ok(_)) => {}
                },
            }
        }
    }

    fn record(&self, text: &str) {
        if let Ok(value) = serde_json::from_str(text) {
            self.received.lock().unwrap().push(value);
        }
    }
}

async fn socket(ws: WebSocketUpgrade, State(relay): State<FakeRelay>) -> Response {
    ws.on_upgrade(move |socket| relay.session(socket))
}

async fn lookup(Path(id): Path<String>, State(relay): State<FakeRelay>) -> Response {
    relay.rest_lookups.lock().unwrap().push(id);
    let (status, body) = relay.script.rest.clone();
    (status, Json(body)).into_response()
}

/// A presence payload with the given status and no activities.
pub fn presence(status: &str) -> serde_json::Value {
    serde_json::json!({
        "discord_status": status,
        "discord_user": {
            "id": USER_ID,
            "username": "dscbmr",
            "display_name": "Bimmer"
        },
        "activities": []
    })
}

pub fn event(t: &str, d: serde_json::Value) -> serde_json::Value {
    serde_json::json!({ "op": 0, "seq": 1, "t": t, "d": d })
}

/// Poll `cond` every 10ms until it holds or `within` elapses.
pub async fn wait_until(within: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + within;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    cond()
}
