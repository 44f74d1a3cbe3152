//! テスト用の解析サービス（axum）
//!
//! 受信したmultipartフィールドを記録し、指定されたステータスとJSONを返す。

#![allow(dead_code)]

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// 受信したフィールド
#[derive(Debug, Clone, Default)]
pub struct ReceivedField {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ReceivedField {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).to_string()
    }
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: serde_json::Value,
    delay: Duration,
    received: Arc<Mutex<Vec<HashMap<String, ReceivedField>>>>,
}

pub struct MockService {
    pub addr: SocketAddr,
    received: Arc<Mutex<Vec<HashMap<String, ReceivedField>>>>,
}

impl MockService {
    pub fn endpoint(&self) -> String {
        format!("http://{}/analyze", self.addr)
    }

    /// 受信したリクエスト数
    pub fn request_count(&self) -> usize {
        self.received.lock().unwrap().len()
    }

    pub fn last_request(&self) -> HashMap<String, ReceivedField> {
        self.received.lock().unwrap().last().cloned().expect("no request received")
    }
}

/// 指定レスポンスを返すサーバーを起動
pub async fn start(status: StatusCode, body: serde_json::Value) -> MockService {
    start_delayed(status, body, Duration::ZERO).await
}

/// 受信後 `delay` 待ってから応答するサーバーを起動
pub async fn start_delayed(status: StatusCode, body: serde_json::Value, delay: Duration) -> MockService {
    let received = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        status,
        body,
        delay,
        received: received.clone(),
    };

    let app = Router::new()
        .route("/analyze", post(handle_analyze))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind failed");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock server failed");
    });

    MockService { addr, received }
}

/// 接続を受け付けないアドレス
pub async fn unreachable_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind failed");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}/analyze", addr)
}

/// ステータス行を返した後、本文の途中で切断するサーバー
pub async fn truncated_body_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind failed");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            // multipart の終端境界まで読む
            while !request.ends_with(b"--\r\n") {
                match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let _ = socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 512\r\n\r\n{\"report\": \"cut",
                )
                .await;
            let _ = socket.shutdown().await;
        }
    });

    format!("http://{}/analyze", addr)
}

async fn handle_analyze(
    State(state): State<MockState>,
    mut multipart: Multipart,
) -> (StatusCode, Json<serde_json::Value>) {
    let mut fields = HashMap::new();

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or("").to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        fields.insert(
            name,
            ReceivedField {
                file_name,
                content_type,
                bytes,
            },
        );
    }

    state.received.lock().unwrap().push(fields);
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    (state.status, Json(state.body.clone()))
}
