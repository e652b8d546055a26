#![allow(dead_code)]

use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::header::CONTENT_TYPE;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use serde_json::{json, Value};
use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use url::Url;

/// Number of records the mock serves, like the real API.
pub const RECORDS: u64 = 200;

/// Route `tracing` output through the test harness. `RUST_LOG` controls verbosity.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// The record the mock serves for `id`.
pub fn record(id: u64) -> Value {
    json!({
        "userId": (id - 1) / 20 + 1,
        "id": id,
        "title": format!("todo number {}", id),
        "completed": id % 3 == 0,
    })
}

/// Answer every connection on an ephemeral port of the current runtime with `handler`, and
/// return the server's root URL.
pub async fn serve<H, F>(handler: H) -> Url
where
    H: Fn(Request<Incoming>) -> F + Clone + Send + 'static,
    F: Future<Output = Result<Response<Full<Bytes>>, Infallible>> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .expect("bind test server");
    let addr = listener.local_addr().expect("test server address");

    tokio::spawn(async move {
        loop {
            let (stream, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => break,
            };
            let handler = handler.clone();
            tokio::spawn(async move {
                let _ = hyper::server::conn::http1::Builder::new()
                    .serve_connection(TokioIo::new(stream), hyper::service::service_fn(handler))
                    .await;
            });
        }
    });

    Url::parse(&format!("http://{}/", addr)).expect("test server url")
}

/// Start a JSONPlaceholder look-alike and return its root URL.
pub async fn mock_api() -> Url {
    serve(handle).await
}

/// An address nothing listens on.
pub async fn dead_api() -> Url {
    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("address");
    drop(listener);
    Url::parse(&format!("http://{}/", addr)).expect("url")
}

/// A JSON response.
pub fn respond(status: StatusCode, body: Value) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json; charset=utf-8")
        .body(Full::new(Bytes::from(body.to_string())))
        .expect("valid response")
}

async fn handle(req: Request<Incoming>) -> Result<Response<Full<Bytes>>, Infallible> {
    let (parts, body) = req.into_parts();
    let body = body
        .collect()
        .await
        .map(|b| b.to_bytes())
        .unwrap_or_default();
    let submitted: Value = serde_json::from_slice(&body).unwrap_or_else(|_| json!({}));

    let segments: Vec<&str> = parts
        .uri
        .path()
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();
    let id = match segments.as_slice() {
        ["todos"] => None,
        ["todos", id] => match id.parse::<u64>() {
            Ok(id) => Some(id),
            Err(_) => return Ok(respond(StatusCode::NOT_FOUND, json!({}))),
        },
        _ => return Ok(respond(StatusCode::NOT_FOUND, json!({}))),
    };
    let exists = |id: u64| (1..=RECORDS).contains(&id);

    Ok(match (parts.method, id) {
        (Method::GET, None) => {
            let completed = parts.uri.query().and_then(|q| {
                q.split('&')
                    .filter_map(|pair| pair.split_once('='))
                    .find(|(k, _)| *k == "completed")
                    .map(|(_, v)| v == "true")
            });
            let todos: Vec<Value> = (1..=RECORDS)
                .map(record)
                .filter(|r| completed.map_or(true, |c| r["completed"] == c))
                .collect();
            respond(StatusCode::OK, Value::Array(todos))
        }
        (Method::POST, None) => {
            let mut created = submitted;
            created["id"] = json!(RECORDS + 1);
            respond(StatusCode::CREATED, created)
        }
        (Method::GET, Some(id)) if exists(id) => respond(StatusCode::OK, record(id)),
        (Method::PUT, Some(id)) if exists(id) => {
            let mut updated = submitted;
            updated["id"] = json!(id);
            respond(StatusCode::OK, updated)
        }
        (Method::DELETE, Some(_)) => respond(StatusCode::OK, json!({})),
        _ => respond(StatusCode::NOT_FOUND, json!({})),
    })
}
