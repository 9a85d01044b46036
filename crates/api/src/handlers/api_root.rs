//! Browsable root of the cinema API.

use axum::http::header::HOST;
use axum::http::HeaderMap;
use axum::Json;
use serde_json::{Map, Value};

/// Collection prefixes mounted under `/api/cinema/`, in display order.
pub const CINEMA_PREFIXES: [&str; 6] = [
    "genres",
    "actors",
    "cinema_halls",
    "movies",
    "movie_sessions",
    "orders",
];

/// GET /api/cinema/
///
/// Maps each collection prefix to its list URL. URLs are absolute when the
/// request carries a `Host` header.
pub async fn api_root(headers: HeaderMap) -> Json<Value> {
    let host = headers.get(HOST).and_then(|v| v.to_str().ok());
    Json(Value::Object(root_links(host)))
}

fn root_links(host: Option<&str>) -> Map<String, Value> {
    let base = match host {
        Some(host) => format!("http://{host}/api/cinema"),
        None => "/api/cinema".to_string(),
    };
    CINEMA_PREFIXES
        .iter()
        .map(|prefix| (prefix.to_string(), Value::String(format!("{base}/{prefix}/"))))
        .collect()
}
