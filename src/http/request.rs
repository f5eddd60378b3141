//! Request handling and transformation.
//!
//! # Responsibilities
//! - Tag every request with an ID (UUID v4) and echo it back
//! - Convert the native request into the JSON request envelope
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Body size limit enforced while reading the body
//! - Non UTF-8 header values are dropped; bodies are decoded lossily
//! - The envelope authority is validated so it can never change the path

use axum::body::Body;
use std::str::FromStr;

use axum::http::uri::Authority;
use axum::http::{header, HeaderName, Request};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

use crate::dispatch::RequestEnvelope;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Layer that assigns an `x-request-id` to requests that lack one.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(HeaderName::from_static(X_REQUEST_ID), MakeRequestUuid)
}

/// Layer that copies the request ID onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(HeaderName::from_static(X_REQUEST_ID))
}

/// The request ID header value, or "unknown".
pub fn request_id<B>(request: &Request<B>) -> String {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

/// Build the host request envelope, reading at most `max_body_size` bytes.
pub async fn to_envelope(
    request: Request<Body>,
    max_body_size: usize,
) -> Result<RequestEnvelope, axum::Error> {
    let (parts, body) = request.into_parts();

    let host = parts
        .headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| Authority::from_str(h).ok())
        .or_else(|| parts.uri.authority().cloned())
        .map(|a| a.as_str().to_string())
        .unwrap_or_else(|| "localhost".to_string());
    let path = parts
        .uri
        .path_and_query()
        .map(|p| p.as_str())
        .filter(|p| p.starts_with('/'))
        .unwrap_or("/");

    let headers = parts
        .headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();

    let bytes = axum::body::to_bytes(body, max_body_size).await?;
    let body = (!bytes.is_empty()).then(|| String::from_utf8_lossy(&bytes).into_owned());

    Ok(RequestEnvelope {
        method: parts.method.as_str().to_string(),
        url: format!("http://{host}{path}"),
        headers,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_to_envelope() {
        let request = Request::builder()
            .method("POST")
            .uri("/message?x=1")
            .header("Host", "example.com")
            .header("x-request-id", "abc")
            .body(Body::from("hello"))
            .unwrap();

        assert_eq!(request_id(&request), "abc");

        let envelope = to_envelope(request, 1024).await.unwrap();
        assert_eq!(envelope.method, "POST");
        assert_eq!(envelope.url, "http://example.com/message?x=1");
        assert_eq!(envelope.body.as_deref(), Some("hello"));
        assert!(envelope.headers.contains(&("host".to_string(), "example.com".to_string())));
    }

    #[tokio::test]
    async fn test_empty_body_is_none() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let envelope = to_envelope(request, 1024).await.unwrap();
        assert_eq!(envelope.url, "http://localhost/");
        assert_eq!(envelope.body, None);
    }

    #[tokio::test]
    async fn test_host_header_cannot_change_path() {
        for host in ["evil/admin", "evil?", "evil#", "a b"] {
            let request = Request::builder()
                .uri("/public?q=1")
                .header("Host", host)
                .body(Body::empty())
                .unwrap();
            let envelope = to_envelope(request, 1024).await.unwrap();
            assert_eq!(envelope.url, "http://localhost/public?q=1", "host {host:?}");
        }
    }

    #[tokio::test]
    async fn test_host_with_port_is_kept() {
        let request = Request::builder()
            .uri("/public")
            .header("Host", "example.com:8080")
            .body(Body::empty())
            .unwrap();
        let envelope = to_envelope(request, 1024).await.unwrap();
        assert_eq!(envelope.url, "http://example.com:8080/public");
    }

    #[tokio::test]
    async fn test_body_limit() {
        let request = Request::builder()
            .uri("/")
            .body(Body::from(vec![b'a'; 64]))
            .unwrap();
        assert!(to_envelope(request, 16).await.is_err());
    }
}
