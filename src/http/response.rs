//! Response handling and transformation.
//!
//! # Responsibilities
//! - Convert the JSON response envelope into a native response
//! - Map dispatch failures to 500 responses carrying the error payload
//!
//! # Design Decisions
//! - Invalid status codes become 500 rather than being passed through
//! - Header names or values the HTTP stack rejects are dropped with a warning

use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::dispatch::{DispatchError, ResponseEnvelope};

/// Build the native response described by `envelope`.
pub fn from_envelope(envelope: ResponseEnvelope) -> Response {
    let status = StatusCode::from_u16(envelope.status).unwrap_or_else(|_| {
        tracing::warn!(status = envelope.status, "Handler returned an invalid status code");
        StatusCode::INTERNAL_SERVER_ERROR
    });

    let mut response = Response::new(envelope.body.map(Body::from).unwrap_or_else(Body::empty));
    *response.status_mut() = status;

    let headers = response.headers_mut();
    for (name, value) in envelope.headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(&value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.append(name, value);
            }
            _ => tracing::warn!(header = %name, "Dropping invalid response header"),
        }
    }

    response
}

/// A 500 response whose JSON body carries the dispatch error payload.
pub fn from_dispatch_error(err: &DispatchError) -> Response {
    let body = serde_json::json!({
        "error": err.payload(),
        "stage": err.stage(),
    });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::ErrorPayload;

    #[tokio::test]
    async fn test_from_envelope() {
        let envelope = ResponseEnvelope {
            status: 201,
            headers: vec![
                ("content-type".into(), "text/plain".into()),
                ("bad header".into(), "x".into()),
            ],
            body: Some("created".into()),
        };
        let response = from_envelope(envelope);

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers().len(), 1);
        assert_eq!(response.headers()["content-type"], "text/plain");

        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&bytes[..], b"created");
    }

    #[test]
    fn test_invalid_status() {
        let envelope = ResponseEnvelope {
            status: 1000,
            headers: vec![],
            body: None,
        };
        assert_eq!(from_envelope(envelope).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_dispatch_error_body() {
        let err = DispatchError::Handler {
            route: "/a".into(),
            payload: ErrorPayload::Structured(serde_json::json!({"code": 7})),
        };
        let response = from_dispatch_error(&err);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({"error": {"code": 7}, "stage": "handler"}));
    }
}
