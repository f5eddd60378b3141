//! JSON wire envelopes exchanged with the host.
//!
//! ```json
//! { "method": "POST", "url": "https://x/message", "headers": [["accept", "*/*"]], "body": "hi" }
//! { "status": 200, "headers": [["content-type", "text/plain"]], "body": "ok" }
//! ```

use serde::{Deserialize, Serialize};
use url::Url;

use crate::dispatch::types::{Request, Response};

/// Serialized form of a [`Request`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    pub method: String,
    pub url: String,
    #[serde(default)]
    pub headers: Vec<(String, String)>,
    #[serde(default)]
    pub body: Option<String>,
}

/// Serialized form of a [`Response`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub status: u16,
    #[serde(default)]
    pub headers: Vec<(String, String)>,
    #[serde(default)]
    pub body: Option<String>,
}

impl TryFrom<RequestEnvelope> for Request {
    type Error = url::ParseError;

    fn try_from(envelope: RequestEnvelope) -> Result<Self, Self::Error> {
        Ok(Request {
            method: envelope.method,
            url: Url::parse(&envelope.url)?,
            headers: envelope.headers,
            body: envelope.body,
        })
    }
}

impl From<Request> for RequestEnvelope {
    fn from(request: Request) -> Self {
        Self {
            method: request.method,
            url: request.url.into(),
            headers: request.headers,
            body: request.body,
        }
    }
}

impl From<Response> for ResponseEnvelope {
    fn from(response: Response) -> Self {
        Self {
            status: response.status,
            headers: response.headers,
            body: response.body,
        }
    }
}

impl From<ResponseEnvelope> for Response {
    fn from(envelope: ResponseEnvelope) -> Self {
        Self {
            status: envelope.status,
            headers: envelope.headers,
            body: envelope.body,
        }
    }
}
