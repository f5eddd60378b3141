//! Host decode/encode capabilities.
//!
//! # Responsibilities
//! - Turn a JSON request envelope into a [`Request`]
//! - Turn a [`Response`] into a JSON response envelope
//!
//! # Design Decisions
//! - Injected into the dispatcher so tests can substitute fakes
//! - Failures are reported as string payloads, never panics

use async_trait::async_trait;

use crate::dispatch::envelope::{RequestEnvelope, ResponseEnvelope};
use crate::dispatch::error::ErrorPayload;
use crate::dispatch::types::{Request, Response};

#[async_trait]
pub trait HostCodec: Send + Sync {
    /// Convert a host request envelope into a request descriptor.
    async fn decode_request(&self, raw: &str) -> Result<Request, ErrorPayload>;

    /// Convert a response descriptor into a host response envelope.
    async fn encode_response(&self, response: Response) -> Result<String, ErrorPayload>;
}

/// The default codec for the JSON envelopes in [`crate::dispatch::envelope`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[async_trait]
impl HostCodec for JsonCodec {
    async fn decode_request(&self, raw: &str) -> Result<Request, ErrorPayload> {
        let envelope: RequestEnvelope = serde_json::from_str(raw)
            .map_err(|e| ErrorPayload::message(format!("invalid request envelope: {e}")))?;
        let url = envelope.url.clone();
        Request::try_from(envelope)
            .map_err(|e| ErrorPayload::message(format!("invalid request url '{url}': {e}")))
    }

    async fn encode_response(&self, response: Response) -> Result<String, ErrorPayload> {
        serde_json::to_string(&ResponseEnvelope::from(response))
            .map_err(|e| ErrorPayload::message(format!("failed to serialize response: {e}")))
    }
}
