//! Dispatch-time errors.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// What a failure carries: either a structured value passed through
/// verbatim, or a plain description.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ErrorPayload {
    Structured(Value),
    Message(String),
}

impl ErrorPayload {
    pub fn message(msg: impl Into<String>) -> Self {
        ErrorPayload::Message(msg.into())
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPayload::Structured(value) => write!(f, "{value}"),
            ErrorPayload::Message(msg) => f.write_str(msg),
        }
    }
}

/// An error raised on purpose by a handler.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{0}")]
pub struct HandlerError(pub ErrorPayload);

impl HandlerError {
    /// Fail with a structured value that reaches the caller unchanged.
    pub fn structured(value: Value) -> Self {
        Self(ErrorPayload::Structured(value))
    }

    pub fn message(msg: impl Into<String>) -> Self {
        Self(ErrorPayload::message(msg))
    }
}

/// The single failure channel of [`Dispatcher::handle_request`].
///
/// [`Dispatcher::handle_request`]: crate::dispatch::Dispatcher::handle_request
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    /// The request envelope could not be decoded.
    #[error("failed to decode request: {0}")]
    Decode(ErrorPayload),

    /// The matched handler failed or panicked.
    #[error("handler for {route} failed: {payload}")]
    Handler { route: String, payload: ErrorPayload },

    /// The response could not be encoded.
    #[error("failed to encode response: {0}")]
    Encode(ErrorPayload),

    /// The dispatcher was used without a host codec.
    #[error("{0}")]
    HostUnavailable(String),
}

impl DispatchError {
    pub fn payload(&self) -> ErrorPayload {
        match self {
            DispatchError::Decode(p) | DispatchError::Encode(p) => p.clone(),
            DispatchError::Handler { payload, .. } => payload.clone(),
            DispatchError::HostUnavailable(msg) => ErrorPayload::Message(msg.clone()),
        }
    }

    /// Short label used in logs and metrics.
    pub fn stage(&self) -> &'static str {
        match self {
            DispatchError::Decode(_) => "decode",
            DispatchError::Handler { .. } => "handler",
            DispatchError::Encode(_) => "encode",
            DispatchError::HostUnavailable(_) => "host",
        }
    }
}
