//! Built-in handlers that can be attached to routes from the config file.

pub mod echo;
pub mod fixed;

use std::sync::Arc;

use crate::config::schema::HandlerConfig;
use crate::dispatch::HandlerRef;

pub use echo::EchoHandler;
pub use fixed::FixedResponseHandler;

/// Instantiate the handler described by `config`.
pub fn from_config(config: &HandlerConfig) -> HandlerRef {
    match config {
        HandlerConfig::Echo => Arc::new(EchoHandler),
        HandlerConfig::Static {
            status,
            body,
            content_type,
        } => Arc::new(FixedResponseHandler::new(*status, body.clone(), content_type.clone())),
    }
}
