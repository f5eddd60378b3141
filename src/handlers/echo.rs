//! Echo handler.

use async_trait::async_trait;
use serde_json::json;

use crate::dispatch::{Handler, HandlerError, Request, Response};

/// Answers with a JSON description of the request it received.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoHandler;

#[async_trait]
impl Handler for EchoHandler {
    async fn call(&self, request: Request) -> Result<Response, HandlerError> {
        let body = json!({
            "method": request.method,
            "url": request.url.as_str(),
            "pathname": request.pathname(),
            "headers": request.headers,
            "body": request.body,
        });
        Ok(Response::json(200, &body))
    }
}
