//! Fixed response handler.

use async_trait::async_trait;

use crate::dispatch::{Handler, HandlerError, Request, Response};

/// Answers every request with the same status, body and content type.
#[derive(Debug, Clone)]
pub struct FixedResponseHandler {
    status: u16,
    body: String,
    content_type: String,
}

impl FixedResponseHandler {
    pub fn new(status: u16, body: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            content_type: content_type.into(),
        }
    }
}

#[async_trait]
impl Handler for FixedResponseHandler {
    async fn call(&self, _request: Request) -> Result<Response, HandlerError> {
        Ok(Response::new(self.status)
            .with_header("content-type", self.content_type.clone())
            .with_body(self.body.clone()))
    }
}
