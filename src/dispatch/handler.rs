//! The handler capability.
//!
//! A handler turns a [`Request`] into a [`Response`]. It may suspend (to call
//! out to storage, for example) and may fail with a [`HandlerError`].
//!
//! Any `async` function or closure of the right shape is a handler:
//!
//! ```rust,ignore
//! use action_router::dispatch::{handler_fn, HandlerError, Request, Response};
//!
//! let hello = handler_fn(|req: Request| async move {
//!     Ok::<_, HandlerError>(Response::text(200, format!("hello from {}", req.pathname())))
//! });
//! ```

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::dispatch::error::HandlerError;
use crate::dispatch::types::{Request, Response};

#[async_trait]
pub trait Handler: Send + Sync {
    async fn call(&self, request: Request) -> Result<Response, HandlerError>;
}

/// Shared, type-erased handler stored in the routing table.
pub type HandlerRef = Arc<dyn Handler>;

#[async_trait]
impl<F, Fut> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response, HandlerError>> + Send + 'static,
{
    async fn call(&self, request: Request) -> Result<Response, HandlerError> {
        (self)(request).await
    }
}

/// Wrap an async function or closure as a [`HandlerRef`].
pub fn handler_fn<F, Fut>(f: F) -> HandlerRef
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response, HandlerError>> + Send + 'static,
{
    Arc::new(f)
}
