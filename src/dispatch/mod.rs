//! Request dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! JSON request envelope (from the host)
//!     → codec.rs (decode into a Request descriptor)
//!     → routing::HttpRouter::lookup (route hint or URL pathname)
//!     → handler.rs (invoke the matched handler) | synthesize 404
//!     → codec.rs (encode the Response descriptor)
//!     → JSON response envelope (back to the host)
//! ```
//!
//! # Design Decisions
//! - The host codec is injected, so the dispatcher can run against fakes
//! - Every failure, including panics, is folded into one `DispatchError`
//! - No match is a 404 response, never an error
//! - No retries, timeouts or cancellation: those belong to the transport

pub mod codec;
pub mod dispatcher;
pub mod envelope;
pub mod error;
pub mod handler;
pub mod types;

pub use codec::{HostCodec, JsonCodec};
pub use dispatcher::Dispatcher;
pub use envelope::{RequestEnvelope, ResponseEnvelope};
pub use error::{DispatchError, ErrorPayload, HandlerError};
pub use handler::{handler_fn, Handler, HandlerRef};
pub use types::{Request, Response};
