//! HTTP action router library.
//!
//! A registry of path/method rules and a dispatcher that maps each incoming
//! request to exactly one registered handler.

pub mod admin;
pub mod config;
pub mod dispatch;
pub mod handlers;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::RouterConfig;
pub use dispatch::{Dispatcher, Handler, HandlerRef, Request, Response};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{HttpRouter, Method, RegistrationError, RouteSpec, ROUTABLE_METHODS};
