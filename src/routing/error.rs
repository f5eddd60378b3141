//! Route registration errors.

use thiserror::Error;

use crate::routing::method::Method;

/// Errors returned when a route definition is rejected.
///
/// These describe mistakes in the route table itself and surface at startup,
/// never while serving traffic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// No handler was attached to the route.
    #[error("route handler is missing")]
    MissingHandler,

    /// No method was given.
    #[error("route method is missing")]
    MissingMethod,

    /// The method is not one of the routable methods.
    #[error("'{0}' is not a routable method (expected one of GET, POST, PUT, DELETE, OPTIONS, PATCH)")]
    InvalidMethod(String),

    /// Neither or both of `path` and `path_prefix` were set.
    #[error("exactly one of `path` or `path_prefix` must be set")]
    BothPathAndPrefix,

    #[error("path '{0}' does not start with '/'")]
    PathDoesNotStartWithSlash(String),

    #[error("path prefix '{0}' does not start with '/'")]
    PrefixDoesNotStartWithSlash(String),

    #[error("path prefix '{0}' does not end with '/'")]
    PrefixDoesNotEndWithSlash(String),

    #[error("route for {1} {0} is already registered")]
    DuplicateRoute(String, Method),

    #[error("prefix route for {1} {0}* is already registered")]
    DuplicatePrefix(String, Method),
}
