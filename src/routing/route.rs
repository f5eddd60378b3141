//! Route definitions.
//!
//! # Responsibilities
//! - Describe one registration request (`RouteSpec`)
//! - Check its shape before it reaches the table
//! - Describe one listed rule (`RouteEntry`)

use std::fmt;

use crate::dispatch::handler::HandlerRef;
use crate::routing::error::RegistrationError;
use crate::routing::method::Method;

/// A single route registration.
///
/// Fields are optional so that incomplete definitions (for example from a
/// config file) can be rejected with a precise error instead of failing to
/// construct. Use [`RouteSpec::exact`] or [`RouteSpec::prefix`] for the
/// well-formed shapes.
#[derive(Clone, Default)]
pub struct RouteSpec {
    pub path: Option<String>,
    pub path_prefix: Option<String>,
    pub method: Option<String>,
    pub handler: Option<HandlerRef>,
}

impl RouteSpec {
    /// A route matching one literal path.
    pub fn exact(path: impl Into<String>, method: impl Into<String>, handler: HandlerRef) -> Self {
        Self {
            path: Some(path.into()),
            path_prefix: None,
            method: Some(method.into()),
            handler: Some(handler),
        }
    }

    /// A route matching every path that starts with `prefix`.
    pub fn prefix(
        prefix: impl Into<String>,
        method: impl Into<String>,
        handler: HandlerRef,
    ) -> Self {
        Self {
            path: None,
            path_prefix: Some(prefix.into()),
            method: Some(method.into()),
            handler: Some(handler),
        }
    }

    /// Check everything that does not depend on the current table contents.
    ///
    /// Rules are applied in a fixed order and the first failure is returned.
    pub(crate) fn validate(self) -> Result<ValidatedRoute, RegistrationError> {
        let handler = self.handler.ok_or(RegistrationError::MissingHandler)?;
        let method = self.method.ok_or(RegistrationError::MissingMethod)?;
        let method: Method = method.parse().map_err(RegistrationError::InvalidMethod)?;

        let target = match (self.path, self.path_prefix) {
            (Some(path), None) => {
                if !path.starts_with('/') {
                    return Err(RegistrationError::PathDoesNotStartWithSlash(path));
                }
                RouteTarget::Exact(path)
            }
            (None, Some(prefix)) => {
                if !prefix.starts_with('/') {
                    return Err(RegistrationError::PrefixDoesNotStartWithSlash(prefix));
                }
                if !prefix.ends_with('/') {
                    return Err(RegistrationError::PrefixDoesNotEndWithSlash(prefix));
                }
                RouteTarget::Prefix(prefix)
            }
            _ => return Err(RegistrationError::BothPathAndPrefix),
        };

        Ok(ValidatedRoute {
            target,
            method,
            handler,
        })
    }
}

impl fmt::Debug for RouteSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteSpec")
            .field("path", &self.path)
            .field("path_prefix", &self.path_prefix)
            .field("method", &self.method)
            .field("handler", &self.handler.as_ref().map(|_| "<handler>"))
            .finish()
    }
}

/// What a validated route matches on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget {
    Exact(String),
    Prefix(String),
}

/// A route whose shape has been checked; only the duplicate check remains.
pub(crate) struct ValidatedRoute {
    pub target: RouteTarget,
    pub method: Method,
    pub handler: HandlerRef,
}

/// One rule in a route listing.
#[derive(Clone)]
pub struct RouteEntry {
    /// The exact path, or the prefix followed by `*`.
    pub path: String,
    pub method: Method,
    pub handler: HandlerRef,
}

impl fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("path", &self.path)
            .field("method", &self.method)
            .finish_non_exhaustive()
    }
}
