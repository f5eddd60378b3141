//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (at startup):
//!     RouteSpec
//!     → route.rs (validate shape, method, slashes)
//!     → router.rs (reject duplicates, insert into the two-level table)
//!     → Freeze as immutable HttpRouter (shared via Arc)
//!
//! Incoming Request (pathname, method)
//!     → router.rs (exact lookup, HEAD aliased to GET)
//!     → matcher.rs (longest registered prefix)
//!     → Return: RouteMatch or None
//! ```
//!
//! # Design Decisions
//! - Routes registered at startup, immutable at runtime
//! - No regex and no path parameters (literal paths and trailing prefixes only)
//! - Deterministic: exact beats prefix, longest prefix beats shorter ones
//! - A failed registration never mutates the table

pub mod error;
pub mod matcher;
pub mod method;
pub mod route;
pub mod router;

pub use error::RegistrationError;
pub use method::{Method, ROUTABLE_METHODS};
pub use route::{RouteEntry, RouteSpec, RouteTarget};
pub use router::{HttpRouter, RouteMatch};
