//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks, route registration)
//!     → RouterConfig (validated, immutable)
//!     → build_router → HttpRouter shared via Arc
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; there is no hot reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    AdminConfig, HandlerConfig, ListenerConfig, ObservabilityConfig, RouteConfig, RouterConfig,
};
pub use validation::{build_router, validate_config, ValidationError};
