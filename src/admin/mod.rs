//! Admin API.
//!
//! Read-only endpoints for dashboards and `router-cli`, protected by a
//! bearer token.

pub mod auth;
pub mod handlers;

use std::sync::Arc;

use axum::{middleware, routing::get, Router};

use crate::routing::HttpRouter;
use self::auth::admin_auth_middleware;
use self::handlers::*;

/// State shared by the admin endpoints.
#[derive(Clone)]
pub struct AdminState {
    pub routes: Arc<HttpRouter>,
    pub api_key: Arc<str>,
}

impl AdminState {
    pub fn new(routes: Arc<HttpRouter>, api_key: impl Into<Arc<str>>) -> Self {
        Self {
            routes,
            api_key: api_key.into(),
        }
    }
}

pub fn setup_admin_router(state: AdminState) -> Router {
    Router::new()
        .route("/admin/status", get(get_status))
        .route("/admin/routes", get(get_routes))
        .layer(middleware::from_fn_with_state(state.clone(), admin_auth_middleware))
        .with_state(state)
}
