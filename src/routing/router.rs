//! Route storage and lookup.
//!
//! # Responsibilities
//! - Store registered routes in a two-level table
//! - Reject invalid and duplicate registrations without side effects
//! - Look up the handler for a request path and method
//! - Produce a sorted listing for the admin API
//!
//! # Design Decisions
//! - Immutable after startup (shared via Arc, read without locks)
//! - Exact paths: path → method → handler, O(log n) lookup
//! - Prefixes: method → prefix → handler, O(n) scan per method
//! - Explicit `None` on no match rather than a silent default

use std::collections::BTreeMap;

use crate::dispatch::handler::HandlerRef;
use crate::routing::error::RegistrationError;
use crate::routing::matcher::longest_prefix;
use crate::routing::method::Method;
use crate::routing::route::{RouteEntry, RouteSpec, RouteTarget};

/// The result of a successful lookup.
#[derive(Clone)]
pub struct RouteMatch {
    pub handler: HandlerRef,
    /// The method the route was registered under (GET for HEAD requests).
    pub method: Method,
    /// The exact path, or the prefix followed by `*`.
    pub route: String,
}

impl std::fmt::Debug for RouteMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteMatch")
            .field("method", &self.method)
            .field("route", &self.route)
            .finish_non_exhaustive()
    }
}

/// The routing table.
#[derive(Default, Clone)]
pub struct HttpRouter {
    exact_routes: BTreeMap<String, BTreeMap<Method, HandlerRef>>,
    prefix_routes: BTreeMap<Method, BTreeMap<String, HandlerRef>>,
}

impl HttpRouter {
    /// Create an empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and register a single route.
    ///
    /// On error the table is left exactly as it was.
    pub fn route(&mut self, spec: RouteSpec) -> Result<(), RegistrationError> {
        let route = spec.validate()?;

        match route.target {
            RouteTarget::Exact(path) => {
                let methods = self.exact_routes.get(&path);
                if methods.is_some_and(|m| m.contains_key(&route.method)) {
                    return Err(RegistrationError::DuplicateRoute(path, route.method));
                }
                tracing::debug!(path = %path, method = %route.method, "Registered route");
                self.exact_routes
                    .entry(path)
                    .or_default()
                    .insert(route.method, route.handler);
            }
            RouteTarget::Prefix(prefix) => {
                let prefixes = self.prefix_routes.get(&route.method);
                if prefixes.is_some_and(|p| p.contains_key(&prefix)) {
                    return Err(RegistrationError::DuplicatePrefix(prefix, route.method));
                }
                tracing::debug!(
                    prefix = %prefix,
                    method = %route.method,
                    "Registered prefix route"
                );
                self.prefix_routes
                    .entry(route.method)
                    .or_default()
                    .insert(prefix, route.handler);
            }
        }

        Ok(())
    }

    /// Builder-style variant of [`HttpRouter::route`].
    pub fn with_route(mut self, spec: RouteSpec) -> Result<Self, RegistrationError> {
        self.route(spec)?;
        Ok(self)
    }

    /// List every route: exact routes by path then method, followed by
    /// prefix routes by method then prefix.
    pub fn get_routes(&self) -> Vec<RouteEntry> {
        let exact = self.exact_routes.iter().flat_map(|(path, methods)| {
            methods.iter().map(move |(method, handler)| RouteEntry {
                path: path.clone(),
                method: *method,
                handler: handler.clone(),
            })
        });

        let prefixed = self.prefix_routes.iter().flat_map(|(method, prefixes)| {
            prefixes.iter().map(move |(prefix, handler)| RouteEntry {
                path: format!("{prefix}*"),
                method: *method,
                handler: handler.clone(),
            })
        });

        exact.chain(prefixed).collect()
    }

    /// Find the handler for `path` and the request method `method`.
    ///
    /// `HEAD` is looked up as `GET`. An exact route always beats a prefix
    /// route; among prefixes the longest one wins.
    pub fn lookup(&self, path: &str, method: &str) -> Option<RouteMatch> {
        let method = Method::for_lookup(method)?;

        if let Some(handler) = self.exact_routes.get(path).and_then(|m| m.get(&method)) {
            return Some(RouteMatch {
                handler: handler.clone(),
                method,
                route: path.to_string(),
            });
        }

        let prefixes = self.prefix_routes.get(&method)?;
        longest_prefix(prefixes, path).map(|(prefix, handler)| RouteMatch {
            handler: handler.clone(),
            method,
            route: format!("{prefix}*"),
        })
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        let exact: usize = self.exact_routes.values().map(BTreeMap::len).sum();
        let prefixed: usize = self.prefix_routes.values().map(BTreeMap::len).sum();
        exact + prefixed
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for HttpRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.get_routes().iter().map(|r| format!("{} {}", r.method, r.path)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::handler::handler_fn;
    use crate::dispatch::{HandlerError, Request, Response};

    /// A handler that answers with its own tag in the body.
    fn tagged(tag: &'static str) -> HandlerRef {
        handler_fn(move |_req: Request| async move {
            Ok::<_, HandlerError>(Response::text(200, tag))
        })
    }

    async fn tag_of(m: &RouteMatch) -> String {
        let request = Request::parse("GET", "https://x/").unwrap();
        let response = m.handler.call(request).await.unwrap();
        response.body.unwrap_or_default()
    }

    #[test]
    fn test_duplicate_route() {
        let mut router = HttpRouter::new();
        router.route(RouteSpec::exact("/a", "GET", tagged("1"))).unwrap();
        router.route(RouteSpec::exact("/a", "POST", tagged("2"))).unwrap();

        let err = router.route(RouteSpec::exact("/a", "GET", tagged("3"))).unwrap_err();
        assert_eq!(err, RegistrationError::DuplicateRoute("/a".into(), Method::Get));
        assert_eq!(router.len(), 2);
    }

    #[test]
    fn test_duplicate_prefix() {
        let mut router = HttpRouter::new();
        router.route(RouteSpec::prefix("/a/", "GET", tagged("1"))).unwrap();

        let err = router.route(RouteSpec::prefix("/a/", "GET", tagged("2"))).unwrap_err();
        assert_eq!(err, RegistrationError::DuplicatePrefix("/a/".into(), Method::Get));

        router.route(RouteSpec::prefix("/a/", "PUT", tagged("3"))).unwrap();
        assert_eq!(router.len(), 2);
    }

    #[test]
    fn test_exact_and_prefix_namespaces_are_separate() {
        let mut router = HttpRouter::new();
        router.route(RouteSpec::exact("/a/", "GET", tagged("exact"))).unwrap();
        router.route(RouteSpec::prefix("/a/", "GET", tagged("prefix"))).unwrap();
        assert_eq!(router.len(), 2);
    }

    #[test]
    fn test_failed_registration_leaves_table_unchanged() {
        let mut router = HttpRouter::new();
        router.route(RouteSpec::exact("/a", "GET", tagged("1"))).unwrap();
        let before = format!("{router:?}");

        assert!(router.route(RouteSpec::exact("b", "GET", tagged("x"))).is_err());
        assert!(router.route(RouteSpec::prefix("/b", "GET", tagged("x"))).is_err());
        assert!(router.route(RouteSpec::exact("/b", "TRACE", tagged("x"))).is_err());
        assert!(router.route(RouteSpec::exact("/a", "GET", tagged("x"))).is_err());

        assert_eq!(format!("{router:?}"), before);
        assert!(router.lookup("/b", "GET").is_none());
    }

    #[tokio::test]
    async fn test_exact_beats_prefix() {
        let router = HttpRouter::new()
            .with_route(RouteSpec::prefix("/", "GET", tagged("root")))
            .unwrap()
            .with_route(RouteSpec::exact("/profile", "GET", tagged("profile")))
            .unwrap();

        let m = router.lookup("/profile", "GET").unwrap();
        assert_eq!(m.route, "/profile");
        assert_eq!(tag_of(&m).await, "profile");

        let m = router.lookup("/profile/x", "GET").unwrap();
        assert_eq!(m.route, "/*");
        assert_eq!(tag_of(&m).await, "root");
    }

    #[tokio::test]
    async fn test_longest_prefix_wins() {
        let router = HttpRouter::new()
            .with_route(RouteSpec::prefix("/profile/admin/", "GET", tagged("admin")))
            .unwrap()
            .with_route(RouteSpec::prefix("/profile/", "GET", tagged("profile")))
            .unwrap();

        let m = router.lookup("/profile/admin/x", "GET").unwrap();
        assert_eq!(m.route, "/profile/admin/*");
        assert_eq!(tag_of(&m).await, "admin");

        let m = router.lookup("/profile/x", "GET").unwrap();
        assert_eq!(m.route, "/profile/*");
        assert_eq!(tag_of(&m).await, "profile");
    }

    #[tokio::test]
    async fn test_head_is_get() {
        let router = HttpRouter::new()
            .with_route(RouteSpec::exact("/anything", "GET", tagged("get")))
            .unwrap()
            .with_route(RouteSpec::prefix("/files/", "GET", tagged("files")))
            .unwrap();

        for path in ["/anything", "/files/a.txt", "/missing"] {
            let head = router.lookup(path, "HEAD");
            let get = router.lookup(path, "GET");
            assert_eq!(head.as_ref().map(|m| &m.route), get.as_ref().map(|m| &m.route));
            if let (Some(head), Some(get)) = (head, get) {
                assert_eq!(head.method, Method::Get);
                assert_eq!(tag_of(&head).await, tag_of(&get).await);
            }
        }
    }

    #[test]
    fn test_method_must_match() {
        let router = HttpRouter::new()
            .with_route(RouteSpec::exact("/message", "POST", tagged("m")))
            .unwrap()
            .with_route(RouteSpec::prefix("/api/", "PUT", tagged("a")))
            .unwrap();

        assert!(router.lookup("/message", "GET").is_none());
        assert!(router.lookup("/api/x", "POST").is_none());
        assert!(router.lookup("/message", "TRACE").is_none());
        assert!(router.lookup("/message", "POST").is_some());
    }

    #[test]
    fn test_get_routes_sorted() {
        let router = HttpRouter::new()
            .with_route(RouteSpec::prefix("/z/", "GET", tagged("1")))
            .unwrap()
            .with_route(RouteSpec::exact("/b", "POST", tagged("2")))
            .unwrap()
            .with_route(RouteSpec::prefix("/a/", "POST", tagged("3")))
            .unwrap()
            .with_route(RouteSpec::exact("/b", "DELETE", tagged("4")))
            .unwrap()
            .with_route(RouteSpec::exact("/a", "PUT", tagged("5")))
            .unwrap()
            .with_route(RouteSpec::prefix("/a/", "GET", tagged("6")))
            .unwrap();

        let listing: Vec<_> = router
            .get_routes()
            .iter()
            .map(|r| format!("{} {}", r.path, r.method))
            .collect();

        assert_eq!(
            listing,
            [
                "/a PUT",
                "/b DELETE",
                "/b POST",
                "/a/* GET",
                "/z/* GET",
                "/a/* POST",
            ]
        );
    }

    #[test]
    fn test_empty_router() {
        let router = HttpRouter::new();
        assert!(router.is_empty());
        assert!(router.get_routes().is_empty());
        assert!(router.lookup("/", "GET").is_none());
    }
}
