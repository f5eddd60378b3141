//! Routable HTTP methods.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A method that can be used when registering a route.
///
/// `HEAD` is deliberately absent: it is only understood at lookup time,
/// where it is served by the `GET` route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Options,
    Patch,
}

/// Every method accepted at registration time.
pub const ROUTABLE_METHODS: [Method; 6] = [
    Method::Get,
    Method::Post,
    Method::Put,
    Method::Delete,
    Method::Options,
    Method::Patch,
];

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Options => "OPTIONS",
            Method::Patch => "PATCH",
        }
    }

    /// Resolve the method of an incoming request for table lookup.
    ///
    /// `HEAD` is served by `GET`. Anything outside the routable set yields
    /// `None`, which the router treats as "no match".
    pub fn for_lookup(method: &str) -> Option<Self> {
        if method == "HEAD" {
            return Some(Method::Get);
        }
        method.parse().ok()
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ROUTABLE_METHODS
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

// Listings sort methods by name, not by declaration order.
impl Ord for Method {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for Method {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_routable_methods() {
        for method in ROUTABLE_METHODS {
            assert_eq!(method.as_str().parse::<Method>(), Ok(method));
        }
    }

    #[test]
    fn test_parse_rejects_head_and_lowercase() {
        assert_eq!("HEAD".parse::<Method>(), Err("HEAD".to_string()));
        assert!("get".parse::<Method>().is_err());
        assert!("TRACE".parse::<Method>().is_err());
    }

    #[test]
    fn test_lookup_aliases_head() {
        assert_eq!(Method::for_lookup("HEAD"), Some(Method::Get));
        assert_eq!(Method::for_lookup("PATCH"), Some(Method::Patch));
        assert_eq!(Method::for_lookup("CONNECT"), None);
    }

    #[test]
    fn test_lexicographic_order() {
        let mut methods = ROUTABLE_METHODS.to_vec();
        methods.sort();
        let names: Vec<_> = methods.iter().map(Method::as_str).collect();
        assert_eq!(names, ["DELETE", "GET", "OPTIONS", "PATCH", "POST", "PUT"]);
    }
}
