use http::Method;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Request shapes the dispatcher knows how to serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteCategory {
    Home,
    GetUserById,
    ListUsers,
    CreateUser,
    ProductReview,
    Search,
    ApiV1,
    ApiV2,
    /// Directory of the user service's endpoints
    ServiceInfo,
    NotFound,
}

impl RouteCategory {
    /// Stable snake_case name used in logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteCategory::Home => "home",
            RouteCategory::GetUserById => "get_user_by_id",
            RouteCategory::ListUsers => "list_users",
            RouteCategory::CreateUser => "create_user",
            RouteCategory::ProductReview => "product_review",
            RouteCategory::Search => "search",
            RouteCategory::ApiV1 => "api_v1",
            RouteCategory::ApiV2 => "api_v2",
            RouteCategory::ServiceInfo => "service_info",
            RouteCategory::NotFound => "not_found",
        }
    }
}

impl fmt::Display for RouteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Path predicate of a route rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathMatcher {
    /// `/` or the empty path
    Root,
    /// Exact string equality
    Exact(&'static str),
    /// Path starts with the given prefix
    Prefix(&'static str),
    /// Path starts with `prefix` and contains `needle` anywhere.
    ///
    /// This is a substring test, not segment matching: `/products/1/reviews-archive`
    /// satisfies `PrefixContaining { prefix: "/products/", needle: "/reviews" }`.
    PrefixContaining {
        prefix: &'static str,
        needle: &'static str,
    },
}

impl PathMatcher {
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        match self {
            PathMatcher::Root => path.is_empty() || path == "/",
            PathMatcher::Exact(expected) => path == *expected,
            PathMatcher::Prefix(prefix) => path.starts_with(prefix),
            PathMatcher::PrefixContaining { prefix, needle } => {
                path.starts_with(prefix) && path.contains(needle)
            }
        }
    }
}

impl fmt::Display for PathMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathMatcher::Root => f.write_str("/"),
            PathMatcher::Exact(p) => f.write_str(p),
            PathMatcher::Prefix(p) => write!(f, "{p}*"),
            PathMatcher::PrefixContaining { prefix, needle } => write!(f, "{prefix}*{needle}*"),
        }
    }
}

/// One `(method, path predicate) → category` entry.
///
/// `method: None` matches any method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRule {
    pub method: Option<Method>,
    pub matcher: PathMatcher,
    pub category: RouteCategory,
}

impl RouteRule {
    #[must_use]
    pub fn new(method: Option<Method>, matcher: PathMatcher, category: RouteCategory) -> Self {
        Self {
            method,
            matcher,
            category,
        }
    }

    #[must_use]
    pub fn matches(&self, method: &str, path: &str) -> bool {
        let method_ok = self
            .method
            .as_ref()
            .is_none_or(|m| m.as_str() == method);
        method_ok && self.matcher.matches(path)
    }
}

impl fmt::Display for RouteRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let method = self.method.as_ref().map_or("*", Method::as_str);
        write!(f, "{method:<7} {:<24} -> {}", self.matcher.to_string(), self.category)
    }
}

/// Ordered rule list evaluated first-match-wins.
///
/// Rule order is significant: a broad prefix rule placed before a more
/// specific equality rule shadows it.
#[derive(Debug, Clone)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
    fallback: RouteCategory,
}

impl RouteTable {
    #[must_use]
    pub fn new(fallback: RouteCategory) -> Self {
        Self {
            rules: Vec::new(),
            fallback,
        }
    }

    /// Append a rule at the lowest priority.
    #[must_use]
    pub fn rule(
        mut self,
        method: Option<Method>,
        matcher: PathMatcher,
        category: RouteCategory,
    ) -> Self {
        self.rules.push(RouteRule::new(method, matcher, category));
        self
    }

    /// `GET`-only rule.
    #[must_use]
    pub fn get(self, matcher: PathMatcher, category: RouteCategory) -> Self {
        self.rule(Some(Method::GET), matcher, category)
    }

    /// `POST`-only rule.
    #[must_use]
    pub fn post(self, matcher: PathMatcher, category: RouteCategory) -> Self {
        self.rule(Some(Method::POST), matcher, category)
    }

    /// Rule matching every method.
    #[must_use]
    pub fn any(self, matcher: PathMatcher, category: RouteCategory) -> Self {
        self.rule(None, matcher, category)
    }

    /// Rules of the routing demo function.
    #[must_use]
    pub fn routing_demo() -> Self {
        use PathMatcher::{Exact, Prefix, Root};
        use RouteCategory::{
            ApiV1, ApiV2, CreateUser, GetUserById, Home, ListUsers, ProductReview, Search,
        };

        let reviews = PathMatcher::PrefixContaining {
            prefix: "/products/",
            needle: "/reviews",
        };
        Self::new(RouteCategory::NotFound)
            .any(Root, Home)
            .get(Prefix("/users/"), GetUserById)
            .get(Exact("/users"), ListUsers)
            .post(Exact("/users"), CreateUser)
            .any(reviews, ProductReview)
            .any(Prefix("/search"), Search)
            .any(Prefix("/api/v1/"), ApiV1)
            .any(Prefix("/api/v2/"), ApiV2)
    }

    /// Rules of the user service function.
    #[must_use]
    pub fn user_service() -> Self {
        use PathMatcher::{Exact, Prefix};
        use RouteCategory::{CreateUser, GetUserById, ListUsers};

        Self::new(RouteCategory::ServiceInfo)
            .post(Exact("/users"), CreateUser)
            .get(Exact("/users"), ListUsers)
            .get(Prefix("/users/"), GetUserById)
    }

    /// Select the category for a request.
    #[must_use]
    pub fn classify(&self, method: &str, path: &str) -> RouteCategory {
        let category = self
            .rules
            .iter()
            .find(|rule| rule.matches(method, path))
            .map_or(self.fallback, |rule| rule.category);
        debug!(method = %method, path = %path, category = %category, "Route classified");
        category
    }

    #[must_use]
    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    #[must_use]
    pub fn fallback(&self) -> RouteCategory {
        self.fallback
    }
}
