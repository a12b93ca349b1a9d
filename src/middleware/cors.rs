use std::time::Duration;

use http::Method;

use super::Middleware;
use crate::config::CorsConfig;
use crate::dispatcher::HandlerResponse;
use crate::server::ParamBag;

/// CORS (Cross-Origin Resource Sharing) middleware
///
/// Stamps the allow-origin, allow-methods and allow-headers lines on every
/// response, preflight answers included.
///
/// The three header lines are rendered once at construction so the hot path
/// only copies `&'static str` pointers.
pub struct CorsMiddleware {
    allow_origin: &'static str,
    allow_methods: &'static str,
    allow_headers: &'static str,
}

impl CorsMiddleware {
    /// Create a CORS middleware with an explicit policy.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fnrouter::middleware::CorsMiddleware;
    /// use http::Method;
    ///
    /// let cors = CorsMiddleware::new(
    ///     &["https://example.com".to_string()],
    ///     &["Content-Type".to_string()],
    ///     &[Method::GET, Method::POST],
    /// );
    /// ```
    #[must_use]
    pub fn new(
        allowed_origins: &[String],
        allowed_headers: &[String],
        allowed_methods: &[Method],
    ) -> Self {
        let origins = if allowed_origins.is_empty() {
            "*".to_string()
        } else {
            allowed_origins.join(", ")
        };
        let methods = allowed_methods
            .iter()
            .map(Method::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let headers = allowed_headers.join(", ");
        Self {
            allow_origin: leak_line("Access-Control-Allow-Origin", &origins),
            allow_methods: leak_line("Access-Control-Allow-Methods", &methods),
            allow_headers: leak_line("Access-Control-Allow-Headers", &headers),
        }
    }

    /// Policy from configuration: configured origins, `GET, POST, OPTIONS`,
    /// and the `Content-Type` request header.
    #[must_use]
    pub fn from_config(config: &CorsConfig) -> Self {
        Self::new(
            &config.origins,
            &["Content-Type".to_string()],
            &[Method::GET, Method::POST, Method::OPTIONS],
        )
    }
}

impl Default for CorsMiddleware {
    fn default() -> Self {
        Self::from_config(&CorsConfig::default())
    }
}

// Called only while building the middleware, so the leak is bounded by the
// number of dispatchers constructed.
fn leak_line(name: &str, value: &str) -> &'static str {
    Box::leak(format!("{name}: {value}").into_boxed_str())
}

impl Middleware for CorsMiddleware {
    fn after(&self, _req: &ParamBag, res: &mut HandlerResponse, _latency: Duration) {
        res.set_header(self.allow_origin);
        res.set_header(self.allow_methods);
        res.set_header(self.allow_headers);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::RawRequest;

    #[test]
    fn test_never_short_circuits() {
        let cors = CorsMiddleware::default();
        for method in ["OPTIONS", "GET"] {
            let bag = ParamBag::extract(RawRequest::new(method, "/users"));
            assert!(cors.before(&bag).is_none(), "{method}");
        }
    }

    #[test]
    fn test_after_sets_default_headers() {
        let cors = CorsMiddleware::default();
        let bag = ParamBag::extract(RawRequest::new("GET", "/"));
        let mut resp = HandlerResponse::empty(200);
        cors.after(&bag, &mut resp, Duration::ZERO);
        cors.after(&bag, &mut resp, Duration::ZERO);

        assert_eq!(resp.headers.len(), 3);
        assert_eq!(resp.get_header("access-control-allow-origin"), Some("*"));
        assert_eq!(
            resp.get_header("Access-Control-Allow-Methods"),
            Some("GET, POST, OPTIONS")
        );
        assert_eq!(
            resp.get_header("Access-Control-Allow-Headers"),
            Some("Content-Type")
        );
    }

    #[test]
    fn test_configured_origins_are_joined() {
        let cors = CorsMiddleware::new(
            &["https://a.example".to_string(), "https://b.example".to_string()],
            &[],
            &[Method::GET],
        );
        let mut resp = HandlerResponse::empty(200);
        cors.after(
            &ParamBag::extract(RawRequest::new("GET", "/")),
            &mut resp,
            Duration::ZERO,
        );
        assert_eq!(
            resp.get_header("Access-Control-Allow-Origin"),
            Some("https://a.example, https://b.example")
        );
    }
}
