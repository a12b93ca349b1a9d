use may_minihttp::Request;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use tracing::debug;

/// Ordered multimap used for query parameters and headers.
pub type MultiMap = BTreeMap<String, Vec<String>>;

/// Request data as it came off the wire, before any interpretation.
///
/// `body` is only populated when the request declared a JSON content type;
/// other bodies are never read into memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRequest {
    /// HTTP method (GET, POST, etc.)
    pub method: String,
    /// Request target: path plus optional `?query`
    pub target: String,
    /// Headers in arrival order, names as sent
    pub headers: Vec<(String, String)>,
    /// Raw JSON body bytes (`None` if not JSON or unreadable)
    pub body: Option<Vec<u8>>,
}

impl RawRequest {
    pub fn new(method: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            target: target.into(),
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// A single path segment, coerced to an integer when it parses as one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathValue {
    Int(i64),
    Text(String),
}

impl PathValue {
    fn parse(segment: &str) -> Self {
        segment
            .parse::<i64>()
            .map(PathValue::Int)
            .unwrap_or_else(|_| PathValue::Text(segment.to_string()))
    }
}

impl fmt::Display for PathValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathValue::Int(n) => write!(f, "{n}"),
            PathValue::Text(s) => f.write_str(s),
        }
    }
}

/// Normalized, immutable view of one request.
///
/// Built once by [`ParamBag::extract`], handed to exactly one route handler,
/// and echoed back verbatim by the routing demo as `all_parameters`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamBag {
    /// `segment_<i>` → value, where `i` is the position in the raw `/` split
    pub path_params: BTreeMap<String, PathValue>,
    /// Query parameters; repeated keys keep every value in order
    pub query_params: MultiMap,
    /// Decoded JSON body, or `{}` when absent or undecodable
    pub body_params: Value,
    /// A JSON body was sent but did not decode
    #[serde(skip)]
    pub body_malformed: bool,
    /// Headers as a multimap, names as sent
    pub headers: MultiMap,
    pub method: String,
    /// Path plus query string, exactly as requested
    pub full_url: String,
    /// Percent-decoded path without the query string
    pub path: String,
}

impl ParamBag {
    /// Derive the parameter bag from a raw request. Never fails.
    #[must_use]
    pub fn extract(raw: RawRequest) -> Self {
        let RawRequest {
            method,
            target,
            headers,
            body,
        } = raw;

        let path = decode_path(target.split('?').next().unwrap_or_default());
        let path_params = extract_path_params(&path);
        let query_params = parse_query_params(&target);
        let (body_params, body_malformed) = match parse_body(body.as_deref()) {
            Ok(value) => (value, false),
            Err(_) => (empty_object(), true),
        };

        let mut header_map = MultiMap::new();
        for (name, value) in headers {
            header_map.entry(name).or_default().push(value);
        }

        debug!(
            method = %method,
            path = %path,
            segment_count = path_params.len(),
            query_count = query_params.len(),
            header_count = header_map.len(),
            "Parameters extracted"
        );

        ParamBag {
            path_params,
            query_params,
            body_params,
            body_malformed,
            headers: header_map,
            method,
            full_url: target,
            path,
        }
    }

    /// Path segment at `index` of the raw split (`/users/5` → index 2 is `5`).
    #[must_use]
    pub fn segment(&self, index: usize) -> Option<&PathValue> {
        self.path_params.get(&format!("segment_{index}"))
    }

    /// First value of a query parameter.
    #[must_use]
    pub fn first_query(&self, name: &str) -> Option<&str> {
        self.query_params
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// First value of a header, matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .and_then(|(_, v)| v.first())
            .map(String::as_str)
    }
}

/// Percent-decode a request path. Sequences that do not decode to UTF-8 leave
/// the path as sent.
#[must_use]
pub fn decode_path(raw: &str) -> String {
    match urlencoding::decode(raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(err) => {
            debug!(error = %err, path = %raw, "Path is not valid percent-encoded UTF-8");
            raw.to_string()
        }
    }
}

/// Split a path on `/`, skip empty segments, and key each remaining segment
/// by its original index in the split.
#[must_use]
pub fn extract_path_params(path: &str) -> BTreeMap<String, PathValue> {
    path.split('/')
        .enumerate()
        .filter(|(_, part)| !part.is_empty())
        .map(|(i, part)| (format!("segment_{i}"), PathValue::parse(part)))
        .collect()
}

/// Parse query string parameters from a request target
///
/// Everything after the first `?` is form-decoded. Repeated keys accumulate
/// their values in order of appearance.
#[must_use]
pub fn parse_query_params(target: &str) -> MultiMap {
    let mut params = MultiMap::new();
    if let Some((_, query)) = target.split_once('?') {
        for (k, v) in url::form_urlencoded::parse(query.as_bytes()) {
            params.entry(k.into_owned()).or_default().push(v.into_owned());
        }
    }
    params
}

/// Decode a JSON body, degrading to an empty object on any failure.
#[must_use]
pub fn decode_body(body: Option<&[u8]>) -> Value {
    parse_body(body).unwrap_or_else(|_| empty_object())
}

// Err only when a body was present and failed to decode.
fn parse_body(body: Option<&[u8]>) -> serde_json::Result<Value> {
    let Some(bytes) = body else {
        return Ok(empty_object());
    };
    serde_json::from_slice::<Value>(bytes).inspect_err(|err| {
        debug!(
            error = %err,
            body_size_bytes = bytes.len(),
            "JSON body parse failed"
        );
    })
}

/// True when the header list declares `application/json`, ignoring any
/// media-type parameters such as `charset`.
#[must_use]
pub fn is_json_content_type(headers: &[(String, String)]) -> bool {
    headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
        .map(|(_, value)| {
            value
                .split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .eq_ignore_ascii_case("application/json")
        })
        .unwrap_or(false)
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// Pull everything the extractor needs out of a `may_minihttp::Request`.
///
/// The body is kept only when the request declares a JSON content type. A
/// read error is logged and treated like an undecodable body.
pub fn read_request(req: Request) -> RawRequest {
    let method = req.method().to_string();
    let target = req.path().to_string();
    let headers: Vec<(String, String)> = req
        .headers()
        .iter()
        .map(|h| {
            (
                h.name.to_string(),
                String::from_utf8_lossy(h.value).to_string(),
            )
        })
        .collect();

    // drained regardless of type; leftover bytes would break keep-alive
    let mut buf = Vec::new();
    let body = match req.body().read_to_end(&mut buf) {
        Ok(size) if is_json_content_type(&headers) => {
            debug!(body_size_bytes = size, "Request body read");
            Some(buf)
        }
        Ok(_) => None,
        Err(err) => {
            debug!(error = %err, "Request body read failed");
            None
        }
    };

    RawRequest {
        method,
        target,
        headers,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_segments_keep_original_index() {
        let params = extract_path_params("/products/12/reviews/abc");
        assert_eq!(params.get("segment_1"), Some(&PathValue::Text("products".into())));
        assert_eq!(params.get("segment_2"), Some(&PathValue::Int(12)));
        assert_eq!(params.get("segment_3"), Some(&PathValue::Text("reviews".into())));
        assert_eq!(params.get("segment_4"), Some(&PathValue::Text("abc".into())));
        assert!(params.get("segment_0").is_none());
    }

    #[test]
    fn test_empty_segments_are_skipped_without_renumbering() {
        let params = extract_path_params("//a//7/");
        let keys: Vec<&str> = params.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["segment_2", "segment_4"]);
        assert_eq!(params["segment_4"], PathValue::Int(7));
    }

    #[test]
    fn test_trailing_slash_yields_same_segments() {
        assert_eq!(extract_path_params("/users/5"), extract_path_params("/users/5/"));
        assert!(extract_path_params("/").is_empty());
        assert!(extract_path_params("").is_empty());
    }

    #[test]
    fn test_signed_segments_are_integers() {
        let params = extract_path_params("/n/-3/+4/4.5");
        assert_eq!(params["segment_2"], PathValue::Int(-3));
        assert_eq!(params["segment_3"], PathValue::Int(4));
        assert_eq!(params["segment_4"], PathValue::Text("4.5".into()));
    }

    #[test]
    fn test_parse_query_params_preserves_duplicates() {
        let q = parse_query_params("/p?a=1&a=2&b=x%20y");
        assert_eq!(q.get("a"), Some(&vec!["1".to_string(), "2".to_string()]));
        assert_eq!(q.get("b"), Some(&vec!["x y".to_string()]));
        assert!(parse_query_params("/p").is_empty());
    }

    #[test]
    fn test_json_content_type_detection() {
        let h = |v: &str| vec![("Content-Type".to_string(), v.to_string())];
        assert!(is_json_content_type(&h("application/json")));
        assert!(is_json_content_type(&h("Application/JSON; charset=utf-8")));
        assert!(!is_json_content_type(&h("text/plain")));
        assert!(!is_json_content_type(&[]));
    }

    #[test]
    fn test_body_degrades_to_empty_object() {
        assert_eq!(decode_body(None), json!({}));
        assert_eq!(decode_body(Some(b"{not json")), json!({}));
        assert_eq!(decode_body(Some(b"")), json!({}));
        assert_eq!(decode_body(Some(b"[1,2]")), json!([1, 2]));
        assert_eq!(decode_body(Some(b"null")), Value::Null);
    }

    #[test]
    fn test_extract_builds_full_bag() {
        let raw = RawRequest::new("POST", "/users/5?tag=a&tag=b")
            .with_header("Content-Type", "application/json")
            .with_header("X-Trace", "1")
            .with_header("X-Trace", "2")
            .with_body(r#"{"name":"Al"}"#);
        let bag = ParamBag::extract(raw);

        assert_eq!(bag.method, "POST");
        assert_eq!(bag.path, "/users/5");
        assert_eq!(bag.full_url, "/users/5?tag=a&tag=b");
        assert_eq!(bag.segment(2), Some(&PathValue::Int(5)));
        assert_eq!(bag.first_query("tag"), Some("a"));
        assert_eq!(bag.headers["X-Trace"], vec!["1", "2"]);
        assert_eq!(bag.header("content-type"), Some("application/json"));
        assert_eq!(bag.body_params, json!({"name": "Al"}));
        assert!(!bag.body_malformed);
    }

    #[test]
    fn test_undecodable_body_is_flagged() {
        let json_post = |body: &str| {
            RawRequest::new("POST", "/users")
                .with_header("Content-Type", "application/json")
                .with_body(body.to_string())
        };

        let bag = ParamBag::extract(json_post("{bad"));
        assert_eq!(bag.body_params, json!({}));
        assert!(bag.body_malformed);

        let bag = ParamBag::extract(json_post(""));
        assert!(bag.body_malformed);

        // no body at all is not malformed
        let bag = ParamBag::extract(RawRequest::new("POST", "/users"));
        assert_eq!(bag.body_params, json!({}));
        assert!(!bag.body_malformed);

        let v = serde_json::to_value(ParamBag::extract(json_post("{bad"))).unwrap();
        assert!(v.get("body_malformed").is_none());
    }

    #[test]
    fn test_path_is_percent_decoded() {
        let bag = ParamBag::extract(RawRequest::new("GET", "/users/%31?q=%31"));
        assert_eq!(bag.path, "/users/1");
        assert_eq!(bag.segment(2), Some(&PathValue::Int(1)));
        assert_eq!(bag.full_url, "/users/%31?q=%31");

        assert_eq!(decode_path("/a%20b/c"), "/a b/c");
        // invalid UTF-8 is kept as sent
        assert_eq!(decode_path("/x/%FF"), "/x/%FF");
    }

    #[test]
    fn test_bag_serializes_with_wire_keys() {
        let bag = ParamBag::extract(RawRequest::new("GET", "/users/abc"));
        let v = serde_json::to_value(&bag).unwrap();
        assert_eq!(v["path_params"], json!({"segment_1": "users", "segment_2": "abc"}));
        assert_eq!(v["query_params"], json!({}));
        assert_eq!(v["body_params"], json!({}));
        assert_eq!(v["method"], "GET");
        assert_eq!(v["full_url"], "/users/abc");
        assert_eq!(v["path"], "/users/abc");
    }
}
