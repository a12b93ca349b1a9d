use may_minihttp::Response;
use tracing::error;

use crate::dispatcher::{HandlerResponse, JSON_CONTENT_TYPE};

/// Reason phrase for the status codes this service emits.
pub fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "OK",
    }
}

/// Write a dispatcher response to the wire.
///
/// `Content-Type: application/json` is always sent, even for empty `204`
/// bodies. A payload that fails to serialize becomes a bare `500`.
pub fn write_handler_response(res: &mut Response, resp: &HandlerResponse) {
    let (status, body) = match resp.body_bytes() {
        Ok(bytes) => (resp.status, bytes),
        Err(err) => {
            error!(error = %err, status = resp.status, "Response serialization failed");
            (500, br#"{"error":"Response serialization failed"}"#.to_vec())
        }
    };

    res.status_code(status as usize, status_reason(status));
    res.header(JSON_CONTENT_TYPE);
    for line in resp.headers.iter().copied() {
        res.header(line);
    }
    res.body_vec(body);
}
