//! Handlers of the user service, backed by the shared [`UserStore`].
//!
//! Every outcome is wrapped in an [`ApiEnvelope`]; failures become
//! `{"success": false, "error": ...}` with the status of the matching
//! [`ServiceError`].

use serde_json::Value;
use tracing::error;

use crate::dispatcher::HandlerResponse;
use crate::error::ServiceError;
use crate::server::ParamBag;
use crate::store::UserStore;

use super::types::{ApiEnvelope, Payload, RouteDirectory};

const USERS_PREFIX: &str = "/users/";

/// `POST /users`
pub fn create_user(bag: &ParamBag, store: &UserStore) -> HandlerResponse {
    let result = new_user_fields(bag)
        .and_then(|(name, email)| store.create(name, email).map_err(ServiceError::from));
    match result {
        Ok(user) => envelope(201, ApiEnvelope::user(user)),
        Err(err) => failure(err),
    }
}

/// `GET /users`
pub fn list_users(_bag: &ParamBag, store: &UserStore) -> HandlerResponse {
    envelope(200, ApiEnvelope::users(store.list()))
}

/// `GET /users/{id}`
pub fn get_user(bag: &ParamBag, store: &UserStore) -> HandlerResponse {
    let result = parse_user_id(&bag.path)
        .and_then(|id| store.get(id).ok_or(ServiceError::NotFound));
    match result {
        Ok(user) => envelope(200, ApiEnvelope::user(user)),
        Err(err) => failure(err),
    }
}

/// Endpoints listed by the service-info fallback.
#[must_use]
pub fn endpoints() -> RouteDirectory {
    RouteDirectory::from([
        ("POST /users", "Create a new user"),
        ("GET /users", "Get all users"),
        ("GET /users/:id", "Get user by ID"),
    ])
}

/// Handler for anything the user service does not route: a description of
/// the service and its endpoints.
pub fn service_info(
    service_name: &str,
    version: &str,
) -> impl Fn(&ParamBag, &UserStore) -> HandlerResponse + Send + Sync + 'static {
    let message = format!("{service_name}: in-memory user service");
    let version = version.to_string();
    move |_bag: &ParamBag, _store: &UserStore| {
        envelope(
            200,
            ApiEnvelope::service_info(message.clone(), version.clone(), endpoints()),
        )
    }
}

/// Everything after `/users/`, as a signed integer. Ids are positive, so a
/// negative or zero value parses but is simply never found.
fn parse_user_id(path: &str) -> Result<u64, ServiceError> {
    let raw = path.strip_prefix(USERS_PREFIX).unwrap_or_default();
    let id = raw
        .parse::<i64>()
        .map_err(|_| ServiceError::InvalidIdentifier)?;
    u64::try_from(id).map_err(|_| ServiceError::NotFound)
}

/// `name` and `email` from a JSON object body. Absent fields read as empty
/// strings and then fail validation; a non-object body or a non-string field
/// is malformed.
fn new_user_fields(bag: &ParamBag) -> Result<(&str, &str), ServiceError> {
    if bag.body_malformed {
        return Err(ServiceError::MalformedBody);
    }
    let object = bag.body_params.as_object().ok_or(ServiceError::MalformedBody)?;
    let field = |key: &str| match object.get(key) {
        None => Ok(""),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(ServiceError::MalformedBody),
    };
    Ok((field("name")?, field("email")?))
}

fn envelope(status: u16, body: ApiEnvelope) -> HandlerResponse {
    HandlerResponse::new(status, Payload::Envelope(body))
}

fn failure(err: ServiceError) -> HandlerResponse {
    error!(error = %err, status = err.status(), "Error processing request");
    envelope(err.status(), ApiEnvelope::failure(err.to_string()))
}
