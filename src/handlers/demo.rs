//! Handlers of the routing demo.
//!
//! None of these touch the store: each echoes what the extractor found,
//! plus whatever the route pulls out of it.

use crate::dispatcher::HandlerResponse;
use crate::server::ParamBag;
use crate::store::UserStore;

use super::types::*;

pub const DEFAULT_LIMIT: i64 = 10;
pub const DEFAULT_OFFSET: i64 = 0;

/// Route listing shown on the home page.
#[must_use]
pub fn available_routes() -> RouteDirectory {
    RouteDirectory::from([
        ("GET /", "This home page"),
        ("GET /users", "List all users (supports ?limit=N&offset=N)"),
        ("GET /users/:id", "Get user by ID"),
        ("POST /users", "Create user (send JSON body)"),
        ("GET /products/:id/reviews/:reviewId", "Get product review"),
        ("GET /search", "Search (supports ?q=query&category=cat&sort=asc)"),
        ("GET /api/v1/*", "API version 1 endpoints"),
        ("GET /api/v2/*", "API version 2 endpoints"),
    ])
}

pub fn home(bag: &ParamBag, _store: &UserStore) -> HandlerResponse {
    HandlerResponse::new(
        200,
        Payload::Home(HomePayload {
            message: "Welcome to the fnrouter routing demo",
            all_parameters: bag.clone(),
            available_routes: available_routes(),
        }),
    )
}

pub fn get_user(bag: &ParamBag, _store: &UserStore) -> HandlerResponse {
    let user_id = bag.segment(2).cloned();
    let message = match &user_id {
        Some(id) => format!("Getting user with ID: {id}"),
        None => "Getting user with ID: ".to_string(),
    };
    HandlerResponse::new(
        200,
        Payload::UserLookup(UserLookupPayload {
            route: "GET /users/:id",
            message,
            all_parameters: bag.clone(),
            extracted_data: UserLookupData {
                user_id,
                query_filters: bag.query_params.clone(),
            },
        }),
    )
}

pub fn list_users(bag: &ParamBag, _store: &UserStore) -> HandlerResponse {
    HandlerResponse::new(
        200,
        Payload::UserListing(UserListingPayload {
            route: "GET /users",
            message: "Listing users",
            all_parameters: bag.clone(),
            pagination: pagination(bag),
        }),
    )
}

/// `limit`/`offset` from the first query values; missing or non-numeric
/// values fall back to the defaults.
#[must_use]
pub fn pagination(bag: &ParamBag) -> Pagination {
    let int_or = |name: &str, default: i64| {
        bag.first_query(name)
            .and_then(|v| v.trim().parse::<i64>().ok())
            .unwrap_or(default)
    };
    Pagination {
        limit: int_or("limit", DEFAULT_LIMIT),
        offset: int_or("offset", DEFAULT_OFFSET),
    }
}

pub fn create_user(bag: &ParamBag, _store: &UserStore) -> HandlerResponse {
    HandlerResponse::new(
        201,
        Payload::UserCreation(UserCreationPayload {
            route: "POST /users",
            message: "Creating new user",
            all_parameters: bag.clone(),
            received_body: bag.body_params.clone(),
        }),
    )
}

pub fn product_review(bag: &ParamBag, _store: &UserStore) -> HandlerResponse {
    let ids = review_ids(&bag.path);
    let message = format!(
        "Getting review {} for product {}",
        ids.review_id.as_deref().unwrap_or_default(),
        ids.product_id.as_deref().unwrap_or_default()
    );
    HandlerResponse::new(
        200,
        Payload::ProductReview(ProductReviewPayload {
            route: "GET /products/:id/reviews/:reviewId",
            message,
            all_parameters: bag.clone(),
            extracted_data: ids,
        }),
    )
}

/// Positions 2 and 4 of the raw `/` split. Works on the unfiltered split, so
/// `/products//reviews/1` yields an empty product id rather than shifting.
#[must_use]
pub fn review_ids(path: &str) -> ReviewIds {
    let parts: Vec<&str> = path.split('/').collect();
    ReviewIds {
        product_id: parts.get(2).map(|s| (*s).to_string()),
        review_id: parts.get(4).map(|s| (*s).to_string()),
    }
}

pub fn search(bag: &ParamBag, _store: &UserStore) -> HandlerResponse {
    let first_or = |name: &str, default: &str| bag.first_query(name).unwrap_or(default).to_string();
    HandlerResponse::new(
        200,
        Payload::Search(SearchPayload {
            route: "GET /search",
            message: "Performing search",
            all_parameters: bag.clone(),
            search_params: SearchParams {
                query: first_or("q", ""),
                category: first_or("category", "all"),
                sort: first_or("sort", "relevance"),
                page: first_or("page", "1"),
            },
        }),
    )
}

pub fn api_v1(bag: &ParamBag, _store: &UserStore) -> HandlerResponse {
    api_version(bag, "GET /api/v1/*", "API Version 1 endpoint", "v1")
}

pub fn api_v2(bag: &ParamBag, _store: &UserStore) -> HandlerResponse {
    api_version(bag, "GET /api/v2/*", "API Version 2 endpoint", "v2")
}

fn api_version(
    bag: &ParamBag,
    route: &'static str,
    message: &'static str,
    api_version: &'static str,
) -> HandlerResponse {
    HandlerResponse::new(
        200,
        Payload::ApiVersion(ApiVersionPayload {
            route,
            message,
            all_parameters: bag.clone(),
            api_version,
        }),
    )
}

pub fn not_found(bag: &ParamBag, _store: &UserStore) -> HandlerResponse {
    HandlerResponse::new(
        404,
        Payload::RouteNotFound(RouteNotFoundPayload {
            error: "Route not found",
            message: format!("No handler for {} {}", bag.method, bag.path),
            all_parameters: bag.clone(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::RawRequest;
    use serde_json::{json, Value};

    type Handler = fn(&ParamBag, &UserStore) -> HandlerResponse;

    fn call(handler: Handler, raw: RawRequest) -> (u16, Value) {
        let store = UserStore::new();
        let resp = handler(&ParamBag::extract(raw), &store);
        let body = serde_json::from_slice(&resp.body_bytes().unwrap()).unwrap();
        (resp.status, body)
    }

    #[test]
    fn test_home_lists_routes() {
        let (status, body) = call(home, RawRequest::new("GET", "/"));
        assert_eq!(status, 200);
        assert_eq!(body["available_routes"].as_object().unwrap().len(), 8);
        assert_eq!(body["all_parameters"]["path"], "/");
    }

    #[test]
    fn test_get_user_echoes_segment() {
        let (status, body) = call(get_user, RawRequest::new("GET", "/users/42?active=true"));
        assert_eq!(status, 200);
        assert_eq!(body["message"], "Getting user with ID: 42");
        assert_eq!(body["extracted_data"]["user_id"], 42);
        let filters = &body["extracted_data"]["query_filters"];
        assert_eq!(filters, &json!({"active": ["true"]}));

        let (_, body) = call(get_user, RawRequest::new("GET", "/users/abc"));
        assert_eq!(body["extracted_data"]["user_id"], "abc");
    }

    #[test]
    fn test_pagination_defaults_and_overrides() {
        let (_, body) = call(list_users, RawRequest::new("GET", "/users"));
        assert_eq!(body["pagination"], json!({"limit": 10, "offset": 0}));

        let raw = RawRequest::new("GET", "/users?limit=5&offset=x&limit=9");
        let (_, body) = call(list_users, raw);
        assert_eq!(body["pagination"], json!({"limit": 5, "offset": 0}));
    }

    #[test]
    fn test_create_user_echoes_body() {
        let raw = RawRequest::new("POST", "/users")
            .with_header("Content-Type", "application/json")
            .with_body(r#"{"name":"Al","extra":[1]}"#);
        let (status, body) = call(create_user, raw);
        assert_eq!(status, 201);
        assert_eq!(body["received_body"], json!({"name": "Al", "extra": [1]}));
    }

    #[test]
    fn test_review_ids_by_raw_position() {
        let ids = review_ids("/products/12/reviews/7");
        assert_eq!(ids.product_id.as_deref(), Some("12"));
        assert_eq!(ids.review_id.as_deref(), Some("7"));

        let short = review_ids("/products/12/reviews");
        assert_eq!(short.review_id, None);

        let raw = RawRequest::new("GET", "/products/12/reviews");
        let (_, body) = call(product_review, raw);
        let expected = json!({"product_id": "12", "review_id": null});
        assert_eq!(body["extracted_data"], expected);
    }

    #[test]
    fn test_search_defaults() {
        let raw = RawRequest::new("GET", "/search?q=shoe&sort=asc");
        let (status, body) = call(search, raw);
        assert_eq!(status, 200);
        assert_eq!(
            body["search_params"],
            json!({"query": "shoe", "category": "all", "sort": "asc", "page": "1"})
        );
    }

    #[test]
    fn test_api_versions() {
        let (_, v1) = call(api_v1, RawRequest::new("GET", "/api/v1/items"));
        let (_, v2) = call(api_v2, RawRequest::new("POST", "/api/v2/items"));
        assert_eq!(v1["api_version"], "v1");
        assert_eq!(v2["api_version"], "v2");
    }

    #[test]
    fn test_not_found_message() {
        let (status, body) = call(not_found, RawRequest::new("DELETE", "/nope?x=1"));
        assert_eq!(status, 404);
        assert_eq!(body["error"], "Route not found");
        assert_eq!(body["message"], "No handler for DELETE /nope");
    }
}
