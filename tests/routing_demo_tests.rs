//! End-to-end tests for the routing demo over real TCP.

mod common;

use common::http::{get, parse_response_parts, send_json, send_request};
use common::test_server::TestServer;
use fnrouter::FunctionVariant;
use serde_json::json;

fn server() -> TestServer {
    TestServer::start(FunctionVariant::Routing)
}

#[test]
fn test_home_lists_available_routes() {
    let server = server();
    let resp = get(&server.addr(), "/");
    assert_eq!(resp.status, 200);
    let body = resp.json();
    assert_eq!(body["message"], "Welcome to the fnrouter routing demo");
    assert_eq!(body["available_routes"].as_object().unwrap().len(), 8);
    assert_eq!(body["all_parameters"]["method"], "GET");
}

#[test]
fn test_get_user_echoes_id_and_filters() {
    let server = server();
    let body = get(&server.addr(), "/users/42?active=true&tag=a&tag=b").json();
    assert_eq!(body["message"], "Getting user with ID: 42");
    assert_eq!(body["extracted_data"]["user_id"], 42);
    assert_eq!(
        body["extracted_data"]["query_filters"],
        json!({"active": ["true"], "tag": ["a", "b"]})
    );
    assert_eq!(body["all_parameters"]["path_params"]["segment_2"], 42);
    assert_eq!(body["all_parameters"]["full_url"], "/users/42?active=true&tag=a&tag=b");
}

#[test]
fn test_list_users_pagination() {
    let server = server();
    let addr = server.addr();

    let defaults = get(&addr, "/users").json();
    assert_eq!(defaults["pagination"], json!({"limit": 10, "offset": 0}));

    let custom = get(&addr, "/users?limit=25&offset=50").json();
    assert_eq!(custom["pagination"], json!({"limit": 25, "offset": 50}));
}

#[test]
fn test_create_user_echoes_body() {
    let server = server();
    let body = r#"{"name":"Al","tags":[1,2]}"#;
    let resp = send_json(&server.addr(), "POST", "/users", body);
    assert_eq!(resp.status, 201);
    let body = resp.json();
    assert_eq!(body["message"], "Creating new user");
    assert_eq!(body["received_body"], json!({"name": "Al", "tags": [1, 2]}));
    assert_eq!(body["all_parameters"]["body_params"], body["received_body"]);
}

#[test]
fn test_product_review() {
    let server = server();
    let body = get(&server.addr(), "/products/12/reviews/7").json();
    assert_eq!(body["extracted_data"], json!({"product_id": "12", "review_id": "7"}));
    assert_eq!(body["message"], "Getting review 7 for product 12");
}

#[test]
fn test_search_defaults_and_overrides() {
    let server = server();
    let addr = server.addr();

    let body = get(&addr, "/search").json();
    assert_eq!(
        body["search_params"],
        json!({"query": "", "category": "all", "sort": "relevance", "page": "1"})
    );

    let body = get(&addr, "/search?q=shoe&category=boots&page=3").json();
    assert_eq!(
        body["search_params"],
        json!({"query": "shoe", "category": "boots", "sort": "relevance", "page": "3"})
    );
}

#[test]
fn test_api_versions_accept_any_method() {
    let server = server();
    let addr = server.addr();

    assert_eq!(get(&addr, "/api/v1/items").json()["api_version"], "v1");
    let v2 = send_json(&addr, "PUT", "/api/v2/items/9", "{}");
    assert_eq!(v2.status, 200);
    assert_eq!(v2.json()["api_version"], "v2");
}

#[test]
fn test_unknown_route_is_404() {
    let server = server();
    let addr = server.addr();

    let resp = get(&addr, "/nope");
    assert_eq!(resp.status, 404);
    let body = resp.json();
    assert_eq!(body["error"], "Route not found");
    assert_eq!(body["message"], "No handler for GET /nope");

    // the demo only lists and fetches users with GET
    let resp = send_json(&addr, "DELETE", "/users/1", "{}");
    assert_eq!(resp.status, 404);
}

#[test]
fn test_non_json_body_is_ignored() {
    let server = server();
    let req = "POST /users HTTP/1.1\r\nHost: localhost\r\n\
               Content-Type: text/plain\r\nContent-Length: 5\r\n\r\nhello";
    let resp = parse_response_parts(&send_request(&server.addr(), req));
    assert_eq!(resp.status, 201);
    assert_eq!(resp.json()["received_body"], json!({}));
}

#[test]
fn test_every_response_is_json() {
    let server = server();
    let addr = server.addr();
    for path in ["/", "/users", "/search?q=x", "/missing"] {
        let resp = get(&addr, path);
        assert_eq!(resp.header("content-type"), Some("application/json"), "{path}");
        assert!(resp.json().is_object(), "{path}");
    }
}
