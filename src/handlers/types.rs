//! Response payload shapes, one per route.
//!
//! Every variant serializes as a plain JSON object; the enum only exists so
//! handlers get compile-time structure while the wire format stays the same.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::models::User;
use crate::server::{MultiMap, ParamBag, PathValue};

/// Static `"<METHOD> <pattern>" → description` listing.
pub type RouteDirectory = BTreeMap<&'static str, &'static str>;

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Home(HomePayload),
    UserLookup(UserLookupPayload),
    UserListing(UserListingPayload),
    UserCreation(UserCreationPayload),
    ProductReview(ProductReviewPayload),
    Search(SearchPayload),
    ApiVersion(ApiVersionPayload),
    RouteNotFound(RouteNotFoundPayload),
    Envelope(ApiEnvelope),
    Error(ErrorPayload),
}

#[derive(Debug, Clone, Serialize)]
pub struct HomePayload {
    pub message: &'static str,
    pub all_parameters: ParamBag,
    pub available_routes: RouteDirectory,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserLookupPayload {
    pub route: &'static str,
    pub message: String,
    pub all_parameters: ParamBag,
    pub extracted_data: UserLookupData,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserLookupData {
    pub user_id: Option<PathValue>,
    pub query_filters: MultiMap,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserListingPayload {
    pub route: &'static str,
    pub message: &'static str,
    pub all_parameters: ParamBag,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserCreationPayload {
    pub route: &'static str,
    pub message: &'static str,
    pub all_parameters: ParamBag,
    pub received_body: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductReviewPayload {
    pub route: &'static str,
    pub message: String,
    pub all_parameters: ParamBag,
    pub extracted_data: ReviewIds,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewIds {
    pub product_id: Option<String>,
    pub review_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchPayload {
    pub route: &'static str,
    pub message: &'static str,
    pub all_parameters: ParamBag,
    pub search_params: SearchParams,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchParams {
    pub query: String,
    pub category: String,
    pub sort: String,
    pub page: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiVersionPayload {
    pub route: &'static str,
    pub message: &'static str,
    pub all_parameters: ParamBag,
    pub api_version: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteNotFoundPayload {
    pub error: &'static str,
    pub message: String,
    pub all_parameters: ParamBag,
}

/// `{success, data?, error?, count?, message?, version?}` envelope of the
/// user service.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ApiEnvelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<EnvelopeData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum EnvelopeData {
    User(User),
    Users(Vec<User>),
    Endpoints(RouteDirectory),
}

impl ApiEnvelope {
    #[must_use]
    pub fn user(user: User) -> Self {
        Self {
            success: true,
            data: Some(EnvelopeData::User(user)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn users(users: Vec<User>) -> Self {
        Self {
            success: true,
            count: Some(users.len()),
            data: Some(EnvelopeData::Users(users)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn service_info(
        message: impl Into<String>,
        version: impl Into<String>,
        endpoints: RouteDirectory,
    ) -> Self {
        Self {
            success: true,
            data: Some(EnvelopeData::Endpoints(endpoints)),
            message: Some(message.into()),
            version: Some(version.into()),
            ..Self::default()
        }
    }
}

/// Body of dispatcher-level failures (e.g. no handler registered).
#[derive(Debug, Clone, Serialize)]
pub struct ErrorPayload {
    pub error: String,
    pub method: String,
    pub path: String,
}
