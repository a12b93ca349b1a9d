//! HTTP transport: request extraction, the `may_minihttp` service, response
//! writing and the server lifecycle.

pub mod http_server;
pub mod request;
pub mod response;
pub mod service;

pub use http_server::{HttpServer, ServerHandle};
pub use request::{
    decode_body, decode_path, extract_path_params, is_json_content_type, parse_query_params,
    read_request, MultiMap, ParamBag, PathValue, RawRequest,
};
pub use response::write_handler_response;
pub use service::FunctionService;
