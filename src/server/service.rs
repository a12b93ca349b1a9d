use std::io;
use std::sync::Arc;

use may_minihttp::{HttpService, Request, Response};
use tracing::info_span;

use super::request::{read_request, ParamBag};
use super::response::write_handler_response;
use crate::dispatcher::Dispatcher;
use crate::ids::RequestId;

/// `may_minihttp` service running one function variant.
///
/// Cloned once per connection by the server; clones share the dispatcher and
/// through it the user store.
#[derive(Clone)]
pub struct FunctionService {
    dispatcher: Arc<Dispatcher>,
}

impl FunctionService {
    #[must_use]
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }
}

impl HttpService for FunctionService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let bag = ParamBag::extract(read_request(req));
        let request_id = RequestId::for_request(&bag);

        let span = info_span!(
            "request",
            request_id = %request_id,
            method = %bag.method,
            path = %bag.path
        );
        let _entered = span.enter();

        let resp = self.dispatcher.dispatch(&bag);
        write_handler_response(res, &resp);
        Ok(())
    }
}
