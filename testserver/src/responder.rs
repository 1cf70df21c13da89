use crate::{request::Request, response::Response};

/// Decides how the mock server answers a request. Returning `None` passes the
/// request on to the next responder.
pub trait Responder: Send + Sync + 'static {
    fn respond(&self, request: &Request) -> Option<Response>;
}

impl<F> Responder for F
where
    F: Fn(&Request) -> Option<Response> + Send + Sync + 'static,
{
    fn respond(&self, request: &Request) -> Option<Response> {
        self(request)
    }
}
