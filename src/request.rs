//! Incoming HTTP request type.

use std::sync::Arc;

use bytes::Bytes;
use http::HeaderMap;

use crate::error::ReverseError;
use crate::method::Method;
use crate::router::{Params, ReverseArg, Router};

/// A dispatched request: the HTTP parts plus what the router found.
pub struct Request {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Bytes,
    pub(crate) route: String,
    pub(crate) params: Params,
    pub(crate) router: Arc<Router>,
}

impl Request {
    pub fn method(&self) -> Method { self.method }

    /// The request path as received, before normalization.
    pub fn path(&self) -> &str { &self.path }

    /// Name of the route that matched.
    pub fn route(&self) -> &str { &self.route }

    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }
    pub fn params(&self) -> &Params { &self.params }

    /// Header lookup; names are case-insensitive. Non-UTF-8 values read as
    /// absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a captured path parameter.
    ///
    /// For a route `/user/:id`, `req.param("id")` on `/user/42` returns `Some("42")`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// The router snapshot that dispatched this request.
    pub fn router(&self) -> &Router { &self.router }

    /// Builds the path of a named route, for links and redirects.
    ///
    /// Resolved against the same router snapshot that served this request.
    ///
    /// ```rust,no_run
    /// use waymark::{Request, Response, ReverseError};
    ///
    /// async fn create(req: Request) -> Result<Response, ReverseError> {
    ///     let location = req.url("user", &[&42])?;
    ///     Ok(Response::redirect(&location, false))
    /// }
    /// ```
    pub fn url(&self, name: &str, args: &[&dyn ReverseArg]) -> Result<String, ReverseError> {
        self.router.reverse(name, args)
    }
}
