//! Handler trait and type erasure.
//!
//! A [`Controller`](crate::Controller) stores up to six handlers of six
//! different concrete types, so each one is erased to a shared trait object
//! when it is attached:
//!
//! ```text
//! async fn show(req: Request) -> Response { … }   ← user writes this
//!        ↓ Controller::new("User").get(show)
//! show.into_boxed_handler()                       ← Handler blanket impl
//!        ↓
//! Arc::new(FnHandler(show))                       ← stored as BoxedHandler
//!        ↓ at request time
//! handler.call(req)                               ← one virtual call
//! ```
//!
//! The verb → handler choice is made once, when the controller is built.
//! Dispatch only indexes a slot.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// A boxed future resolving to a [`Response`]. `Send + 'static` so tokio can
/// move it between worker threads.
pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Object-safe calling interface behind every handler.
///
/// `#[doc(hidden)] pub` because it appears in the signature of the public
/// [`Handler`] trait.
#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture;
}

/// A type-erased handler, shared by every request routed to it.
#[doc(hidden)]
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

/// Implemented for every valid route handler.
///
/// Satisfied automatically by any function of the shape
///
/// ```text
/// async fn name(req: Request) -> impl IntoResponse
/// ```
///
/// The trait is sealed; the blanket impl below is the only implementation.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    pub trait Sealed {}
}

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}
