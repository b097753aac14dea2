//! The per-route handler capability set.
//!
//! A controller answers some subset of {GET, POST, PUT, DELETE, HEAD, PATCH}.
//! Each verb has a fixed slot; an empty slot means the route does not
//! implement that verb and dispatch treats the request as unmatched.

use std::borrow::Cow;
use std::fmt;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;

/// Handlers for one route, one optional slot per [`Method`].
///
/// ```rust
/// use waymark::{Controller, Request, Response};
///
/// async fn show(_: Request) -> Response { Response::text("user") }
/// async fn update(_: Request) -> Response { Response::text("updated") }
///
/// let user = Controller::new("User").get(show).put(update);
/// assert!(user.implements(waymark::Method::Put));
/// assert!(!user.implements(waymark::Method::Delete));
/// ```
#[derive(Clone)]
pub struct Controller {
    label: Cow<'static, str>,
    slots: [Option<BoxedHandler>; 6],
}

impl Controller {
    /// An empty controller. `label` names it in diagnostics such as reverse
    /// resolution errors.
    pub fn new(label: impl Into<Cow<'static, str>>) -> Self {
        Self { label: label.into(), slots: Default::default() }
    }

    pub fn get(self, handler: impl Handler) -> Self {
        self.on(Method::Get, handler)
    }

    pub fn post(self, handler: impl Handler) -> Self {
        self.on(Method::Post, handler)
    }

    pub fn put(self, handler: impl Handler) -> Self {
        self.on(Method::Put, handler)
    }

    pub fn delete(self, handler: impl Handler) -> Self {
        self.on(Method::Delete, handler)
    }

    pub fn head(self, handler: impl Handler) -> Self {
        self.on(Method::Head, handler)
    }

    pub fn patch(self, handler: impl Handler) -> Self {
        self.on(Method::Patch, handler)
    }

    /// Fills the slot for `method`, replacing any earlier handler.
    pub fn on(mut self, method: Method, handler: impl Handler) -> Self {
        self.slots[method.index()] = Some(handler.into_boxed_handler());
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn implements(&self, method: Method) -> bool {
        self.slots[method.index()].is_some()
    }

    /// Verbs this controller answers, in [`Method::ALL`] order.
    pub fn methods(&self) -> impl Iterator<Item = Method> + '_ {
        Method::ALL.into_iter().filter(|m| self.implements(*m))
    }

    pub(crate) fn handler(&self, method: Method) -> Option<&BoxedHandler> {
        self.slots[method.index()].as_ref()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("label", &self.label)
            .field("methods", &self.methods().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Request, Response};

    async fn ok(_: Request) -> Response {
        Response::text("ok")
    }

    #[test]
    fn empty_controller_implements_nothing() {
        let c = Controller::new("Nothing");
        assert!(c.is_empty());
        assert_eq!(c.methods().count(), 0);
        assert!(Method::ALL.iter().all(|m| c.handler(*m).is_none()));
    }

    #[test]
    fn slots_are_independent() {
        let c = Controller::new("Mixed").get(ok).patch(ok);
        assert_eq!(c.methods().collect::<Vec<_>>(), [Method::Get, Method::Patch]);
        assert!(c.handler(Method::Get).is_some());
        assert!(c.handler(Method::Post).is_none());
        assert!(!c.is_empty());
    }

    #[test]
    fn every_builder_fills_its_own_slot() {
        let c = Controller::new("All")
            .get(ok)
            .post(ok)
            .put(ok)
            .delete(ok)
            .head(ok)
            .patch(ok);
        assert_eq!(c.methods().collect::<Vec<_>>(), Method::ALL);
    }

    #[test]
    fn debug_lists_label_and_methods() {
        let c = Controller::new("User").get(ok);
        assert_eq!(format!("{c:?}"), r#"Controller { label: "User", methods: [Get] }"#);
    }
}
