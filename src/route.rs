//! Route definitions.
//!
//! A [`RouteTable`] is the ordered, unvalidated input an application writes
//! at startup. [`Router::build`](crate::Router::build) turns each entry into
//! a compiled [`Route`].

use crate::controller::Controller;
use crate::pattern::{Pattern, PatternError};

/// The ordered list of routes for an application.
///
/// ```rust
/// use waymark::{Controller, Request, Response, RouteTable};
///
/// async fn root(_: Request) -> Response { Response::text("home") }
/// async fn user(_: Request) -> Response { Response::text("user") }
///
/// let table = RouteTable::new()
///     .route("root", "/", Controller::new("Root").get(root))
///     .route("user", "/user/:id", Controller::new("User").get(user));
/// assert_eq!(table.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

#[derive(Debug)]
pub(crate) struct RouteEntry {
    pub(crate) name: String,
    pub(crate) path: String,
    pub(crate) controller: Controller,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a route. Returns `self` so registrations chain.
    pub fn route(
        mut self,
        name: impl Into<String>,
        path: impl Into<String>,
        controller: Controller,
    ) -> Self {
        self.push(name, path, controller);
        self
    }

    /// Appends a route in place.
    pub fn push(&mut self, name: impl Into<String>, path: impl Into<String>, controller: Controller) {
        self.entries.push(RouteEntry {
            name: name.into(),
            path: path.into(),
            controller,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn into_entries(self) -> Vec<RouteEntry> {
        self.entries
    }
}

/// A compiled route: its name, its pattern, and the controller behind it.
#[derive(Debug)]
pub struct Route {
    name: String,
    pattern: Pattern,
    controller: Controller,
    param_names: Vec<String>,
}

impl Route {
    pub(crate) fn compile(entry: RouteEntry) -> Result<Self, PatternError> {
        let pattern = Pattern::parse(&entry.path)?;
        let param_names = pattern.token_texts();
        Ok(Self {
            name: entry.name,
            pattern,
            controller: entry.controller,
            param_names,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The pattern exactly as registered, e.g. `/user/:id`.
    pub fn path(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Parameter tokens in the pattern, marker included, left to right:
    /// `[":year", ":month"]` for `/:year/:month`.
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    pub(crate) fn pattern(&self) -> &Pattern {
        &self.pattern
    }
}
