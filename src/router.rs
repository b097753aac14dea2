//! Named-route router.
//!
//! One radix tree holds every pattern; the leaf stores an index into the
//! route list. Method selection happens after the path matched, by indexing
//! the route's [`Controller`](crate::Controller) slots. A name → index map
//! serves the reverse direction. Both indexes are built in the same pass over
//! the same table, and the router is never mutated afterwards: share it
//! behind an `Arc` (or a [`RouterHandle`](crate::RouterHandle)) and read it
//! from any number of tasks.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;

use matchit::Router as MatchitRouter;
use tracing::{debug, info, warn};

use crate::error::{BuildError, ReverseError};
use crate::handler::BoxedHandler;
use crate::method::Method;
use crate::path::normalize_path;
use crate::route::{Route, RouteTable};

/// The compiled route table.
///
/// ```rust
/// use waymark::{reverse, Controller, Request, Response, Router, RouteTable};
///
/// async fn user(_: Request) -> Response { Response::text("user") }
///
/// let router = Router::build(
///     RouteTable::new().route("user", "/user/:id", Controller::new("User").get(user)),
/// ).unwrap();
///
/// let m = router.dispatch("GET", "/user/77").unwrap();
/// assert_eq!(m.name(), "user");
/// assert_eq!(m.params().get("id"), Some("77"));
///
/// assert_eq!(reverse!(router, "user", 77).unwrap(), "/user/77");
/// ```
pub struct Router {
    tree: MatchitRouter<usize>,
    routes: Vec<Route>,
    names: HashMap<String, usize>,
}

impl Router {
    /// Compiles `table` into a router.
    ///
    /// Fails on the first malformed pattern, on a pattern the tree cannot
    /// hold next to an earlier one, or on a repeated route name.
    pub fn build(table: RouteTable) -> Result<Self, BuildError> {
        let entries = table.into_entries();
        let mut tree = MatchitRouter::new();
        let mut routes = Vec::with_capacity(entries.len());
        let mut names = HashMap::with_capacity(entries.len());

        for entry in entries {
            let index = routes.len();
            let (name, path) = (entry.name.clone(), entry.path.clone());

            let route = Route::compile(entry).map_err(|source| BuildError::InvalidPattern {
                route: name.clone(),
                path: path.clone(),
                source,
            })?;

            match names.entry(name) {
                Entry::Occupied(e) => {
                    return Err(BuildError::DuplicateName { name: e.key().clone() });
                }
                Entry::Vacant(e) => {
                    e.insert(index);
                }
            }

            tree.insert(route.pattern().tree_path(), index)
                .map_err(|source| BuildError::Conflict {
                    route: route.name().to_owned(),
                    path,
                    source,
                })?;

            if route.controller().is_empty() {
                warn!(
                    route = route.name(),
                    path = route.path(),
                    controller = route.controller().label(),
                    "controller implements no methods; every request to this route is unmatched",
                );
            }
            debug!(route = route.name(), path = route.path(), "route compiled");
            routes.push(route);
        }

        info!(routes = routes.len(), "router built");
        Ok(Self { tree, routes, names })
    }

    /// Forward dispatch.
    ///
    /// `method` is matched case-insensitively; `path` is normalized first.
    /// Returns `None` both when no pattern matches and when the matching
    /// route does not implement `method`. Use [`Router::resolve`] to tell
    /// the two apart.
    pub fn dispatch(&self, method: &str, path: &str) -> Option<Match<'_>> {
        self.resolve(method, path).ok()
    }

    /// Forward dispatch with the reason for a miss.
    pub fn resolve(&self, method: &str, path: &str) -> Result<Match<'_>, Miss> {
        let path = normalize_path(path);
        let matched = self.tree.at(&path).map_err(|_| Miss::NotFound)?;
        let route = &self.routes[*matched.value];

        let selected = method
            .parse::<Method>()
            .ok()
            .and_then(|m| route.controller().handler(m).map(|h| (m, h)));
        let Some((method, handler)) = selected else {
            return Err(Miss::MethodNotAllowed {
                route: route.name().to_owned(),
                allowed: route.controller().methods().collect(),
            });
        };

        let params = matched
            .params
            .iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();

        Ok(Match { route, method, handler, params: Params(params) })
    }

    /// Reverse resolution: builds the concrete path for route `name`.
    ///
    /// `args` bind to the route's parameter tokens by position. Each value
    /// is rendered with its `Display` impl and spliced in as-is; nothing
    /// checks that `"abc"` is a sensible `:id`. A static route returns its
    /// pattern untouched; anything else is normalized like a request path.
    ///
    /// The [`reverse!`](crate::reverse!) macro builds the `args` slice for you.
    pub fn reverse(&self, name: &str, args: &[&dyn ReverseArg]) -> Result<String, ReverseError> {
        let Some(route) = self.route(name) else {
            return Err(ReverseError::NoMatchingRoute {
                name: name.to_owned(),
                arg_types: args.iter().map(|a| (**a).type_name()).collect(),
            });
        };

        let expected = route.param_names().len();
        let got = args.len();
        match got.cmp(&expected) {
            Ordering::Less => {
                return Err(ReverseError::TooFewArguments {
                    name: name.to_owned(),
                    controller: route.controller().label().to_owned(),
                    expected,
                    got,
                });
            }
            Ordering::Greater => {
                return Err(ReverseError::TooManyArguments {
                    name: name.to_owned(),
                    controller: route.controller().label().to_owned(),
                    expected,
                    got,
                });
            }
            Ordering::Equal if expected == 0 => return Ok(route.path().to_owned()),
            Ordering::Equal => {}
        }

        let values: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        let path = route.pattern().substitute(&values);
        Ok(normalize_path(&path).into_owned())
    }

    /// Looks a route up by name.
    pub fn route(&self, name: &str) -> Option<&Route> {
        self.names.get(name).map(|&i| &self.routes[i])
    }

    /// Every route, in registration order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router").field("routes", &self.routes).finish()
    }
}

// ── Dispatch results ──────────────────────────────────────────────────────────

/// A successful forward dispatch.
pub struct Match<'r> {
    route: &'r Route,
    method: Method,
    handler: &'r BoxedHandler,
    params: Params,
}

impl<'r> Match<'r> {
    pub fn route(&self) -> &'r Route {
        self.route
    }

    /// Shorthand for `self.route().name()`.
    pub fn name(&self) -> &'r str {
        self.route.name()
    }

    pub fn method(&self) -> Method {
        self.method
    }

    #[doc(hidden)]
    pub fn handler(&self) -> &'r BoxedHandler {
        self.handler
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn into_params(self) -> Params {
        self.params
    }
}

impl fmt::Debug for Match<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("route", &self.route.name())
            .field("method", &self.method)
            .field("params", &self.params)
            .finish()
    }
}

/// Why a forward dispatch found nothing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Miss {
    /// No pattern matches the path.
    NotFound,
    /// `route` matches the path but does not implement the method.
    MethodNotAllowed { route: String, allowed: Vec<Method> },
}

/// Captured path parameters, in pattern order.
///
/// Keys are parameter names without their marker: `id` for `:id`, `path`
/// for `*path`. Values are the raw matched text.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ── Reverse arguments ─────────────────────────────────────────────────────────

/// A value usable as a reverse-resolution argument.
///
/// Implemented for every sized `Display` type. The type name only feeds
/// error messages.
pub trait ReverseArg: fmt::Display {
    fn type_name(&self) -> &'static str;
}

impl<T: fmt::Display> ReverseArg for T {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Calls [`Router::reverse`] with a variadic argument list.
///
/// ```rust
/// # use waymark::{reverse, Controller, Request, Response, Router, RouteTable};
/// # async fn h(_: Request) -> Response { Response::text("") }
/// # let router = Router::build(RouteTable::new()
/// #     .route("date", "/:year/:month/:day/user/:name", Controller::new("Date").get(h))).unwrap();
/// let path = reverse!(router, "date", 2013, 10, 26, "naoina").unwrap();
/// assert_eq!(path, "/2013/10/26/user/naoina");
/// ```
#[macro_export]
macro_rules! reverse {
    ($router:expr, $name:expr $(, $arg:expr)* $(,)?) => {
        $router.reverse($name, &[$(&$arg as &dyn $crate::ReverseArg),*])
    };
}
