//! Error types.
//!
//! Routing misses are not errors: [`Router::dispatch`](crate::Router::dispatch)
//! returns `None` and the server answers 404. The types here cover a route
//! table that cannot be compiled, a reverse lookup that cannot be satisfied,
//! and the infrastructure failures of the server itself.

use crate::config::ConfigError;
use crate::pattern::PatternError;

/// The error type returned by the server's fallible operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("route table: {0}")]
    Build(#[from] BuildError),
}

/// A route table that cannot be compiled into a [`Router`](crate::Router).
///
/// Fatal at startup: the application should refuse to serve.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("route `{route}`: invalid pattern `{path}`: {source}")]
    InvalidPattern {
        route: String,
        path: String,
        source: PatternError,
    },
    #[error("route `{route}`: pattern `{path}` conflicts with an earlier route: {source}")]
    Conflict {
        route: String,
        path: String,
        source: matchit::InsertError,
    },
    #[error("route name `{name}` is registered more than once")]
    DuplicateName { name: String },
}

/// Why [`Router::reverse`](crate::Router::reverse) could not build a path.
///
/// These point at a caller bug (a template or controller naming a route
/// wrongly). The router only reports them; whether to escalate is up to the
/// caller.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ReverseError {
    #[error("no matching route found: `{name}` ({})", .arg_types.join(", "))]
    NoMatchingRoute {
        name: String,
        /// Type names of the supplied values, never the values themselves.
        arg_types: Vec<&'static str>,
    },
    #[error("too few arguments for route `{name}` ({controller}): expected {expected}, got {got}")]
    TooFewArguments {
        name: String,
        controller: String,
        expected: usize,
        got: usize,
    },
    #[error("too many arguments for route `{name}` ({controller}): expected {expected}, got {got}")]
    TooManyArguments {
        name: String,
        controller: String,
        expected: usize,
        got: usize,
    },
}
