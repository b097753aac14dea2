//! # waymark
//!
//! A small HTTP framework built around named routes.
//!
//! Every route has a name, a path pattern and a [`Controller`], which is the
//! set of verbs it answers. The route table is compiled once at startup into
//! an immutable [`Router`] that works in both directions:
//!
//! - **Forward dispatch**: `(method, path)` → controller handler plus
//!   captured parameters. One radix-tree lookup via [`matchit`], then an
//!   array index for the verb.
//! - **Reverse resolution**: `(name, values…)` → concrete path, for links
//!   and redirects. The result is normalized exactly like an incoming path,
//!   so a value that fits its token comes back out of [`Router::dispatch`]
//!   unchanged. Values are not escaped: a `/` inside a `:name` value lands
//!   in the path as a separator.
//!
//! ## Patterns
//!
//! | Token | Matches |
//! |---|---|
//! | `/user` | the literal segment |
//! | `/:id` | one segment, captured as `id` |
//! | `/*path` | the rest of the path, slashes included (last segment only) |
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use waymark::{Controller, Request, Response, ReverseError, Router, RouteTable, Server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), waymark::Error> {
//!     let routes = RouteTable::new()
//!         .route("user", "/user/:id", Controller::new("User").get(show_user))
//!         .route("users", "/users", Controller::new("Users").post(create_user))
//!         .route("static", "/static/*path", Controller::new("Static").get(asset));
//!
//!     Server::bind(([0, 0, 0, 0], 3000))
//!         .serve(Router::build(routes)?)
//!         .await
//! }
//!
//! async fn show_user(req: Request) -> Response {
//!     Response::text(format!("user {}", req.param("id").unwrap_or("?")))
//! }
//!
//! async fn create_user(req: Request) -> Result<Response, ReverseError> {
//!     let location = req.url("user", &[&99])?;
//!     Ok(Response::redirect(&location, false))
//! }
//!
//! async fn asset(req: Request) -> Response {
//!     Response::text(req.param("path").unwrap_or_default().to_owned())
//! }
//! ```

mod config;
mod controller;
mod error;
mod handle;
mod handler;
mod method;
mod path;
mod pattern;
mod request;
mod response;
mod route;
mod router;
mod server;

pub use config::{ConfigError, ServerConfig};
pub use controller::Controller;
pub use error::{BuildError, Error, ReverseError};
pub use handle::RouterHandle;
pub use handler::Handler;
pub use method::{Method, UnknownMethod};
pub use path::normalize_path;
pub use pattern::PatternError;
pub use request::Request;
pub use response::{ContentType, IntoResponse, Response, ResponseBuilder};
pub use route::{Route, RouteTable};
pub use router::{Match, Miss, Params, ReverseArg, Router};
pub use server::Server;

pub use http::StatusCode;
