//! Minimal waymark example: named routes, reverse links and hot reload.
//!
//! Run with:
//!   RUST_LOG=info,waymark=debug cargo run --example basic
//!
//! Try:
//!   curl http://localhost:3000/
//!   curl http://localhost:3000/user/42
//!   curl -i -X POST http://localhost:3000/users
//!   curl http://localhost:3000/2013/10/26/user/naoina
//!   curl http://localhost:3000/static/css/site.css
//!   curl -i -X DELETE http://localhost:3000/         # 405 (method_not_allowed = true)
//!   kill -HUP <pid>                                  # rebuild and swap the routes

use waymark::{
    Controller, Request, Response, ReverseError, Router, RouteTable, RouterHandle, Server,
    ServerConfig, reverse,
};

#[tokio::main]
async fn main() -> Result<(), waymark::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = match std::env::var("WAYMARK_CONFIG") {
        Ok(path) => ServerConfig::load(path)?,
        Err(_) => ServerConfig { method_not_allowed: true, ..ServerConfig::default() },
    };

    let handle = RouterHandle::new(Router::build(routes())?);

    #[cfg(unix)]
    tokio::spawn(reload_on_hangup(handle.clone()));

    Server::with_config(config).serve_handle(handle).await
}

#[cfg(unix)]
async fn reload_on_hangup(handle: RouterHandle) {
    use tokio::signal::unix::{SignalKind, signal};

    let mut hangup = match signal(SignalKind::hangup()) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("failed to install SIGHUP handler: {e}");
            return;
        }
    };
    while hangup.recv().await.is_some() {
        if let Err(e) = handle.rebuild(routes()) {
            tracing::error!("route reload failed, keeping the current router: {e}");
        }
    }
}

fn routes() -> RouteTable {
    RouteTable::new()
        .route("root", "/", Controller::new("Root").get(index))
        .route("user", "/user/:id", Controller::new("User").get(show_user))
        .route("users", "/users", Controller::new("Users").post(create_user))
        .route("date", "/:year/:month/:day/user/:name", Controller::new("Date").get(dated))
        .route("static", "/static/*path", Controller::new("Static").get(asset))
}

// GET /
//
// Links are built from route names, never hard-coded.
async fn index(req: Request) -> Result<Response, ReverseError> {
    let user = reverse!(req.router(), "user", 42)?;
    let date = reverse!(req.router(), "date", 2013, 10, 26, "naoina")?;
    let css = reverse!(req.router(), "static", "css/site.css")?;
    Ok(Response::html(format!(
        r#"<a href="{user}">user</a> <a href="{date}">date</a> <link rel="stylesheet" href="{css}">"#,
    )))
}

// GET /user/:id
async fn show_user(req: Request) -> Response {
    let id = req.param("id").unwrap_or("unknown");
    Response::json(format!(r#"{{"id":"{id}","name":"alice"}}"#).into_bytes())
}

// POST /users → 302 to the new user's page
async fn create_user(req: Request) -> Result<Response, ReverseError> {
    let location = req.url("user", &[&99])?;
    Ok(Response::redirect(&location, false))
}

// GET /:year/:month/:day/user/:name
async fn dated(req: Request) -> Response {
    let p = req.params();
    Response::text(format!(
        "{}-{}-{} by {}",
        p.get("year").unwrap_or_default(),
        p.get("month").unwrap_or_default(),
        p.get("day").unwrap_or_default(),
        p.get("name").unwrap_or_default(),
    ))
}

// GET /static/*path
async fn asset(req: Request) -> Response {
    Response::text(format!("asset: {}", req.param("path").unwrap_or_default()))
}
