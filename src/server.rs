//! HTTP server and graceful shutdown.
//!
//! On SIGTERM or Ctrl-C the server:
//! 1. stops calling `listener.accept()`, so no new connections are taken;
//! 2. lets every in-flight connection task run to completion;
//! 3. returns from [`Server::serve`].
//!
//! Every request loads the current router from a [`RouterHandle`], so a
//! [`RouterHandle::swap`] takes effect on the next request without a restart.

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http::StatusCode;
use http_body_util::{BodyExt, Full};
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tracing::{Instrument, debug, error, info, info_span, warn};

use crate::config::ServerConfig;
use crate::error::Error;
use crate::handle::RouterHandle;
use crate::request::Request;
use crate::response::Response;
use crate::router::{Miss, Router};

/// The HTTP server.
pub struct Server {
    config: ServerConfig,
}

impl Server {
    /// A server that will listen on `addr`, with every other setting at its
    /// default.
    ///
    /// ```rust,no_run
    /// use waymark::Server;
    /// let server = Server::bind(([0, 0, 0, 0], 3000));
    /// ```
    pub fn bind(addr: impl Into<SocketAddr>) -> Self {
        Self::with_config(ServerConfig { addr: addr.into(), ..ServerConfig::default() })
    }

    pub fn with_config(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Answer wrong-method requests with `405` and an `Allow` header
    /// instead of `404`.
    pub fn method_not_allowed(mut self, enabled: bool) -> Self {
        self.config.method_not_allowed = enabled;
        self
    }

    /// Serves `router` until SIGTERM or Ctrl-C, then drains.
    pub async fn serve(self, router: Router) -> Result<(), Error> {
        self.serve_handle(RouterHandle::new(router)).await
    }

    /// Like [`serve`](Server::serve), reading routes through `handle` so
    /// they can be swapped while running.
    pub async fn serve_handle(self, handle: RouterHandle) -> Result<(), Error> {
        self.serve_with_shutdown(handle, shutdown_signal()).await
    }

    /// Serves until `signal` resolves, then stops accepting and waits for
    /// in-flight connections.
    pub async fn serve_with_shutdown(
        self,
        handle: RouterHandle,
        signal: impl Future<Output = ()>,
    ) -> Result<(), Error> {
        let addr = self.config.addr;
        let method_not_allowed = self.config.method_not_allowed;
        let listener = TcpListener::bind(addr).await?;

        info!(addr = %addr, routes = handle.load().len(), "waymark listening");

        let mut tasks = tokio::task::JoinSet::new();

        tokio::pin!(signal);

        loop {
            tokio::select! {
                // Shutdown is checked first so a signal stops accepting even
                // when connections are queued.
                biased;

                () = &mut signal => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                    break;
                }

                res = listener.accept() => {
                    let (stream, remote_addr) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    let handle = handle.clone();
                    let io = TokioIo::new(stream);

                    tasks.spawn(async move {
                        // Called once per request on the connection.
                        let svc = service_fn(move |req| {
                            let router = handle.load();
                            async move {
                                Ok::<_, Infallible>(respond(router, req, method_not_allowed).await)
                            }
                        });

                        if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                            .serve_connection(io, svc)
                            .await
                        {
                            error!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }

                // Reap finished tasks so the set does not grow without bound.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        while tasks.join_next().await.is_some() {}

        info!("waymark stopped");
        Ok(())
    }
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Routes one request and produces one response. Never fails: misses become
/// 404 (or 405), an unreadable body becomes 400.
pub(crate) async fn respond<B>(
    router: Arc<Router>,
    req: http::Request<B>,
    method_not_allowed: bool,
) -> http::Response<Full<Bytes>>
where
    B: hyper::body::Body,
    B::Error: std::fmt::Display,
{
    let (parts, body) = req.into_parts();
    let span = info_span!("request", method = %parts.method, path = parts.uri.path());

    async move {
        let matched = match router.resolve(parts.method.as_str(), parts.uri.path()) {
            Ok(m) => m,
            Err(Miss::NotFound) => {
                debug!("no route matched");
                return Response::status(StatusCode::NOT_FOUND).into_inner();
            }
            Err(Miss::MethodNotAllowed { route, allowed }) => {
                debug!(route = %route, "route does not implement method");
                if !method_not_allowed {
                    return Response::status(StatusCode::NOT_FOUND).into_inner();
                }
                let allow: Vec<&str> = allowed.iter().map(|m| m.as_str()).collect();
                return Response::builder()
                    .status(StatusCode::METHOD_NOT_ALLOWED)
                    .header("allow", &allow.join(", "))
                    .no_body()
                    .into_inner();
            }
        };

        let handler = Arc::clone(matched.handler());
        let method = matched.method();
        let route = matched.name().to_owned();
        let params = matched.into_params();
        debug!(route = %route, "route matched");

        let body = match body.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) => {
                warn!(error = %e, "failed to read request body");
                return Response::status(StatusCode::BAD_REQUEST).into_inner();
            }
        };

        let req = Request {
            method,
            path: parts.uri.path().to_owned(),
            headers: parts.headers,
            body,
            route,
            params,
            router: Arc::clone(&router),
        };

        let res = handler.call(req).await;
        debug!(status = res.status.as_u16(), "handled");
        res.into_inner()
    }
    .instrument(span)
    .await
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first SIGTERM (Unix) or Ctrl-C.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let sigterm = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}
