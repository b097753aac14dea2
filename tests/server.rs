use waymark::{Controller, Request, Response, Router, RouteTable, RouterHandle, Server, ServerConfig};

async fn ok(_: Request) -> Response {
    Response::text("ok")
}

#[tokio::test]
async fn server_stops_when_the_signal_resolves() {
    let router = Router::build(RouteTable::new().route("root", "/", Controller::new("Root").get(ok)))
        .unwrap();
    let config = ServerConfig { addr: ([127, 0, 0, 1], 0).into(), ..ServerConfig::default() };

    Server::with_config(config)
        .method_not_allowed(true)
        .serve_with_shutdown(RouterHandle::new(router), async {})
        .await
        .unwrap();
}
