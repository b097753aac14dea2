use waymark::{
    BuildError, Controller, Method, Miss, Request, Response, ReverseArg, ReverseError, Router,
    RouteTable, reverse,
};

async fn ok(_: Request) -> Response {
    Response::text("ok")
}

fn app() -> Router {
    let table = RouteTable::new()
        .route("root", "/", Controller::new("Root").get(ok))
        .route("user", "/user/:id", Controller::new("User").get(ok).delete(ok))
        .route("date", "/:year/:month/:day/user/:name", Controller::new("Date").get(ok))
        .route("static", "/static/*path", Controller::new("Static").get(ok).head(ok))
        .route("about", "/about/team/", Controller::new("About").get(ok))
        .route("upload", "/upload", Controller::new("Upload").post(ok).put(ok));
    Router::build(table).unwrap()
}

#[test]
fn reverse_then_dispatch_round_trips() {
    let router = app();
    let cases: [(&str, &[&dyn ReverseArg], &[&str]); 6] = [
        ("root", &[], &[]),
        ("user", &[&77], &["77"]),
        ("user", &[&"alice"], &["alice"]),
        ("date", &[&2013, &10, &26, &"naoina"], &["2013", "10", "26", "naoina"]),
        ("static", &[&"css/site.css"], &["css/site.css"]),
        ("about", &[], &[]),
    ];

    for (name, args, expected) in cases {
        let path = router.reverse(name, args).unwrap();
        let matched = router
            .dispatch("GET", &path)
            .unwrap_or_else(|| panic!("{name}: {path} did not dispatch"));
        assert_eq!(matched.name(), name);
        let values: Vec<&str> = matched.params().iter().map(|(_, v)| v).collect();
        assert_eq!(values, expected, "{name}");
    }
}

#[test]
fn static_route_reverses_to_its_path() {
    let router = app();
    assert_eq!(reverse!(router, "root").unwrap(), "/");
    assert_eq!(reverse!(router, "about").unwrap(), "/about/team/");
    assert_eq!(reverse!(router, "upload").unwrap(), router.route("upload").unwrap().path());
}

#[test]
fn wildcard_captures_separators() {
    let router = app();
    let m = router.dispatch("GET", "/static/a/b/c.png").unwrap();
    assert_eq!(m.name(), "static");
    assert_eq!(m.params().get("path"), Some("a/b/c.png"));

    assert_eq!(reverse!(router, "static", "a/b/c.png").unwrap(), "/static/a/b/c.png");
    assert_eq!(reverse!(router, "static", "/a/b/c.png").unwrap(), "/static/a/b/c.png");
}

#[test]
fn named_parameter_is_a_string() {
    let router = app();
    let m = router.dispatch("GET", "/user/77").unwrap();
    assert_eq!(m.name(), "user");
    assert_eq!(m.params().get("id"), Some("77"));
    assert_eq!(m.params().len(), 1);
}

#[test]
fn named_parameter_does_not_span_segments() {
    let router = app();
    assert!(router.dispatch("GET", "/user/77/edit").is_none());
    assert!(router.dispatch("GET", "/user/").is_none());
}

#[test]
fn argument_count_mismatches_are_errors() {
    let router = app();
    assert_eq!(
        reverse!(router, "user").unwrap_err(),
        ReverseError::TooFewArguments {
            name: "user".into(),
            controller: "User".into(),
            expected: 1,
            got: 0,
        },
    );
    assert_eq!(
        reverse!(router, "user", 77, 100).unwrap_err(),
        ReverseError::TooManyArguments {
            name: "user".into(),
            controller: "User".into(),
            expected: 1,
            got: 2,
        },
    );
    assert!(matches!(
        reverse!(router, "root", 1),
        Err(ReverseError::TooManyArguments { expected: 0, got: 1, .. }),
    ));
}

#[test]
fn unknown_route_name_is_an_error() {
    let router = app();
    let err = reverse!(router, "nonexistent").unwrap_err();
    assert!(matches!(err, ReverseError::NoMatchingRoute { ref name, .. } if name == "nonexistent"));
    assert!(err.to_string().contains("nonexistent"));

    let err = reverse!(router, "nonexistent", 5_i64).unwrap_err();
    assert_eq!(
        err,
        ReverseError::NoMatchingRoute { name: "nonexistent".into(), arg_types: vec!["i64"] },
    );
}

#[test]
fn wrong_method_looks_like_no_route() {
    let router = app();
    assert!(router.dispatch("POST", "/").is_none());
    assert!(router.dispatch("GET", "/no/such/path").is_none());

    assert_eq!(
        router.resolve("POST", "/").unwrap_err(),
        Miss::MethodNotAllowed { route: "root".into(), allowed: vec![Method::Get] },
    );
    assert_eq!(router.resolve("GET", "/no/such/path").unwrap_err(), Miss::NotFound);
}

#[test]
fn multi_segment_parameters_keep_order() {
    let router = app();
    let m = router.dispatch("GET", "/2013/10/26/user/naoina").unwrap();
    assert_eq!(m.name(), "date");
    let params: Vec<(&str, &str)> = m.params().iter().collect();
    assert_eq!(
        params,
        [("year", "2013"), ("month", "10"), ("day", "26"), ("name", "naoina")],
    );
    assert_eq!(
        reverse!(router, "date", 2013, 10, 26, "naoina").unwrap(),
        "/2013/10/26/user/naoina",
    );
}

#[test]
fn param_names_keep_token_text() {
    let router = app();
    assert_eq!(
        router.route("date").unwrap().param_names(),
        [":year", ":month", ":day", ":name"],
    );
    assert_eq!(router.route("static").unwrap().param_names(), ["*path"]);
    assert!(router.route("root").unwrap().param_names().is_empty());
}

#[test]
fn reverse_values_are_not_validated() {
    let router = app();
    assert_eq!(reverse!(router, "user", "not-a-number").unwrap(), "/user/not-a-number");
    assert_eq!(reverse!(router, "user", 1.5).unwrap(), "/user/1.5");
}

#[test]
fn values_that_do_not_fit_their_token_do_not_round_trip() {
    let router = app();

    let path = reverse!(router, "user", "").unwrap();
    assert_eq!(path, "/user/");
    assert!(router.dispatch("GET", &path).is_none());

    let path = reverse!(router, "user", "a/b").unwrap();
    assert_eq!(path, "/user/a/b");
    assert!(router.dispatch("GET", &path).is_none());

    // `..` is resolved by normalization and climbs out of the route.
    let path = reverse!(router, "user", "..").unwrap();
    assert_eq!(path, "/");
    assert_eq!(router.dispatch("GET", &path).unwrap().name(), "root");

    let path = reverse!(router, "static", "").unwrap();
    assert_eq!(path, "/static/");
    assert!(router.dispatch("GET", &path).is_none());
}

#[test]
fn method_dispatch_is_per_route() {
    let router = app();
    assert_eq!(router.dispatch("delete", "/user/3").unwrap().method(), Method::Delete);
    assert_eq!(router.dispatch("HEAD", "/static/x").unwrap().method(), Method::Head);
    assert!(router.dispatch("PATCH", "/upload").is_none());
    assert!(router.dispatch("put", "/upload").is_some());
}

#[test]
fn duplicate_route_names_are_rejected() {
    let table = RouteTable::new()
        .route("home", "/", Controller::new("A").get(ok))
        .route("home", "/home", Controller::new("B").get(ok));
    assert!(matches!(Router::build(table), Err(BuildError::DuplicateName { .. })));
}

#[test]
fn router_is_shareable_across_threads() {
    let router = std::sync::Arc::new(app());
    let workers: Vec<_> = (0..4)
        .map(|i| {
            let router = std::sync::Arc::clone(&router);
            std::thread::spawn(move || {
                let path = reverse!(router, "user", i).unwrap();
                router.dispatch("GET", &path).unwrap().params().get("id").map(str::to_owned)
            })
        })
        .collect();

    for (i, w) in workers.into_iter().enumerate() {
        assert_eq!(w.join().unwrap(), Some(i.to_string()));
    }
}
