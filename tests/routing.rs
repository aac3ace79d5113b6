//! Route table behavior through the public API.

use std::sync::Arc;

use axum::http::Method;
use gea::routing::{tokenize, DuplicatePolicy, NotFound, RouteError, Router, RouterBuilder};

fn get_router(patterns: &[&'static str]) -> Router<&'static str> {
    let mut builder = RouterBuilder::new();
    for pattern in patterns {
        builder.add_route(Method::GET, pattern, *pattern).unwrap();
    }
    builder.build()
}

#[test]
fn test_exact_match_has_no_params() {
    let router = get_router(&["/hello"]);
    let route = router.resolve(&Method::GET, "/hello").unwrap();
    assert_eq!(route.pattern, "/hello");
    assert!(route.params.is_empty());
}

#[test]
fn test_param_capture() {
    let router = get_router(&["/hello/:name"]);
    let route = router.resolve(&Method::GET, "/hello/geektutu").unwrap();
    assert_eq!(route.pattern, "/hello/:name");
    assert_eq!(route.params.len(), 1);
    assert_eq!(route.params["name"], "geektutu");
}

#[test]
fn test_catch_all_capture() {
    let router = get_router(&["/assets/*filepath"]);
    let route = router.resolve(&Method::GET, "/assets/css/a.css").unwrap();
    assert_eq!(route.pattern, "/assets/*filepath");
    assert_eq!(route.params["filepath"], "css/a.css");
}

#[test]
fn test_unmatched_paths_are_not_found() {
    let router = get_router(&["/hello/:name"]);
    assert_eq!(router.resolve(&Method::GET, "/nothing").unwrap_err(), NotFound);
    assert_eq!(
        router.resolve(&Method::GET, "/hello/geektutu/1").unwrap_err(),
        NotFound
    );

    let router = get_router(&["/hello/:name", "/hello/:name/1"]);
    let route = router.resolve(&Method::GET, "/hello/geektutu/1").unwrap();
    assert_eq!(route.pattern, "/hello/:name/1");
    assert_eq!(route.params["name"], "geektutu");
}

#[test]
fn test_static_sibling_beats_wildcard() {
    for order in [["/hello/:name", "/hello/b"], ["/hello/b", "/hello/:name"]] {
        let router = get_router(&order);
        let route = router.resolve(&Method::GET, "/hello/b").unwrap();
        assert_eq!(route.pattern, "/hello/b", "registration order {:?}", order);
        assert!(route.params.is_empty());

        let route = router.resolve(&Method::GET, "/hello/c").unwrap();
        assert_eq!(route.pattern, "/hello/:name");
    }
}

#[test]
fn test_conflicting_params_rejected() {
    let mut builder = RouterBuilder::new();
    builder.add_route(Method::GET, "/hello/:name", ()).unwrap();
    let err = builder.add_route(Method::GET, "/hello/:id", ()).unwrap_err();
    assert!(matches!(err, RouteError::Conflict { .. }));
    assert_eq!(
        err.to_string(),
        ":id in new path /hello/:id conflicts with existing wildcard :name"
    );

    // The earlier registration is untouched.
    let router = builder.build();
    assert_eq!(
        router.resolve(&Method::GET, "/hello/x").unwrap().pattern,
        "/hello/:name"
    );
}

#[test]
fn test_same_position_under_another_method_does_not_conflict() {
    let mut builder = RouterBuilder::new();
    builder.add_route(Method::GET, "/hello/:name", ()).unwrap();
    builder.add_route(Method::POST, "/hello/:id", ()).unwrap();
}

#[test]
fn test_tokenize_is_deterministic() {
    for pattern in ["/", "/a/b", "//a//:b/*c/d", "relative/path"] {
        assert_eq!(tokenize(pattern), tokenize(pattern));
    }
}

#[test]
fn test_methods_are_isolated() {
    let router = get_router(&["/x"]);
    assert!(router.resolve(&Method::GET, "/x").is_ok());
    assert_eq!(router.resolve(&Method::POST, "/x").unwrap_err(), NotFound);
    assert!(router.dispatch(&Method::POST, "/x").is_err());
}

#[test]
fn test_reject_policy_surfaces_duplicates() {
    let mut builder = RouterBuilder::new().with_duplicate_policy(DuplicatePolicy::Reject);
    builder.add_route(Method::GET, "/hello/:name", 1).unwrap();
    assert!(matches!(
        builder.add_route(Method::GET, "/hello/:name", 2),
        Err(RouteError::Duplicate { .. })
    ));
    let router = builder.build();
    assert_eq!(*router.dispatch(&Method::GET, "/hello/x").unwrap().handler, 1);
}

#[test]
fn test_routes_lists_registrations() {
    let router = get_router(&["/", "/hello", "/hello/:name", "/assets/*filepath"]);
    assert_eq!(
        router.routes(&Method::GET),
        vec!["/", "/hello", "/hello/:name", "/assets/*filepath"]
    );
    assert!(router.routes(&Method::DELETE).is_empty());
}

#[test]
fn test_frozen_router_serves_concurrent_readers() {
    let router = Arc::new(get_router(&["/hello/:name", "/assets/*filepath"]));

    std::thread::scope(|scope| {
        for worker in 0..8 {
            let router = Arc::clone(&router);
            scope.spawn(move || {
                for i in 0..200 {
                    let path = format!("/hello/user-{}-{}", worker, i);
                    let dispatch = router.dispatch(&Method::GET, &path).unwrap();
                    assert_eq!(*dispatch.handler, "/hello/:name");
                    assert_eq!(dispatch.route.params["name"], format!("user-{}-{}", worker, i));
                }
            });
        }
    });
}
