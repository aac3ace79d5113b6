//! Demo route table served by the `gea` binary.

use axum::response::{Html, Json};
use serde_json::json;

use crate::http::Engine;
use crate::routing::RouteError;

/// Register the demo routes on `engine`.
pub fn register(engine: &mut Engine) -> Result<(), RouteError> {
    engine
        .get("/", |_ctx| async { Html("<h1>Hello World!</h1>") })?
        .get("/hello", |ctx| async move {
            format!("hello {}, you're at {}\n", ctx.query("name"), ctx.path)
        })?
        .get("/hello/:name", |ctx| async move {
            format!("hello {}, you're at {}\n", ctx.param("name"), ctx.path)
        })?
        .get("/assets/*filepath", |ctx| async move {
            Json(json!({ "filepath": ctx.param("filepath") }))
        })?
        .post("/login", |ctx| async move {
            Json(json!({
                "username": ctx.post_form("username"),
                "password": ctx.post_form("password"),
            }))
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Method;

    #[test]
    fn test_demo_routes_register_cleanly() {
        let mut engine = Engine::new();
        register(&mut engine).unwrap();
        let router = engine.build();

        assert_eq!(
            router.routes(&Method::GET),
            vec!["/", "/hello", "/hello/:name", "/assets/*filepath"]
        );
        assert_eq!(router.routes(&Method::POST), vec!["/login"]);
    }
}
