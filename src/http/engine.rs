//! Registration front-end for HTTP handlers.

use std::future::Future;
use std::sync::Arc;

use axum::http::Method;
use axum::response::{IntoResponse, Response};
use futures_util::future::{BoxFuture, FutureExt};

use crate::config::{GeaConfig, RoutingConfig};
use crate::http::context::Context;
use crate::http::server::HttpServer;
use crate::routing::{RouteError, Router, RouterBuilder};

/// Type-erased async handler stored in the route table.
pub type Handler = Arc<dyn Fn(Context) -> BoxFuture<'static, Response> + Send + Sync>;

/// Wrap an async function into a [`Handler`].
pub fn handler<F, Fut, R>(f: F) -> Handler
where
    F: Fn(Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    Arc::new(move |ctx: Context| -> BoxFuture<'static, Response> {
        let fut = f(ctx);
        async move { fut.await.into_response() }.boxed()
    })
}

/// Collects routes, then turns into an [`HttpServer`].
///
/// ```
/// use gea::http::Engine;
///
/// let mut engine = Engine::new();
/// engine
///     .get("/hello/:name", |ctx| async move { format!("hello {}", ctx.param("name")) })
///     .unwrap();
/// let router = engine.build();
/// assert!(router.resolve(&axum::http::Method::GET, "/hello/gea").is_ok());
/// ```
pub struct Engine {
    routes: RouterBuilder<Handler>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self {
            routes: RouterBuilder::new(),
        }
    }

    pub fn with_config(config: &RoutingConfig) -> Self {
        Self {
            routes: RouterBuilder::new().with_duplicate_policy(config.duplicate_policy),
        }
    }

    /// Register `f` for `method` requests matching `pattern`.
    pub fn route<F, Fut, R>(&mut self, method: Method, pattern: &str, f: F) -> Result<&mut Self, RouteError>
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        self.routes.add_route(method, pattern, handler(f))?;
        Ok(self)
    }

    pub fn get<F, Fut, R>(&mut self, pattern: &str, f: F) -> Result<&mut Self, RouteError>
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        self.route(Method::GET, pattern, f)
    }

    pub fn post<F, Fut, R>(&mut self, pattern: &str, f: F) -> Result<&mut Self, RouteError>
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        self.route(Method::POST, pattern, f)
    }

    /// Freeze the registered routes.
    pub fn build(self) -> Router<Handler> {
        self.routes.build()
    }

    pub fn into_server(self, config: GeaConfig) -> HttpServer {
        HttpServer::new(self.build(), config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_registered_handler_runs() {
        let mut engine = Engine::new();
        engine
            .get("/hello/:name", |ctx| async move { format!("hello {}", ctx.param("name")) })
            .unwrap();
        let router = engine.build();

        let dispatch = router.dispatch(&Method::GET, "/hello/gea").unwrap();
        let ctx = Context::new(Method::GET, "/hello/gea").with_params(dispatch.route.params);
        let response = (dispatch.handler)(ctx).await;
        assert_eq!(response.status(), axum::http::StatusCode::OK);
    }

    #[test]
    fn test_conflict_surfaces_from_engine() {
        let mut engine = Engine::new();
        engine.get("/hello/:name", |_| async { "a" }).unwrap();
        let err = engine.get("/hello/:id", |_| async { "b" }).err();
        assert!(matches!(err, Some(RouteError::Conflict { .. })));
    }

    #[test]
    fn test_reject_policy_from_config() {
        let config = RoutingConfig {
            duplicate_policy: crate::routing::DuplicatePolicy::Reject,
        };
        let mut engine = Engine::with_config(&config);
        engine.post("/login", |_| async { "a" }).unwrap();
        assert!(engine.post("/login", |_| async { "b" }).is_err());
    }
}
