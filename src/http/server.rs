//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router whose fallback dispatches through the route table
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener and stop on shutdown
//! - Turn `NotFound` into a plain-text 404

use std::io;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GeaConfig;
use crate::http::context::{has_form_body, Context};
use crate::http::engine::Handler;
use crate::http::request::{request_id, MakeRequestUuidV4};
use crate::lifecycle::Shutdown;
use crate::routing::Router;

/// Upper bound on a buffered url-encoded form body.
const MAX_FORM_BYTES: usize = 2 * 1024 * 1024;

/// Application state injected into the dispatch handler.
#[derive(Clone)]
struct AppState {
    routes: Arc<Router<Handler>>,
}

/// HTTP front for a frozen route table.
pub struct HttpServer {
    app: axum::Router,
    config: GeaConfig,
}

impl HttpServer {
    pub fn new(routes: Router<Handler>, config: GeaConfig) -> Self {
        let state = AppState {
            routes: Arc::new(routes),
        };
        let app = Self::build_app(&config, state);
        Self { app, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_app(config: &GeaConfig, state: AppState) -> axum::Router {
        axum::Router::new()
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// The service, for driving requests without a socket.
    pub fn app(&self) -> axum::Router {
        self.app.clone()
    }

    pub fn config(&self) -> &GeaConfig {
        &self.config
    }

    /// Serve on `listener` until `shutdown` fires, then drain.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown.signalled())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Looks up the route and runs its handler.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let (parts, body) = request.into_parts();
    let path = parts.uri.path();
    let request_id = request_id(&parts.headers).unwrap_or("unknown");

    let dispatch = match state.routes.dispatch(&parts.method, path) {
        Ok(dispatch) => dispatch,
        Err(_) => {
            tracing::debug!(
                request_id = %request_id,
                method = %parts.method,
                path = %path,
                "No route matched"
            );
            return (StatusCode::NOT_FOUND, format!("404 NOT FOUND: {}\n", path)).into_response();
        }
    };

    tracing::debug!(
        request_id = %request_id,
        method = %parts.method,
        path = %path,
        pattern = %dispatch.route.pattern,
        "Dispatching request"
    );

    let form_body = if has_form_body(&parts) {
        match axum::body::to_bytes(body, MAX_FORM_BYTES).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(request_id = %request_id, error = %e, "Failed to read form body");
                return (StatusCode::PAYLOAD_TOO_LARGE, "Form body too large").into_response();
            }
        }
    } else {
        Default::default()
    };

    let handler = Arc::clone(dispatch.handler);
    let ctx = Context::from_request(&parts, dispatch.route, &form_body);
    handler(ctx).await
}
