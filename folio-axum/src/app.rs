use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tokio::net::{TcpListener, ToSocketAddrs};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::content;
use crate::documents;
use crate::state::ApiState;

/// Wire-level headroom on top of the store's payload cap, so multipart
/// framing never trips the HTTP body limit before the store's own cap
/// decides the outcome.
const BODY_LIMIT_SLACK_BYTES: usize = 64 * 1024;

/// Knobs for the HTTP surface that are not the store's business.
#[derive(Debug, Clone, Default)]
pub struct ApiConfig {
    /// Exact origin allowed by CORS. `None` allows any origin.
    pub cors_origin: Option<String>,
}

impl ApiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cors_origin(mut self, origin: impl Into<String>) -> Self {
        self.cors_origin = Some(origin.into());
        self
    }
}

/// The assembled router plus a way to serve it.
///
/// The router is public so tests can drive it with `tower::ServiceExt`
/// without binding a socket.
pub struct ApiApp {
    pub router: Router,
}

impl ApiApp {
    /// Build the full middleware stack around the document routes.
    ///
    /// Outermost to innermost: request-id stamping, tracing, request-id
    /// propagation onto responses, CORS, body limit, routes. Error
    /// responses pass through the same stack, so they carry
    /// `x-request-id` too.
    pub fn new(state: ApiState, config: ApiConfig) -> Self {
        let body_limit =
            state.store.config().max_document_bytes as usize + BODY_LIMIT_SLACK_BYTES;
        let router = Router::new()
            .route("/documents", get(documents::list).post(documents::upload))
            .route(
                "/documents/{id}",
                get(documents::metadata).delete(documents::remove),
            )
            .route("/content/{id}", get(content::read))
            .route("/health", get(|| async { "ok" }))
            .with_state(state)
            .layer(DefaultBodyLimit::max(body_limit))
            .layer(cors_layer(config.cors_origin.as_deref()))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));
        Self { router }
    }

    pub async fn listen<A>(self, addr: A) -> anyhow::Result<()>
    where
        A: ToSocketAddrs,
    {
        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await?;
        Ok(())
    }
}

/// Browser viewers read `Content-Range` and `Accept-Ranges` off the
/// response, and those are invisible cross-origin unless exposed.
fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::RANGE])
        .expose_headers([header::CONTENT_RANGE, header::ACCEPT_RANGES]);
    match origin.and_then(|origin| origin.parse::<HeaderValue>().ok()) {
        Some(origin) => cors.allow_origin(origin),
        None => cors.allow_origin(Any),
    }
}
