//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, body limit, CORS)
//! - Build the host source from config and share it with handlers
//! - Serve until the shutdown signal fires

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, Request},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{CorsConfig, HostsConfig, UrlcountsConfig};
use crate::http::handlers::{get_status, urlcounts};
use crate::http::openapi::get_openapi;
use crate::http::request::{request_id, MakeRequestUuidV4};
use crate::matching::{HostSource, UrlCounter};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub counter: Arc<UrlCounter>,
}

/// HTTP server for the urlcounts service.
pub struct HttpServer {
    router: Router,
    config: UrlcountsConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: UrlcountsConfig) -> Self {
        let source = host_source(&config.hosts);
        Self::with_source(config, source)
    }

    /// Create a server that reads hosts from `source` instead of `config.hosts`.
    pub fn with_source(config: UrlcountsConfig, source: HostSource) -> Self {
        let state = AppState {
            counter: Arc::new(UrlCounter::new(source)),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &UrlcountsConfig, state: AppState) -> Router {
        let router = Router::new()
            .route("/urlcounts", post(urlcounts))
            .route("/status", get(get_status))
            .route("/openapi.json", get(get_openapi))
            .with_state(state)
            // `security.max_body_size` is the only limit; axum's own 2 MiB default is off.
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)));

        let router = if config.cors.enabled {
            router.layer(cors_layer(&config.cors))
        } else {
            router
        };

        router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    request_id = %request_id(request.headers()),
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
    }

    /// The fully layered router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            hosts_path = %self.config.hosts.path,
            hosts_cache = self.config.hosts.cache,
            "HTTP server starting"
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Host source described by the `[hosts]` section.
pub fn host_source(config: &HostsConfig) -> HostSource {
    if config.cache {
        HostSource::cached(&config.path)
    } else {
        HostSource::file(&config.path)
    }
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    if config.allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}
