use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::time::Instant;

use crate::http::request::{request_id, UrlcountsRequest};
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::matching::{HostSource, MatchResult};
use crate::observability::metrics;

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: String,
    pub status: String,
    pub hosts_path: Option<String>,
    pub hosts_cached: bool,
}

/// `POST /urlcounts`: match a URL batch against the host list.
pub async fn urlcounts(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&headers).to_string();

    let response = match count_urls(&state, &request_id, &body).await {
        Ok(result) => {
            tracing::info!(
                request_id = %request_id,
                matched = result.matched_count,
                unmatched = result.unmatched_count,
                hosts_matched = result.matched_per_host.len(),
                "URL batch processed"
            );
            metrics::record_result(&result);
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(e) => {
            let status = e.status_code();
            if status.is_server_error() {
                tracing::error!(request_id = %request_id, error = %e, "URL batch failed");
            } else {
                tracing::warn!(request_id = %request_id, status = %status, error = %e, "Rejected URL batch");
            }
            e.into_response()
        }
    };

    metrics::record_request(response.status().as_u16(), start_time);
    response
}

async fn count_urls(state: &AppState, request_id: &str, body: &[u8]) -> Result<MatchResult, ApiError> {
    let request = UrlcountsRequest::from_body(body)?;

    tracing::debug!(
        request_id = %request_id,
        submitted = request.urls.len(),
        "Processing URL batch"
    );

    // The host list read is blocking file IO.
    let counter = state.counter.clone();
    let result = tokio::task::spawn_blocking(move || counter.count(request.urls.as_slice()))
        .await
        .map_err(|e| ApiError::Worker(e.to_string()))??;

    Ok(result)
}

/// `GET /status`: liveness and host list settings.
pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    let source = state.counter.source();
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "operational".to_string(),
        hosts_path: source.path().map(|p| p.display().to_string()),
        hosts_cached: matches!(source, HostSource::Cached { .. }),
    })
}
