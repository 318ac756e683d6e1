use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_macros::debug_handler;
use extra::json_error_response;
use sampler::{MetricsSnapshot, MetricsUnavailable, Sampler};

use crate::AppState;

pub const PATH: &str = "/metrics";

/// Sampling blocks for the configured window, so it runs on the blocking
/// pool and only delays this request.
#[debug_handler(state = AppState)]
#[tracing::instrument(skip_all, ret)]
pub async fn handler(
    State(sampler): State<Sampler>,
) -> Result<Json<MetricsSnapshot>, MetricsError> {
    let snapshot = tokio::task::spawn_blocking(move || sampler.sample()).await??;
    Ok(Json(snapshot))
}

#[derive(thiserror::Error, Debug)]
pub enum MetricsError {
    #[error("{0}")]
    Unavailable(#[from] MetricsUnavailable),

    #[error("sampling task did not complete :: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IntoResponse for MetricsError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!("{:?}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json_error_response(self)),
        )
            .into_response()
    }
}
