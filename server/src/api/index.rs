use std::convert::Infallible;

use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;
use extra::json_error_response;
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::{AppState, Assets};

pub const PATH: &str = "/";

/// Serves the index file byte for byte, or 404 when the path is missing or
/// not a regular file. Content type, `HEAD`, conditional
/// and range requests are handled by [`ServeFile`].
#[debug_handler(state = AppState)]
#[tracing::instrument(skip_all)]
pub async fn handler(
    State(assets): State<Assets>,
    request: Request,
) -> Result<Response, IndexError> {
    let path = assets.index_path();
    let not_found = || IndexError::AssetNotFound(assets.index().display().to_string());

    // a directory at the index path would pass `ServeFile`'s open and
    // only fail once the body is streamed
    let is_file = tokio::fs::metadata(&path)
        .await
        .map(|metadata| metadata.is_file())
        .unwrap_or(false);
    if !is_file {
        return Err(not_found());
    }

    let response = ServeFile::new(&path)
        .oneshot(request)
        .await
        .unwrap_or_else(|e: Infallible| match e {});

    if response.status() == StatusCode::NOT_FOUND {
        return Err(not_found());
    }

    Ok(response.into_response())
}

#[derive(thiserror::Error, Debug)]
pub enum IndexError {
    #[error("asset not found :: {0}")]
    AssetNotFound(String),
}

impl IntoResponse for IndexError {
    fn into_response(self) -> axum::response::Response {
        tracing::info!("{:?}", self);
        (StatusCode::NOT_FOUND, Json(json_error_response(self))).into_response()
    }
}
