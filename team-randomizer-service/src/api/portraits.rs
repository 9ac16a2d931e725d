//! Portrait endpoint.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::error::{ServiceError, ServiceResult};

use super::AppState;

/// Serve a resized hero portrait as PNG
pub async fn portrait_handler(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> ServiceResult<Response> {
    let service = state.service.clone();
    let lookup_key = key.clone();
    let png = tokio::task::spawn_blocking(move || service.portraits.load(&lookup_key))
        .await
        .map_err(|e| ServiceError::Internal {
            message: format!("Portrait lookup task failed: {}", e),
        })?
        .ok_or(ServiceError::PortraitNotFound { key })?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "image/png")],
        png.to_vec(),
    )
        .into_response())
}
