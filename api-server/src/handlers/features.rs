//! Feature extraction handler (diagnostics)

use axum::{extract::{rejection::JsonRejection, State}, Json};
use phishguard_core::FeatureReport;

use crate::models::UrlRequest;
use crate::{AppError, AppResult, AppState};

pub async fn extract(
    State(state): State<AppState>,
    payload: Result<Json<UrlRequest>, JsonRejection>,
) -> AppResult<Json<FeatureReport>> {
    let Json(req) = payload?;
    let url = req.into_url()?;

    let report = state.service.extract_features(&url).map_err(|e| {
        tracing::error!("Error during feature extraction for URL '{}': {}", url, e);
        AppError::ExtractionFailed(e.to_string())
    })?;

    Ok(Json(report))
}
