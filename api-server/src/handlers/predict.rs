//! Prediction handler

use axum::{extract::{rejection::JsonRejection, State}, Json};
use phishguard_core::PredictionResult;

use crate::models::UrlRequest;
use crate::{AppError, AppResult, AppState};

/// Classify a URL
///
/// A missing classifier is not an HTTP error: the result carries
/// `error: "Model not trained"` with a 200.
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<UrlRequest>, JsonRejection>,
) -> AppResult<Json<PredictionResult>> {
    let Json(req) = payload?;
    let url = req.into_url()?;

    let result = state.service.try_predict(&url).map_err(|e| {
        tracing::error!("Error during prediction for URL '{}': {}", url, e);
        AppError::PredictionFailed(e.to_string())
    })?;

    tracing::debug!(
        "Prediction for {}: phishing={} confidence={:.3}",
        url, result.is_phishing, result.confidence
    );

    Ok(Json(result))
}
