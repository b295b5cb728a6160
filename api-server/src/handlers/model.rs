//! Model status handler

use axum::{extract::State, Json};
use phishguard_core::ModelStatus;

use crate::AppState;

pub async fn status(State(state): State<AppState>) -> Json<ModelStatus> {
    Json(state.service.status())
}
