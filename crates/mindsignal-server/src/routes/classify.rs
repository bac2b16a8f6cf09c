use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use mindsignal_core::classification::Prediction;

use crate::error::ApiError;
use crate::service;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct NormalizeResponse {
    pub normalized: String,
}

pub async fn classify(
    State(state): State<AppState>,
    Json(body): Json<TextRequest>,
) -> Result<Json<Prediction>, ApiError> {
    let prediction = service::classify_text(&state, body.text).await?;
    Ok(Json(prediction))
}

/// The exact normalization applied before vectorizing. Offline training has
/// to produce its vocabulary from this output.
pub async fn normalize(
    State(state): State<AppState>,
    Json(body): Json<TextRequest>,
) -> Json<NormalizeResponse> {
    Json(NormalizeResponse {
        normalized: service::normalize_text(&state, &body.text),
    })
}
