use axum::Json;
use axum::extract::{Path, State};

use crate::error::ApiError;
use crate::service::{self, ForumSample};
use crate::state::AppState;

pub async fn sample_post(
    State(state): State<AppState>,
    Path(forum): Path<String>,
) -> Result<Json<ForumSample>, ApiError> {
    let sample = service::sample_forum(&state, &forum).await?;
    Ok(Json(sample))
}
