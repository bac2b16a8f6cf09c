use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use crate::error::ApiError;
use crate::service::{self, UserAssessment};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AssessmentQuery {
    pub instrument: Option<String>,
}

pub async fn assessment(
    State(state): State<AppState>,
    Path(user): Path<String>,
    Query(query): Query<AssessmentQuery>,
) -> Result<Json<UserAssessment>, ApiError> {
    let result = service::assess_user(&state, &user, query.instrument.as_deref()).await?;
    Ok(Json(result))
}
