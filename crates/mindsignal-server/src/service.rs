//! Operations shared by the JSON API and the HTML pages.
//!
//! Forum calls and model inference block, so each runs on the blocking pool.

use serde::Serialize;
use tracing::info;

use mindsignal_core::classification::Prediction;
use mindsignal_core::embedding::cosine_similarity;
use mindsignal_core::models::post::Post;
use mindsignal_core::targets::{ForumName, Username};
use mindsignal_forum::selection::{self, Selection};
use mindsignal_instruments::get_instrument;
use mindsignal_instruments::scoring::AssessmentResult;

use crate::error::ApiError;
use crate::state::AppState;

pub const DEFAULT_INSTRUMENT: &str = "bdi2";

/// A forum post picked by the selection policy, with its classification.
#[derive(Debug, Clone, Serialize)]
pub struct ForumSample {
    pub forum: String,
    pub via: Selection,
    pub post: Post,
    pub url: String,
    pub prediction: Prediction,
}

/// Instrument estimate for one user's recent posts.
#[derive(Debug, Clone, Serialize)]
pub struct UserAssessment {
    pub user: String,
    pub instrument_id: String,
    pub instrument_name: String,
    pub post_count: usize,
    pub max_total: u32,
    pub assessment: AssessmentResult,
}

async fn run_blocking<T, F>(task: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| ApiError::Internal(format!("blocking task failed: {e}")))?
}

pub async fn classify_text(state: &AppState, text: String) -> Result<Prediction, ApiError> {
    if text.trim().is_empty() {
        return Err(ApiError::BadRequest("text must not be blank".to_string()));
    }
    let classifier = state.classifier.clone();
    run_blocking(move || Ok(classifier.classify(&text)?)).await
}

pub fn normalize_text(state: &AppState, text: &str) -> String {
    state.classifier.normalize(text)
}

pub async fn sample_forum(state: &AppState, raw_forum: &str) -> Result<ForumSample, ApiError> {
    let forum = ForumName::parse(raw_forum)?;
    let source = state.forum.clone();
    let classifier = state.classifier.clone();
    let policy = state.selection;

    run_blocking(move || {
        let mut rng = rand::thread_rng();
        let selected = selection::fetch_post(source.as_ref(), &forum, &policy, &mut rng)?;
        let prediction = classifier.classify(&selected.post.content())?;
        info!(
            forum = %forum,
            post_id = %selected.post.id,
            via = ?selected.via,
            label = ?prediction.label,
            "forum post classified"
        );
        Ok(ForumSample {
            forum: forum.as_str().to_string(),
            via: selected.via,
            url: selected.post.url(),
            post: selected.post,
            prediction,
        })
    })
    .await
}

pub async fn assess_user(
    state: &AppState,
    raw_user: &str,
    instrument_id: Option<&str>,
) -> Result<UserAssessment, ApiError> {
    let user = Username::parse(raw_user)?;
    let instrument_id = instrument_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .unwrap_or(DEFAULT_INSTRUMENT);
    let instrument = get_instrument(instrument_id)
        .ok_or_else(|| ApiError::NotFound(format!("instrument not found: {instrument_id}")))?;

    let source = state.forum.clone();
    let embedder = state.embedder.clone();
    let limit = state.user_post_limit;

    run_blocking(move || {
        let posts = selection::fetch_user_posts(source.as_ref(), &user, limit)?;
        let documents: Vec<String> = posts.iter().map(Post::content).collect();
        let assessment = instrument.score(&documents, embedder.as_ref(), &cosine_similarity)?;
        info!(
            user = %user,
            instrument = instrument.id(),
            posts = documents.len(),
            total = assessment.total,
            band = ?assessment.severity_band,
            "user assessed"
        );
        Ok(UserAssessment {
            user: user.as_str().to_string(),
            instrument_id: instrument.id().to_string(),
            instrument_name: instrument.name().to_string(),
            post_count: documents.len(),
            max_total: instrument.max_total(),
            assessment,
        })
    })
    .await
}
