use std::sync::Arc;

use tera::Tera;

use mindsignal_core::classification::TextClassifier;
use mindsignal_core::embedding::Embedder;
use mindsignal_forum::selection::SelectionPolicy;
use mindsignal_forum::source::ForumSource;

/// Shared application state, injected into all route handlers via Axum state.
///
/// Collaborators are trait objects so tests can swap in fakes. Nothing here
/// carries per-user data; every request names its own inputs.
#[derive(Clone)]
pub struct AppState {
    pub forum: Arc<dyn ForumSource>,
    pub classifier: Arc<dyn TextClassifier>,
    pub embedder: Arc<dyn Embedder>,
    pub templates: Arc<Tera>,
    pub selection: SelectionPolicy,
    pub user_post_limit: usize,
}
