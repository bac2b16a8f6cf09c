#![allow(dead_code)]

use std::sync::Arc;

use mindsignal_core::classification::{ClassLabel, Prediction, TextClassifier};
use mindsignal_core::embedding::{Embedder, Embedding};
use mindsignal_core::error::{ClassifierError, EmbeddingError};
use mindsignal_core::models::post::Post;
use mindsignal_core::targets::{ForumName, Username};
use mindsignal_forum::error::ForumError;
use mindsignal_forum::selection::SelectionPolicy;
use mindsignal_forum::source::ForumSource;
use mindsignal_server::render;
use mindsignal_server::state::AppState;

pub fn post(id: &str, title: &str, body: &str) -> Post {
    Post {
        id: id.to_string(),
        title: title.to_string(),
        body: body.to_string(),
        author: "poster".to_string(),
        forum: "test".to_string(),
        permalink: format!("/r/test/comments/{id}/"),
        created_at: None,
    }
}

/// Flags text containing "hopeless" as suicidal.
pub struct KeywordClassifier;

impl TextClassifier for KeywordClassifier {
    fn normalize(&self, text: &str) -> String {
        text.to_lowercase()
    }

    fn classify(&self, text: &str) -> Result<Prediction, ClassifierError> {
        if text.contains("broken model") {
            return Err(ClassifierError::Artifact("model file corrupt".to_string()));
        }
        let label = if text.to_lowercase().contains("hopeless") {
            ClassLabel::Suicidal
        } else {
            ClassLabel::NonSuicidal
        };
        Ok(Prediction {
            label,
            confidence: Some(0.875),
        })
    }
}

/// Maps every text to the same unit vector, so every option ties and every
/// item grades 0.
pub struct ConstantEmbedder;

impl Embedder for ConstantEmbedder {
    fn embed(&self, _text: &str) -> Result<Embedding, EmbeddingError> {
        Ok(Embedding::new(vec![1.0, 0.0]))
    }
}

pub struct BrokenEmbedder;

impl Embedder for BrokenEmbedder {
    fn embed(&self, _text: &str) -> Result<Embedding, EmbeddingError> {
        Err(EmbeddingError::Inference("device lost".to_string()))
    }
}

/// Forum with a fixed hot listing and per-user histories.
#[derive(Default)]
pub struct FakeForum {
    pub random: Option<Post>,
    pub hot: Vec<Post>,
    pub users: Vec<(String, Vec<Post>)>,
    pub unreachable: bool,
}

impl ForumSource for FakeForum {
    fn random_post(&self, _forum: &ForumName) -> Result<Option<Post>, ForumError> {
        if self.unreachable {
            return Err(ForumError::Http("connection refused".to_string()));
        }
        Ok(self.random.clone())
    }

    fn hot_posts(&self, forum: &ForumName, limit: usize) -> Result<Vec<Post>, ForumError> {
        if self.unreachable {
            return Err(ForumError::Http("connection refused".to_string()));
        }
        if forum.as_str() == "missing" {
            return Err(ForumError::NotFound(forum.to_string()));
        }
        Ok(self.hot.iter().take(limit).cloned().collect())
    }

    fn user_posts(&self, user: &Username, limit: usize) -> Result<Vec<Post>, ForumError> {
        if self.unreachable {
            return Err(ForumError::Http("connection refused".to_string()));
        }
        Ok(self
            .users
            .iter()
            .find(|(name, _)| name == user.as_str())
            .map(|(_, posts)| posts.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}

pub fn state_with(forum: FakeForum, embedder: Arc<dyn Embedder>) -> AppState {
    AppState {
        forum: Arc::new(forum),
        classifier: Arc::new(KeywordClassifier),
        embedder,
        templates: Arc::new(render::build_templates().unwrap()),
        selection: SelectionPolicy::default(),
        user_post_limit: 25,
    }
}

pub fn default_state() -> AppState {
    let forum = FakeForum {
        random: Some(post("r1", "Feeling hopeless", "nothing helps")),
        hot: vec![post("h1", "Weekend plans", "hiking")],
        users: vec![(
            "someone".to_string(),
            vec![post("u1", "Long day", "tired"), post("u2", "Cat photo", "")],
        )],
        unreachable: false,
    };
    state_with(forum, Arc::new(ConstantEmbedder))
}
