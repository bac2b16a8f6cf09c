use mindsignal_core::models::post::Post;
use mindsignal_core::targets::{ForumName, Username};

use crate::error::ForumError;

/// Read-only access to a forum.
///
/// Calls block the current thread. Implementations are shared between
/// request handlers and must be safe for concurrent use.
pub trait ForumSource: Send + Sync {
    /// One randomly chosen post, or `None` when the forum cannot supply one
    /// (many communities disable random selection).
    fn random_post(&self, forum: &ForumName) -> Result<Option<Post>, ForumError>;

    /// Up to `limit` posts from the forum's "hot" listing.
    fn hot_posts(&self, forum: &ForumName, limit: usize) -> Result<Vec<Post>, ForumError>;

    /// Up to `limit` of the user's submissions, newest first.
    fn user_posts(&self, user: &Username, limit: usize) -> Result<Vec<Post>, ForumError>;
}
