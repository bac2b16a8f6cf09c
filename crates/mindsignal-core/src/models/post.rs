use serde::{Deserialize, Serialize};

/// Base URL used to turn a post's relative permalink into a link.
pub const FORUM_WEB_BASE: &str = "https://www.reddit.com";

/// A single forum submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    /// Self-text of the submission; empty for link posts.
    pub body: String,
    pub author: String,
    pub forum: String,
    /// Site-relative path, e.g. `/r/AskReddit/comments/abc123/title/`.
    pub permalink: String,
    pub created_at: Option<jiff::Timestamp>,
}

impl Post {
    /// Title and body joined by a space. This is the text that gets
    /// classified or embedded.
    pub fn content(&self) -> String {
        format!("{} {}", self.title, self.body)
    }

    pub fn url(&self) -> String {
        format!("{FORUM_WEB_BASE}{}", self.permalink)
    }
}
