//! Choosing a post to classify.
//!
//! Selection is an explicit two-step policy:
//!
//! 1. Ask the forum for a random post.
//! 2. If that fails or yields nothing, take the forum's `hot_limit` hot
//!    posts and pick one uniformly at random.
//!
//! If step 2 comes back empty the request fails with
//! [`ForumError::NoContent`]. Errors from step 2 propagate unchanged.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use mindsignal_core::models::post::Post;
use mindsignal_core::targets::{ForumName, Username};

use crate::error::ForumError;
use crate::source::ForumSource;

pub const DEFAULT_HOT_LIMIT: usize = 20;
pub const DEFAULT_USER_POST_LIMIT: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionPolicy {
    /// Size of the hot-post pool used by the fallback step.
    pub hot_limit: usize,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            hot_limit: DEFAULT_HOT_LIMIT,
        }
    }
}

/// Which step produced the post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    Random,
    HotFallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedPost {
    pub post: Post,
    pub via: Selection,
}

/// Pick one post from `forum` following [`SelectionPolicy`].
pub fn fetch_post<S, R>(
    source: &S,
    forum: &ForumName,
    policy: &SelectionPolicy,
    rng: &mut R,
) -> Result<SelectedPost, ForumError>
where
    S: ForumSource + ?Sized,
    R: Rng + ?Sized,
{
    match source.random_post(forum) {
        Ok(Some(post)) => {
            info!(forum = %forum, post_id = %post.id, "random post selected");
            return Ok(SelectedPost {
                post,
                via: Selection::Random,
            });
        }
        Ok(None) => {
            warn!(forum = %forum, "random selection returned nothing, falling back to hot posts");
        }
        Err(e) => {
            warn!(forum = %forum, error = %e, "random selection failed, falling back to hot posts");
        }
    }

    let pool = source.hot_posts(forum, policy.hot_limit)?;
    let post = pool
        .choose(rng)
        .cloned()
        .ok_or_else(|| ForumError::NoContent(forum.to_string()))?;

    info!(forum = %forum, post_id = %post.id, pool = pool.len(), "hot post selected");
    Ok(SelectedPost {
        post,
        via: Selection::HotFallback,
    })
}

/// The user's newest `limit` submissions. An empty history is an error.
pub fn fetch_user_posts<S>(source: &S, user: &Username, limit: usize) -> Result<Vec<Post>, ForumError>
where
    S: ForumSource + ?Sized,
{
    let posts = source.user_posts(user, limit)?;
    if posts.is_empty() {
        return Err(ForumError::NoContent(user.to_string()));
    }
    info!(user = %user, count = posts.len(), "user posts fetched");
    Ok(posts)
}
