//! Wire types for Reddit listing payloads.

use serde::Deserialize;

use mindsignal_core::models::post::Post;

/// Kind tag of a submission ("link") object.
pub const SUBMISSION_KIND: &str = "t3";

#[derive(Debug, Clone, Deserialize)]
pub struct Listing {
    pub data: ListingData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<Thing>,
    #[serde(default)]
    pub after: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thing {
    pub kind: String,
    pub data: SubmissionData,
}

/// Submission fields we read. Every field has a default so comment objects
/// in mixed listings still decode; they are filtered out by kind.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SubmissionData {
    pub id: String,
    pub title: String,
    pub selftext: String,
    pub author: String,
    pub subreddit: String,
    pub permalink: String,
    pub created_utc: Option<f64>,
}

impl SubmissionData {
    pub fn into_post(self) -> Post {
        let created_at = self
            .created_utc
            .and_then(|secs| jiff::Timestamp::from_second(secs as i64).ok());
        Post {
            id: self.id,
            title: self.title,
            body: self.selftext,
            author: self.author,
            forum: self.subreddit,
            permalink: self.permalink,
            created_at,
        }
    }
}

/// The random endpoint answers with either a single listing or a
/// `[post listing, comment listing]` pair.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RandomResponse {
    Pair(Vec<Listing>),
    Single(Listing),
}

impl RandomResponse {
    pub fn into_first_post(self) -> Option<Post> {
        let listing = match self {
            RandomResponse::Pair(listings) => listings.into_iter().next()?,
            RandomResponse::Single(listing) => listing,
        };
        into_posts(listing).into_iter().next()
    }
}

/// Submissions in listing order.
pub fn into_posts(listing: Listing) -> Vec<Post> {
    listing
        .data
        .children
        .into_iter()
        .filter(|thing| thing.kind == SUBMISSION_KIND)
        .map(|thing| thing.data.into_post())
        .collect()
}
