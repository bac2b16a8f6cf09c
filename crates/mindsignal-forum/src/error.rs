use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForumError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("no posts available for {0}")]
    NoContent(String),

    #[error("forum API authentication failed: {0}")]
    Auth(String),

    #[error("forum API request failed: {0}")]
    Http(String),

    #[error("forum API response could not be decoded: {0}")]
    Decode(String),
}
