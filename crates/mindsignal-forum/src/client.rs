//! Blocking Reddit API client.
//!
//! # Authentication
//!
//! Uses application-only OAuth (`client_credentials` grant): the client ID
//! and secret are sent as HTTP Basic credentials to the token endpoint and
//! the returned bearer token is attached to every API call. Tokens are
//! cached until shortly before they expire. An API call answered with 401
//! drops the cached token and is retried once with a fresh one.
//!
//! Reddit rejects requests without a descriptive `User-Agent`, so the
//! configured one is sent on every call, token requests included.
//!
//! # Endpoints
//!
//! ```text
//! POST https://www.reddit.com/api/v1/access_token
//! GET  https://oauth.reddit.com/r/{forum}/random
//! GET  https://oauth.reddit.com/r/{forum}/hot?limit={n}
//! GET  https://oauth.reddit.com/user/{name}/submitted?sort=new&limit={n}
//! ```
//!
//! All listing calls pass `raw_json=1` so text arrives without HTML entity
//! escaping.

use std::fmt;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use ureq::config::RedirectAuthHeaders;

use mindsignal_core::models::post::Post;
use mindsignal_core::targets::{ForumName, Username};

use crate::error::ForumError;
use crate::listing::{self, Listing, RandomResponse};
use crate::source::ForumSource;

pub const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
pub const API_BASE: &str = "https://oauth.reddit.com";

/// Largest page size the listing endpoints accept.
pub const MAX_LIMIT: usize = 100;

/// Refresh this long before the advertised expiry.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

// ── Types ────────────────────────────────────────────────────────────────────

/// Application credentials for the forum API.
#[derive(Clone)]
pub struct ForumCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub user_agent: String,
}

impl fmt::Debug for ForumCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForumCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"****")
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

struct CachedToken {
    value: String,
    refresh_at: Instant,
}

pub struct RedditClient {
    agent: ureq::Agent,
    credentials: ForumCredentials,
    token_url: String,
    api_base: String,
    token: Mutex<Option<CachedToken>>,
}

// ── Construction ─────────────────────────────────────────────────────────────

impl RedditClient {
    pub fn new(credentials: ForumCredentials, timeout: Duration) -> Self {
        Self::with_endpoints(credentials, timeout, TOKEN_URL, API_BASE)
    }

    /// Client against a different token endpoint and API host, such as a
    /// local stand-in server.
    pub fn with_endpoints(
        credentials: ForumCredentials,
        timeout: Duration,
        token_url: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        // The random endpoint redirects to the chosen post on the same host;
        // the bearer token has to survive that hop.
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .redirect_auth_headers(RedirectAuthHeaders::SameHost)
            .build()
            .into();
        Self {
            agent,
            credentials,
            token_url: token_url.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token: Mutex::new(None),
        }
    }

    // ── Authentication ───────────────────────────────────────────────────────

    /// Cached bearer token, fetching a new one when missing or near expiry.
    ///
    /// The cache lock is held across the token request, so concurrent
    /// callers wait for a single refresh instead of each starting one.
    fn bearer_token(&self) -> Result<String, ForumError> {
        let mut cached = self
            .token
            .lock()
            .map_err(|e| ForumError::Auth(format!("token cache poisoned: {e}")))?;

        if let Some(token) = cached.as_ref()
            && Instant::now() < token.refresh_at
        {
            return Ok(token.value.clone());
        }

        let basic = BASE64.encode(format!(
            "{}:{}",
            self.credentials.client_id, self.credentials.client_secret
        ));
        let mut response = self
            .agent
            .post(&self.token_url)
            .header("Authorization", &format!("Basic {basic}"))
            .header("User-Agent", &self.credentials.user_agent)
            .send_form([("grant_type", "client_credentials")])
            .map_err(|e| match e {
                ureq::Error::StatusCode(code) => {
                    ForumError::Auth(format!("token endpoint returned HTTP {code}"))
                }
                other => ForumError::Http(other.to_string()),
            })?;

        let token: TokenResponse = response
            .body_mut()
            .read_json()
            .map_err(|e| ForumError::Auth(format!("token response: {e}")))?;

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        info!(expires_in = token.expires_in, "forum API token acquired");

        *cached = Some(CachedToken {
            value: token.access_token.clone(),
            refresh_at: Instant::now() + lifetime,
        });
        Ok(token.access_token)
    }

    fn invalidate_token(&self) {
        if let Ok(mut cached) = self.token.lock() {
            *cached = None;
        }
    }

    // ── Requests ─────────────────────────────────────────────────────────────

    fn get_json<T: DeserializeOwned>(&self, path: &str, target: &str) -> Result<T, ForumError> {
        let url = format!("{}{path}", self.api_base);
        debug!(url = %url, "forum API request");

        let token = self.bearer_token()?;
        let outcome = match self.send_get(&url, &token) {
            Err(ureq::Error::StatusCode(401)) => {
                warn!(resource = target, "forum API rejected the cached token; refreshing");
                self.invalidate_token();
                let token = self.bearer_token()?;
                self.send_get(&url, &token)
            }
            other => other,
        };
        let mut response = outcome.map_err(|e| map_request_error(e, target))?;

        response
            .body_mut()
            .read_json()
            .map_err(|e| ForumError::Decode(e.to_string()))
    }

    fn send_get(
        &self,
        url: &str,
        token: &str,
    ) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
        self.agent
            .get(url)
            .header("Authorization", &format!("bearer {token}"))
            .header("User-Agent", &self.credentials.user_agent)
            .call()
    }
}

fn map_request_error(e: ureq::Error, target: &str) -> ForumError {
    match e {
        ureq::Error::StatusCode(404) => ForumError::NotFound(target.to_string()),
        ureq::Error::StatusCode(code @ (401 | 403)) => {
            ForumError::Auth(format!("HTTP {code} for {target}"))
        }
        ureq::Error::StatusCode(code) => ForumError::Http(format!("HTTP {code} for {target}")),
        other => ForumError::Http(other.to_string()),
    }
}

fn clamp_limit(limit: usize) -> usize {
    limit.clamp(1, MAX_LIMIT)
}

// ── ForumSource ──────────────────────────────────────────────────────────────

impl ForumSource for RedditClient {
    fn random_post(&self, forum: &ForumName) -> Result<Option<Post>, ForumError> {
        let path = format!("/r/{}/random?raw_json=1", forum.as_str());
        let response: RandomResponse = self.get_json(&path, &forum.to_string())?;
        Ok(response.into_first_post())
    }

    fn hot_posts(&self, forum: &ForumName, limit: usize) -> Result<Vec<Post>, ForumError> {
        let path = format!(
            "/r/{}/hot?limit={}&raw_json=1",
            forum.as_str(),
            clamp_limit(limit)
        );
        let listing: Listing = self.get_json(&path, &forum.to_string())?;
        let mut posts = listing::into_posts(listing);
        posts.truncate(limit);
        Ok(posts)
    }

    fn user_posts(&self, user: &Username, limit: usize) -> Result<Vec<Post>, ForumError> {
        let path = format!(
            "/user/{}/submitted?sort=new&limit={}&raw_json=1",
            user.as_str(),
            clamp_limit(limit)
        );
        let listing: Listing = self.get_json(&path, &user.to_string())?;
        let mut posts = listing::into_posts(listing);
        posts.truncate(limit);
        Ok(posts)
    }
}
