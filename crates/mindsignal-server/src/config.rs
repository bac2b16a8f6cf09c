use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use mindsignal_forum::client::ForumCredentials;
use mindsignal_forum::selection::{DEFAULT_HOT_LIMIT, DEFAULT_USER_POST_LIMIT};

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_MODEL_DIR: &str = "artifacts/classifier";
pub const DEFAULT_EMBEDDING_MODEL_DIR: &str = "artifacts/all-MiniLM-L6-v2";
pub const DEFAULT_FORUM_TIMEOUT_SECS: u64 = 15;

const SECRETS_ENV: &str = "MINDSIGNAL_SECRETS";

/// Forum credentials as stored on disk. Any field may be absent and
/// supplied through the environment instead.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecretsFile {
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl SecretsFile {
    pub fn load(path: &Path) -> eyre::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| eyre::eyre!("failed to read secrets at {}: {e}", path.display()))?;
        let secrets: SecretsFile = serde_json::from_str(&contents)
            .map_err(|e| eyre::eyre!("invalid secrets file {}: {e}", path.display()))?;
        Ok(secrets)
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Directory holding `vectorizer.json` and `model.json`.
    pub model_dir: PathBuf,
    /// Directory holding the sentence-embedding model files.
    pub embedding_model_dir: PathBuf,
    pub credentials: ForumCredentials,
    pub forum_timeout: Duration,
    pub hot_limit: usize,
    pub user_post_limit: usize,
    pub secrets_path: Option<PathBuf>,
}

/// Redacted config info safe to log.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigInfo {
    pub bind_addr: String,
    pub model_dir: String,
    pub embedding_model_dir: String,
    pub client_id_hint: String,
    pub user_agent: String,
    pub forum_timeout_secs: u64,
    pub hot_limit: usize,
    pub user_post_limit: usize,
    pub secrets_path: Option<String>,
}

fn default_secrets_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join("mindsignal").join("secrets.json"))
}

impl ServerConfig {
    /// Read configuration from the process environment and the secrets file.
    ///
    /// `MINDSIGNAL_SECRETS` names the secrets file explicitly and must exist;
    /// the default location under the user config directory is optional.
    pub fn load() -> eyre::Result<Self> {
        let env = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

        let (secrets, secrets_path) = match env(SECRETS_ENV) {
            Some(explicit) => {
                let path = PathBuf::from(explicit);
                (SecretsFile::load(&path)?, Some(path))
            }
            None => match default_secrets_path().filter(|p| p.exists()) {
                Some(path) => (SecretsFile::load(&path)?, Some(path)),
                None => (SecretsFile::default(), None),
            },
        };

        Self::from_sources(env, secrets, secrets_path)
    }

    /// Build a config from a variable lookup and already-loaded secrets.
    /// Variables take precedence over the secrets file.
    pub fn from_sources<F>(
        env: F,
        secrets: SecretsFile,
        secrets_path: Option<PathBuf>,
    ) -> eyre::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |v: &String| !v.trim().is_empty();
        let credential = |key: &str, from_file: Option<String>, name: &str| {
            env(key)
                .filter(present)
                .or(from_file.filter(present))
                .ok_or_else(|| {
                    eyre::eyre!("missing forum API {name}: set {key} or add \"{name}\" to the secrets file")
                })
        };

        let credentials = ForumCredentials {
            client_id: credential("MINDSIGNAL_CLIENT_ID", secrets.client_id, "client_id")?,
            client_secret: credential(
                "MINDSIGNAL_CLIENT_SECRET",
                secrets.client_secret,
                "client_secret",
            )?,
            user_agent: credential("MINDSIGNAL_USER_AGENT", secrets.user_agent, "user_agent")?,
        };

        let bind_addr = env("MINDSIGNAL_BIND")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| eyre::eyre!("invalid MINDSIGNAL_BIND: {e}"))?;

        let model_dir = env("MINDSIGNAL_MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_DIR));
        let embedding_model_dir = env("MINDSIGNAL_EMBEDDING_MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EMBEDDING_MODEL_DIR));

        let forum_timeout = Duration::from_secs(parse_number(
            &env,
            "MINDSIGNAL_FORUM_TIMEOUT_SECS",
            DEFAULT_FORUM_TIMEOUT_SECS,
        )?);
        let hot_limit = parse_number(&env, "MINDSIGNAL_HOT_LIMIT", DEFAULT_HOT_LIMIT)?;
        let user_post_limit =
            parse_number(&env, "MINDSIGNAL_USER_POST_LIMIT", DEFAULT_USER_POST_LIMIT)?;

        Ok(Self {
            bind_addr,
            model_dir,
            embedding_model_dir,
            credentials,
            forum_timeout,
            hot_limit,
            user_post_limit,
            secrets_path,
        })
    }

    pub fn info(&self) -> ConfigInfo {
        ConfigInfo {
            bind_addr: self.bind_addr.to_string(),
            model_dir: self.model_dir.display().to_string(),
            embedding_model_dir: self.embedding_model_dir.display().to_string(),
            client_id_hint: redact_secret(&self.credentials.client_id),
            user_agent: self.credentials.user_agent.clone(),
            forum_timeout_secs: self.forum_timeout.as_secs(),
            hot_limit: self.hot_limit,
            user_post_limit: self.user_post_limit,
            secrets_path: self.secrets_path.as_ref().map(|p| p.display().to_string()),
        }
    }
}

fn parse_number<F, T>(env: &F, key: &str, default: T) -> eyre::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + PartialOrd + From<u8>,
    T::Err: std::fmt::Display,
{
    let Some(raw) = env(key) else {
        return Ok(default);
    };
    let value: T = raw
        .trim()
        .parse()
        .map_err(|e| eyre::eyre!("invalid {key}: {e}"))?;
    if value < T::from(1) {
        return Err(eyre::eyre!("{key} must be at least 1"));
    }
    Ok(value)
}

/// Show only the ends of a credential.
pub fn redact_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let prefix: String = chars[..4].iter().collect();
    let suffix: String = chars[chars.len() - 4..].iter().collect();
    format!("{prefix}...{suffix}")
}
